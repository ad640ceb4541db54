//! Git worktree refresh for sources checked out from sync branches.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{bail, Context, Result};

use crate::config::WorktreeConfig;

/// Re-create the worktree at `path` from `branch`.
///
/// Removing a worktree that isn't there is fine; failing to add it is not.
pub fn refresh(worktree: &WorktreeConfig) -> Result<()> {
    tracing::info!(
        "Refreshing worktree {} from {}",
        worktree.path.display(),
        worktree.branch
    );

    match remove(&worktree.path) {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(
            "git worktree remove {} exited with {}",
            worktree.path.display(),
            status
        ),
        Err(e) => tracing::warn!("Failed to run git worktree remove: {}", e),
    }

    let status = Command::new("git")
        .arg("worktree")
        .arg("add")
        .arg(&worktree.path)
        .arg(&worktree.branch)
        .status()
        .context("Failed to run git worktree add")?;
    if !status.success() {
        bail!(
            "git worktree add {} {} exited with {}",
            worktree.path.display(),
            worktree.branch,
            status
        );
    }
    Ok(())
}

fn remove(path: &Path) -> std::io::Result<ExitStatus> {
    Command::new("git")
        .arg("worktree")
        .arg("remove")
        .arg(path)
        .status()
}
