//! Convert command.

use std::path::Path;

use anyhow::Result;
use quire_convert::Converter;

use crate::config::ConfigFile;
use crate::worktree;

/// Run the convert command. Returns the number of recorded failures.
pub fn run(config_path: &Path, skip_worktree: bool) -> Result<usize> {
    let config = ConfigFile::load(config_path)?;

    if skip_worktree {
        tracing::info!("Skipping worktree refresh");
    } else {
        for worktree in config.sources.iter().filter_map(|s| s.worktree.as_ref()) {
            worktree::refresh(worktree)?;
        }
    }

    let sections = config.section_table();
    let embeds = config.embed_registry();
    let mut failures = Vec::new();

    for source in &config.sources {
        tracing::info!("# Converting {}", source.dir.display());

        let report = Converter::new(config.convert_config(source))
            .with_sections(sections.clone())
            .with_embeds(embeds.clone())
            .run();

        tracing::info!("Conversion complete!");
        tracing::info!("  Pages: {}", report.pages);
        tracing::info!("  Assets: {}", report.assets);
        tracing::info!("  Sections: {}", report.sections);
        tracing::info!("  Extras: {}", report.extras);
        tracing::info!("  Output: {}", report.output_dir.display());
        tracing::info!("  Time: {}ms", report.duration_ms);

        failures.extend(report.failures);
    }

    if !failures.is_empty() {
        tracing::error!("# ERRORS");
        for failure in &failures {
            tracing::error!("{}", failure);
        }
    }

    Ok(failures.len())
}
