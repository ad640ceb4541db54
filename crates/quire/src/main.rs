//! Quire CLI - GitBook to Hugo Book documentation converter.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod worktree;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Converts GitBook documentation into a Hugo Book site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to quire.toml config file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Convert from the existing worktrees without resetting them
    #[arg(long, global = true)]
    skip_worktree: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every configured source (default)
    Convert,

    /// Write a default quire.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command.unwrap_or(Commands::Convert) {
        Commands::Convert => {
            let failures = commands::convert::run(&cli.config, cli.skip_worktree)?;
            if failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
