//! Command-line interface for gitsync
//!
//! Running `gitsync` with no arguments syncs everything listed in
//! `~/.gitsync.toml` and prints the menu. Problems are reported inside the
//! menu text rather than through the exit status, so the menu bar always has
//! something to show.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::config;
use crate::report::{self, RunOutcome};
use crate::sync::SyncEngine;

/// gitsync - keep local git working copies in sync with their remotes
#[derive(Parser, Debug)]
#[command(name = "gitsync", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ~/.gitsync.toml)
    #[arg(short, long, value_name = "FILE", env = "GITSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity on stderr (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config_path = self.config.unwrap_or_else(config::default_config_path);
        tracing::info!("Using configuration {}", config_path.display());

        let output = match config::load(&config_path) {
            Ok(repos) => {
                let statuses = SyncEngine::new().run(&repos);
                report::render(&RunOutcome::Completed(statuses))
            }
            Err(e) => {
                tracing::warn!("Configuration rejected: {}", e);
                report::render(&RunOutcome::ConfigError(e.to_string()))
            }
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Logs go to stderr; stdout belongs to the menu
fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
