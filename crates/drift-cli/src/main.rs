//! Drift CLI Application
//!
//! Command-line interface for the Drift plan reconciliation engine.

mod args;
mod cli;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::{Args, Commands, SnapshotCommands, StepCommands};
use clap::Parser;
use cli::Cli;
use log::info;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args { state_dir, command } = Args::parse();

    let state_dir = match state_dir {
        Some(dir) => dir,
        None => default_state_dir()?,
    };

    info!("Drift started with state directory {}", state_dir.display());
    let cli = Cli::new(state_dir);

    match command {
        Sync { source } => cli.sync(&source),
        Show => cli.show(),
        Step { command } => match command {
            StepCommands::Complete { id } => cli.complete_step(&id),
            StepCommands::Status { id, status } => cli.set_step_status_str(&id, &status),
        },
        Snapshot { command } => match command {
            SnapshotCommands::Save => cli.snapshot_save(),
            SnapshotCommands::Check => cli.snapshot_check(),
            SnapshotCommands::Clear => cli.snapshot_clear(),
        },
        Cascade { ids } => cli.cascade(&ids),
        Directives { file } => cli.directives(&file),
    }
}

/// Returns the default state directory following the XDG Base Directory
/// specification.
fn default_state_dir() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix("drift")
        .create_data_directory("")
        .context("Failed to prepare XDG data directory")
}
