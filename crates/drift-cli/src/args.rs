use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Main command-line interface for the Drift plan reconciliation tool
///
/// Drift keeps a plan of work items in sync with a freely edited plan
/// document. It diffs freshly parsed step lists against the stored plan,
/// resolves identifier renames through content hashing, expands cascade
/// deletions through parent/child links, and tracks whole-plan snapshots
/// across review stages.
#[derive(Parser)]
#[command(version, about, name = "drift")]
pub struct Args {
    /// Directory holding plan state and snapshots. Defaults to
    /// $XDG_DATA_HOME/drift
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Drift CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the stored plan against a parsed step document (a JSON
    /// array of parsed steps)
    Sync {
        /// Path to the parsed step document
        source: PathBuf,
    },
    /// Print the stored plan
    Show,
    /// Manage steps within the stored plan
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage plan snapshots
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },
    /// List the transitive descendants of the given step ids
    Cascade {
        /// Root step ids to expand
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Parse modification directives from a text file against the stored
    /// plan
    Directives {
        /// Path to the free text containing directive blocks
        file: PathBuf,
    },
}

/// Step-level operations
#[derive(Subcommand)]
pub enum StepCommands {
    /// Mark a step completed and stamp its content hash
    Complete {
        /// Step id
        id: String,
    },
    /// Set a step status (pending, in_progress, completed, blocked,
    /// skipped, needs_review)
    Status {
        /// Step id
        id: String,
        /// New status
        status: String,
    },
}

/// Snapshot operations
#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Record the current whole-plan hash
    Save,
    /// Compare the stored plan against the recorded snapshot
    Check,
    /// Remove the recorded snapshot
    Clear,
}
