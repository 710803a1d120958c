//! On-disk plan state for the CLI.
//!
//! The plan lives as a single JSON file inside the state directory. A
//! missing file means an empty plan (first run), mirroring the engine's
//! treatment of absence as an expected state rather than an error.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use drift_core::Plan;

/// File name of the plan state record inside the state directory.
pub const PLAN_FILE: &str = "plan.json";

/// Reads and writes the stored plan for one state directory.
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    /// Creates a store rooted at the given state directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn plan_path(&self) -> PathBuf {
        self.dir.join(PLAN_FILE)
    }

    /// Loads the stored plan, or an empty plan when none exists yet.
    pub fn load(&self) -> Result<Plan> {
        let path = self.plan_path();
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse plan state at '{}'", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Plan::new()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read plan state at '{}'", path.display()))
            }
        }
    }

    /// Writes the plan, creating the state directory if needed.
    pub fn save(&self, plan: &Plan) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create state directory '{}'", self.dir.display())
        })?;
        let payload = serde_json::to_string_pretty(plan).context("Failed to serialize plan")?;
        let path = self.plan_path();
        fs::write(&path, payload)
            .with_context(|| format!("Failed to write plan state at '{}'", path.display()))
    }
}
