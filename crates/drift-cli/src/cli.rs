//! Command handlers for the Drift CLI.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use drift_core::{
    cascade_descendants, parse_modification_directives, plan_hash, reconcile, set_content_hash,
    ParsedStep, SnapshotStore, StepStatus,
};
use log::info;

use crate::store::PlanStore;

/// Dispatches parsed CLI commands against the stored plan state.
pub struct Cli {
    store: PlanStore,
    snapshots: SnapshotStore,
}

impl Cli {
    /// Creates a CLI handler rooted at the given state directory.
    pub fn new(state_dir: PathBuf) -> Self {
        let snapshots = SnapshotStore::new(&state_dir);
        Self {
            store: PlanStore::new(state_dir),
            snapshots,
        }
    }

    /// Reconciles the stored plan against a parsed step document.
    pub fn sync(&self, source: &Path) -> Result<()> {
        let parsed = read_parsed_document(source)?;
        let plan = self.store.load()?;

        match reconcile(parsed, &plan) {
            Some(outcome) => {
                if outcome.result.changed {
                    self.store.save(&outcome.plan)?;
                    info!("plan advanced to v{}", outcome.plan.plan_version);
                }
                print!("{}", outcome.result);
                Ok(())
            }
            None => {
                println!("Plan source not available; nothing to reconcile.");
                Ok(())
            }
        }
    }

    /// Prints the stored plan.
    pub fn show(&self) -> Result<()> {
        let plan = self.store.load()?;
        print!("{plan}");
        Ok(())
    }

    /// Marks a step completed and stamps its content hash.
    pub fn complete_step(&self, id: &str) -> Result<()> {
        self.set_step_status(id, StepStatus::Completed)
    }

    /// Sets a step status from its string form.
    pub fn set_step_status_str(&self, id: &str, status: &str) -> Result<()> {
        let status: StepStatus = status.parse().map_err(anyhow::Error::msg)?;
        self.set_step_status(id, status)
    }

    fn set_step_status(&self, id: &str, status: StepStatus) -> Result<()> {
        let mut plan = self.store.load()?;
        let Some(step) = plan.step_mut(id) else {
            bail!("Step '{id}' not found in the stored plan");
        };

        let prior = step.status;
        step.status = status;
        match status {
            // Completion is the one event that stamps the content hash.
            StepStatus::Completed => set_content_hash(step),
            // Regressing settled work invalidates its fingerprint.
            StepStatus::Pending if prior.is_settled() => step.content_hash = None,
            _ => {}
        }

        let line = format!("Step '{id}': {} -> {}", prior.as_str(), status.as_str());
        self.store.save(&plan)?;
        println!("{line}");
        Ok(())
    }

    /// Records the current whole-plan hash as the snapshot.
    pub fn snapshot_save(&self) -> Result<()> {
        let plan = self.store.load()?;
        let hash = plan_hash(&plan.steps);
        let snapshot = self.snapshots.save(&hash, plan.plan_version)?;
        println!(
            "Snapshot saved: {} (plan v{})",
            snapshot.hash, snapshot.plan_version
        );
        Ok(())
    }

    /// Compares the stored plan against the recorded snapshot.
    pub fn snapshot_check(&self) -> Result<()> {
        let plan = self.store.load()?;
        match self.snapshots.has_changed_since(&plan) {
            Some(comparison) => print!("{comparison}"),
            None => println!("No snapshot recorded."),
        }
        Ok(())
    }

    /// Removes the recorded snapshot.
    pub fn snapshot_clear(&self) -> Result<()> {
        self.snapshots.delete()?;
        println!("Snapshot cleared.");
        Ok(())
    }

    /// Prints the transitive descendants of the given root ids.
    pub fn cascade(&self, ids: &[String]) -> Result<()> {
        let plan = self.store.load()?;
        let roots: HashSet<String> = ids.iter().cloned().collect();
        let mut descendants: Vec<String> =
            cascade_descendants(&roots, &plan.steps).into_iter().collect();
        descendants.sort_unstable();

        if descendants.is_empty() {
            println!("No descendants.");
        } else {
            for id in descendants {
                println!("{id}");
            }
        }
        Ok(())
    }

    /// Parses modification directives from a text file and prints the
    /// outcome.
    pub fn directives(&self, file: &Path) -> Result<()> {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read directives from '{}'", file.display()))?;
        let plan = self.store.load()?;
        let outcome = parse_modification_directives(&text, &plan.steps, None);
        print!("{outcome}");
        Ok(())
    }
}

/// Reads a parsed step document, mapping a missing or unparsable file to
/// the parser-absence value the engine expects.
fn read_parsed_document(source: &Path) -> Result<Option<Vec<ParsedStep>>> {
    let raw = match fs::read_to_string(source) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read plan source '{}'", source.display()))
        }
    };
    match serde_json::from_str(&raw) {
        Ok(steps) => Ok(Some(steps)),
        Err(e) => {
            info!("treating unparsable plan source '{}' as absent: {e}", source.display());
            Ok(None)
        }
    }
}
