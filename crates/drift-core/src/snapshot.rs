//! Persistence of whole-plan snapshots.
//!
//! A snapshot is the single record of "what the plan looked like right
//! before a free-edit-capable stage began". One record exists per workflow
//! instance; the instance is identified by the storage directory handed to
//! [`SnapshotStore::new`], never by process-wide state.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::{debug, warn};

use crate::error::{FsResultExt, Result};
use crate::hash::plan_hash;
use crate::models::{Plan, PlanSnapshot, SnapshotComparison};

/// Fixed file name of the snapshot record inside the storage directory.
pub const SNAPSHOT_FILE: &str = "plan-snapshot.json";

/// Reads and writes the per-workflow-instance plan snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at the given workflow-instance directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    /// Writes a snapshot record, overwriting any prior one.
    pub fn save(&self, hash: &str, plan_version: u64) -> Result<PlanSnapshot> {
        fs::create_dir_all(&self.dir).fs_context(&self.dir)?;

        let snapshot = PlanSnapshot {
            hash: hash.to_string(),
            plan_version,
            saved_at: Timestamp::now(),
        };
        let payload = serde_json::to_string_pretty(&snapshot)?;
        let path = self.snapshot_path();
        fs::write(&path, payload).fs_context(&path)?;

        debug!("saved snapshot {hash} (plan v{plan_version}) to {}", path.display());
        Ok(snapshot)
    }

    /// Loads the snapshot record.
    ///
    /// A missing file and a corrupt file are treated identically: both
    /// yield `None`, since "no usable snapshot" is an expected state (for
    /// example on the first run), never a fault.
    pub fn load(&self) -> Option<PlanSnapshot> {
        let path = self.snapshot_path();
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("ignoring corrupt snapshot at {}: {e}", path.display());
                None
            }
        }
    }

    /// Removes the snapshot record; idempotent.
    pub fn delete(&self) -> Result<()> {
        let path = self.snapshot_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).fs_context(&path),
        }
    }

    /// Recomputes the whole-plan hash of `plan` and compares it against
    /// the stored snapshot. `None` when no usable snapshot exists.
    pub fn has_changed_since(&self, plan: &Plan) -> Option<SnapshotComparison> {
        let snapshot = self.load()?;
        let after_hash = plan_hash(&plan.steps);
        let changed = after_hash != snapshot.hash;
        Some(SnapshotComparison {
            before_hash: snapshot.hash,
            after_hash,
            changed,
        })
    }
}
