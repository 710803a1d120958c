//! Snapshot record types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The persisted record of what a plan looked like right before a
/// free-edit-capable stage began.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSnapshot {
    /// Order-independent whole-plan content hash
    pub hash: String,

    /// Plan version at the time the snapshot was taken
    pub plan_version: u64,

    /// Timestamp when the snapshot was written (UTC)
    pub saved_at: Timestamp,
}

/// The answer to "has the plan changed since the last snapshot?".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotComparison {
    /// Hash recorded when the snapshot was taken
    pub before_hash: String,

    /// Hash of the plan as it stands now
    pub after_hash: String,

    /// Whether the two hashes differ
    pub changed: bool,
}
