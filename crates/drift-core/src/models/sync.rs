//! Reconciliation result types.

use serde::{Deserialize, Serialize};

use super::Plan;

/// An identifier rename resolved through content-hash matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenamedStep {
    /// Identifier the step carried before the edit
    pub old_id: String,

    /// Identifier the step carries now
    pub new_id: String,
}

/// The structured diff produced by one reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncResult {
    /// Whether the pass detected any change at all
    pub changed: bool,

    /// Identifiers of newly created steps
    pub added: Vec<String>,

    /// Identifiers of steps whose content was edited in place
    pub updated: Vec<String>,

    /// Identifiers of steps no longer present and not claimed by a rename
    pub removed: Vec<String>,

    /// Steps whose identifier changed but whose content survived
    pub renamed: Vec<RenamedStep>,

    /// Non-fatal problems encountered during the pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    /// Total number of detected changes across all categories.
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len() + self.renamed.len()
    }
}

/// The full output of a reconciliation pass: the diff and the plan that
/// results from applying it.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Structured diff of the pass
    pub result: SyncResult,

    /// The reconciled plan, with `plan_version` bumped iff the diff is
    /// non-empty
    pub plan: Plan,
}
