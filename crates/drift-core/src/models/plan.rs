//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Step;

/// An ordered sequence of steps plus the bookkeeping reconciliation needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Monotonically increasing version, bumped by exactly one whenever a
    /// reconciliation pass reports a change
    pub plan_version: u64,

    /// Whether the plan has passed review
    #[serde(default)]
    pub is_approved: bool,

    /// Number of review cycles the plan has been through
    #[serde(default)]
    pub review_count: u32,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps in document order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Plan {
    /// Creates an empty plan at version zero.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            plan_version: 0,
            is_approved: false,
            review_count: 0,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        }
    }

    /// Looks up a step by id.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Looks up a step by id for mutation.
    pub fn step_mut(&mut self, id: &str) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id == id)
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}
