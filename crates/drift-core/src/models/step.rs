//! Step model definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Complexity, StepStatus};

/// Represents an individual unit of planned work within a plan.
///
/// Step identifiers are unique within a plan at any point in time but are
/// not stable across edits: the upstream editor is free to renumber steps,
/// which reconciliation resolves via content-hash rename matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Identifier, unique within the plan at rest
    pub id: String,

    /// Optional parent step id; parent/child links form a forest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Position among steps at the document level, re-derived on every sync
    pub order_index: u32,

    /// Brief title/summary of the step
    pub title: String,

    /// Detailed multi-line description of the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status of the step
    pub status: StepStatus,

    /// Content fingerprint, stamped only when the step is completed.
    /// Its presence makes the step eligible for rename matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    /// Effort rating supplied by the planning stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,

    /// Opaque data carried through unchanged across updates and renames
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// One record produced by the external plan-document parser.
///
/// This is the shape reconciliation consumes; the parser itself is a
/// collaborator and lives outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedStep {
    /// Identifier as written in the edited document
    pub id: String,

    /// Optional parent step id
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Step title
    pub title: String,

    /// Optional step description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional effort rating
    #[serde(default)]
    pub complexity: Option<Complexity>,
}
