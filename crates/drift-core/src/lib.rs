//! Core library for the Drift plan reconciliation engine.
//!
//! An AI coding agent is allowed to freely rewrite a plan document at any
//! point in a multi-stage workflow. After such an edit, this crate
//! determines, without any cooperation from the agent, exactly what
//! changed: which steps are new, which were edited, which were renamed
//! (same content under a new identifier), and which were deleted,
//! including everything transitively depending on a deleted step.
//!
//! # Components
//!
//! - [`canon`]: text normalization so formatting noise never registers as
//!   a content change
//! - [`hash`]: deterministic step and order-independent whole-plan
//!   fingerprints
//! - [`reconcile`]: the three-tier diff (identifier match, hash match,
//!   new) between a parsed step list and the stored plan
//! - [`cascade`] and [`directives`]: transitive removal through
//!   parent/child links and parsing of textual modification directives
//! - [`snapshot`]: the persisted before/after record spanning a review
//!   stage
//!
//! # Quick Start
//!
//! ```rust
//! use drift_core::{reconcile, ParsedStep, Plan};
//!
//! let plan = Plan::new();
//! let parsed = vec![ParsedStep {
//!     id: "s1".to_string(),
//!     parent_id: None,
//!     title: "Implement feature".to_string(),
//!     description: Some("Basic implementation".to_string()),
//!     complexity: None,
//! }];
//!
//! let outcome = reconcile(Some(parsed), &plan).expect("source was present");
//! assert!(outcome.result.changed);
//! assert_eq!(outcome.result.added, vec!["s1".to_string()]);
//! assert_eq!(outcome.plan.plan_version, 1);
//! ```

pub mod canon;
pub mod cascade;
pub mod directives;
pub mod display;
pub mod error;
pub mod hash;
pub mod models;
pub mod reconcile;
pub mod snapshot;

// Re-export commonly used items
pub use canon::normalize;
pub use cascade::cascade_descendants;
pub use directives::{
    detect_modified, parse_modification_directives, DetectedSteps, DirectiveOutcome, Modifications,
};
pub use error::{Result, SyncError};
pub use hash::{is_unchanged, plan_hash, set_content_hash, step_hash};
pub use models::{
    Complexity, ParsedStep, Plan, PlanSnapshot, RenamedStep, SnapshotComparison, Step, StepStatus,
    SyncOutcome, SyncResult,
};
pub use reconcile::reconcile;
pub use snapshot::SnapshotStore;
