//! Data models for plans, steps, and reconciliation results.
//!
//! This module contains the core domain models of the Drift reconciliation
//! engine. Display implementations live in [`crate::display`] to keep data
//! structures separate from presentation logic.

pub mod plan;
pub mod snapshot;
pub mod status;
pub mod step;
pub mod sync;


// Re-export all public types at the models level
pub use plan::Plan;
pub use snapshot::{PlanSnapshot, SnapshotComparison};
pub use status::{Complexity, StepStatus};
pub use step::{ParsedStep, Step};
pub use sync::{RenamedStep, SyncOutcome, SyncResult};
