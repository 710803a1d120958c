#![allow(dead_code)] // not every test binary uses every helper

use drift_core::{ParsedStep, Plan, Step, StepStatus};
use serde_json::Map;

/// Helper to build a step in the given status.
pub fn step(id: &str, title: &str, description: Option<&str>, status: StepStatus) -> Step {
    Step {
        id: id.to_string(),
        parent_id: None,
        order_index: 0,
        title: title.to_string(),
        description: description.map(String::from),
        status,
        content_hash: None,
        complexity: None,
        metadata: Map::new(),
    }
}

/// Helper to build a completed step carrying its content hash.
pub fn completed_step(id: &str, title: &str, description: Option<&str>) -> Step {
    let mut step = step(id, title, description, StepStatus::Completed);
    drift_core::set_content_hash(&mut step);
    step
}

/// Helper to build a parsed-document record.
pub fn parsed(id: &str, title: &str, description: Option<&str>) -> ParsedStep {
    ParsedStep {
        id: id.to_string(),
        parent_id: None,
        title: title.to_string(),
        description: description.map(String::from),
        complexity: None,
    }
}

/// Helper to build a plan holding the given steps, with order indexes
/// assigned from position.
pub fn plan_with(steps: Vec<Step>) -> Plan {
    let mut plan = Plan::new();
    plan.steps = steps;
    for (i, step) in plan.steps.iter_mut().enumerate() {
        step.order_index = i as u32;
    }
    plan
}
