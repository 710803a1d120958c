//! Step reconciliation: diffing a freshly parsed step list against the
//! previously stored plan.
//!
//! Matching runs in three tiers, in document order over the parsed steps:
//!
//! 1. **Identifier match** — the parsed id exists in the current plan.
//!    This strictly precedes and pre-empts hash matching: the editor
//!    explicitly kept this id, and that intent outranks coincidental
//!    content equality with some other completed step.
//! 2. **Hash match** — the parsed content fingerprint matches a completed
//!    step carrying a stored hash. The step was renamed; its completion
//!    state, metadata, and hash survive under the new id. Each source step
//!    can be claimed at most once per pass.
//! 3. **New** — the step is an addition, created pending with no hash.
//!
//! Current steps consumed by neither tier are removals. Title/description
//! comparison for identifier matches uses canonicalized text, the same
//! policy the hash applies, so a whitespace-only edit is never reported as
//! an update.

use std::collections::{HashMap, HashSet};

use jiff::Timestamp;
use log::debug;
use serde_json::Map;

use crate::canon::normalize;
use crate::hash::step_hash;
use crate::models::{ParsedStep, Plan, RenamedStep, Step, StepStatus, SyncOutcome, SyncResult};

/// Reconciles a parsed step list against the current plan.
///
/// `None` in, `None` out: when the source document could not be read or
/// parsed by the external parser, the absence propagates cleanly instead
/// of being treated as an empty document (which would delete every step).
///
/// The returned plan carries the reconciled steps in parse order, with
/// `plan_version` incremented by exactly one iff the diff is non-empty.
/// The input plan is never mutated.
pub fn reconcile(parsed: Option<Vec<ParsedStep>>, current: &Plan) -> Option<SyncOutcome> {
    let parsed = parsed?;
    let mut result = SyncResult::default();

    let by_id: HashMap<&str, &Step> = current
        .steps
        .iter()
        .map(|step| (step.id.as_str(), step))
        .collect();

    // Rename candidates: completed steps carrying a stored hash. Steps in
    // any other status have no trustworthy fingerprint to match against.
    let mut hash_pool: HashMap<&str, Vec<&Step>> = HashMap::new();
    for step in &current.steps {
        if step.status == StepStatus::Completed {
            if let Some(hash) = step.content_hash.as_deref() {
                hash_pool.entry(hash).or_default().push(step);
            }
        }
    }

    let mut consumed: HashSet<&str> = HashSet::new();
    let mut seen_parsed_ids: HashSet<String> = HashSet::new();
    let mut next_steps: Vec<Step> = Vec::with_capacity(parsed.len());

    for (position, incoming) in parsed.into_iter().enumerate() {
        let order_index = position as u32;

        if !seen_parsed_ids.insert(incoming.id.clone()) {
            result.errors.push(format!(
                "duplicate step id '{}' in parsed document; later occurrence ignored",
                incoming.id
            ));
            continue;
        }

        // Tier 1: identifier match.
        if let Some(source) = by_id.get(incoming.id.as_str()) {
            consumed.insert(source.id.as_str());
            next_steps.push(apply_identifier_match(
                &incoming,
                source,
                order_index,
                &mut result,
            ));
            continue;
        }

        // Tier 2: rename via content hash.
        let incoming_hash = step_hash(&incoming.title, incoming.description.as_deref());
        if let Some(source) = claim_rename_source(&hash_pool, &consumed, &incoming_hash) {
            consumed.insert(source.id.as_str());
            result.renamed.push(RenamedStep {
                old_id: source.id.clone(),
                new_id: incoming.id.clone(),
            });
            next_steps.push(Step {
                id: incoming.id,
                parent_id: incoming.parent_id,
                order_index,
                title: incoming.title,
                description: incoming.description,
                status: source.status,
                content_hash: source.content_hash.clone(),
                complexity: incoming.complexity.or(source.complexity),
                metadata: source.metadata.clone(),
            });
            continue;
        }

        // Tier 3: a genuinely new step.
        result.added.push(incoming.id.clone());
        next_steps.push(Step {
            id: incoming.id,
            parent_id: incoming.parent_id,
            order_index,
            title: incoming.title,
            description: incoming.description,
            status: StepStatus::Pending,
            content_hash: None,
            complexity: incoming.complexity,
            metadata: Map::new(),
        });
    }

    // Anything never consumed by either tier is gone from the document.
    for step in &current.steps {
        if !consumed.contains(step.id.as_str()) {
            result.removed.push(step.id.clone());
        }
    }

    result.changed = result.total_changes() > 0;

    debug!(
        "reconciled plan v{}: {} added, {} updated, {} removed, {} renamed",
        current.plan_version,
        result.added_count(),
        result.updated_count(),
        result.removed_count(),
        result.renamed_count()
    );

    let plan = Plan {
        plan_version: if result.changed {
            current.plan_version + 1
        } else {
            current.plan_version
        },
        is_approved: current.is_approved,
        review_count: current.review_count,
        created_at: current.created_at,
        updated_at: if result.changed {
            Timestamp::now()
        } else {
            current.updated_at
        },
        steps: next_steps,
    };

    Some(SyncOutcome { result, plan })
}

/// Resolves an identifier match into either a carried-forward or an
/// in-place-updated step.
fn apply_identifier_match(
    incoming: &ParsedStep,
    source: &Step,
    order_index: u32,
    result: &mut SyncResult,
) -> Step {
    let same_title = normalize(&incoming.title) == normalize(&source.title);
    let same_description = normalize(incoming.description.as_deref().unwrap_or(""))
        == normalize(source.description.as_deref().unwrap_or(""));

    let mut step = source.clone();
    step.order_index = order_index;
    step.parent_id = incoming.parent_id.clone();

    if same_title && same_description {
        // Carried forward untouched apart from position and parentage.
        return step;
    }

    step.title = incoming.title.clone();
    step.description = incoming.description.clone();
    // The stored hash can no longer vouch for content it does not reflect.
    step.content_hash = None;
    if source.status.is_settled() {
        step.status = StepStatus::Pending;
    }
    if let Some(complexity) = incoming.complexity {
        step.complexity = Some(complexity);
    }

    result.updated.push(source.id.clone());
    step
}

/// Finds a not-yet-consumed rename source for the given content hash.
///
/// When several completed steps share identical content, only the first
/// unclaimed one matches; later parsed steps with the same content fall
/// through to "new".
fn claim_rename_source<'a>(
    hash_pool: &HashMap<&str, Vec<&'a Step>>,
    consumed: &HashSet<&str>,
    hash: &str,
) -> Option<&'a Step> {
    hash_pool
        .get(hash)?
        .iter()
        .find(|step| !consumed.contains(step.id.as_str()))
        .copied()
}
