//! Parsing of textual modification directives.
//!
//! Instead of re-emitting the whole plan document, the upstream agent may
//! describe its edits with directive blocks embedded in free text. Two
//! block shapes exist and both may occur any number of times:
//!
//! ```text
//! [PLAN-MODIFICATIONS]
//! modified: ["s1", "s2"]
//! added: ["s9"]
//! removed: ["s3"]
//! [/PLAN-MODIFICATIONS]
//! ```
//!
//! ```text
//! [REMOVED-STEPS]
//! ["s3", "s4"]
//! [/REMOVED-STEPS]
//! ```
//!
//! Both shapes are parsed independently and merged into one modification
//! request, which keeps validation (unknown ids, added/removed conflicts)
//! centralized. Removed roots are expanded through the cascade resolver.

use std::collections::HashSet;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::cascade::cascade_descendants;
use crate::models::Step;

/// The merged id lists from every directive block found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifications {
    /// Ids the agent declared as edited in place
    pub modified_ids: Vec<String>,

    /// Ids the agent declared as newly added
    pub added_ids: Vec<String>,

    /// Ids the agent declared as removed (roots only, before cascade)
    pub removed_ids: Vec<String>,
}

/// The full result of parsing modification directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOutcome {
    /// Merged and deduplicated id lists
    pub modifications: Modifications,

    /// Descendants removed transitively through parent/child links
    pub cascade_deleted_ids: Vec<String>,

    /// Union of declared removals and cascade removals
    pub all_removed_ids: Vec<String>,

    /// False when any referenced id is unknown or the request contradicts
    /// itself
    pub is_valid: bool,

    /// Human-readable validation errors, one per offending id
    pub errors: Vec<String>,
}

/// Classification of step-block references found by [`detect_modified`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedSteps {
    /// Referenced ids already present in the plan
    pub modified_ids: Vec<String>,

    /// Referenced ids not present in the plan
    pub new_ids: Vec<String>,
}

fn modification_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\[PLAN-MODIFICATIONS\](.*?)\[/PLAN-MODIFICATIONS\]")
            .expect("modification block pattern is valid")
    })
}

fn removed_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\[REMOVED-STEPS\](.*?)\[/REMOVED-STEPS\]")
            .expect("removed block pattern is valid")
    })
}

fn label_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(modified|added|removed)\s*:\s*(\[.*\])\s*$")
            .expect("label line pattern is valid")
    })
}

fn step_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\s*STEP\s*:\s*([^\[\]\s]+)\s*\]").expect("step block pattern is valid")
    })
}

fn push_unique(list: &mut Vec<String>, id: String) {
    if !list.iter().any(|existing| *existing == id) {
        list.push(id);
    }
}

/// Parses every modification directive in `text` and resolves the merged
/// request against `steps`.
///
/// `known_new_ids` covers ids the caller already knows are being created
/// in the same edit; references to them are not validation failures.
/// Validation fails when a modified or removed id is unknown, or when an
/// id appears as both added and removed. Failures are reported through
/// `is_valid`/`errors` and never panic or abort the pipeline.
pub fn parse_modification_directives(
    text: &str,
    steps: &[Step],
    known_new_ids: Option<&HashSet<String>>,
) -> DirectiveOutcome {
    let mut modifications = Modifications::default();
    let mut errors = Vec::new();

    for capture in modification_block_re().captures_iter(text) {
        for line in capture[1].lines() {
            let Some(parts) = label_line_re().captures(line) else {
                continue;
            };
            let label = &parts[1];
            match serde_json::from_str::<Vec<String>>(&parts[2]) {
                Ok(ids) => {
                    let target = match label {
                        "modified" => &mut modifications.modified_ids,
                        "added" => &mut modifications.added_ids,
                        _ => &mut modifications.removed_ids,
                    };
                    for id in ids {
                        push_unique(target, id);
                    }
                }
                Err(e) => {
                    errors.push(format!("malformed '{label}' list in modification block: {e}"));
                }
            }
        }
    }

    for capture in removed_block_re().captures_iter(text) {
        match serde_json::from_str::<Vec<String>>(capture[1].trim()) {
            Ok(ids) => {
                for id in ids {
                    push_unique(&mut modifications.removed_ids, id);
                }
            }
            Err(e) => errors.push(format!("malformed removed-steps list: {e}")),
        }
    }

    let existing: HashSet<&str> = steps.iter().map(|step| step.id.as_str()).collect();
    let is_known = |id: &str| {
        existing.contains(id) || known_new_ids.is_some_and(|known| known.contains(id))
    };

    for id in &modifications.modified_ids {
        if !is_known(id) {
            errors.push(format!("modified step id '{id}' does not exist"));
        }
    }
    for id in &modifications.removed_ids {
        if !is_known(id) {
            errors.push(format!("removed step id '{id}' does not exist"));
        }
    }
    for id in &modifications.added_ids {
        if modifications.removed_ids.contains(id) {
            errors.push(format!("step id '{id}' is both added and removed"));
        }
    }

    let removed_roots: HashSet<String> = modifications.removed_ids.iter().cloned().collect();
    let mut cascade_deleted_ids: Vec<String> =
        cascade_descendants(&removed_roots, steps).into_iter().collect();
    cascade_deleted_ids.sort_unstable();

    let mut all_removed_ids = modifications.removed_ids.clone();
    for id in &cascade_deleted_ids {
        push_unique(&mut all_removed_ids, id.clone());
    }

    debug!(
        "parsed directives: {} modified, {} added, {} removed ({} after cascade), {} errors",
        modifications.modified_ids.len(),
        modifications.added_ids.len(),
        modifications.removed_ids.len(),
        all_removed_ids.len(),
        errors.len()
    );

    DirectiveOutcome {
        modifications,
        cascade_deleted_ids,
        all_removed_ids,
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Scans free text for step-block markers (`[STEP: <id>]`, tolerant of
/// irregular internal whitespace) and classifies each referenced id as
/// modified (already in `existing_ids`) or new.
pub fn detect_modified(text: &str, existing_ids: &HashSet<String>) -> DetectedSteps {
    let mut detected = DetectedSteps::default();

    for capture in step_block_re().captures_iter(text) {
        let id = capture[1].to_string();
        if existing_ids.contains(&id) {
            push_unique(&mut detected.modified_ids, id);
        } else {
            push_unique(&mut detected.new_ids, id);
        }
    }

    detected
}
