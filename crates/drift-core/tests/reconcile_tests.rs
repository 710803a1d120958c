mod common;

use common::{completed_step, parsed, plan_with, step};
use drift_core::{reconcile, Complexity, ParsedStep, Plan, StepStatus};

#[test]
fn test_absent_source_propagates_as_none() {
    let plan = plan_with(vec![step("s1", "Keep", None, StepStatus::Pending)]);
    assert!(reconcile(None, &plan).is_none());
}

#[test]
fn test_empty_plan_gains_all_parsed_steps() {
    let plan = Plan::new();
    let outcome = reconcile(
        Some(vec![
            parsed("s1", "First", Some("one")),
            parsed("s2", "Second", None),
        ]),
        &plan,
    )
    .expect("source present");

    assert!(outcome.result.changed);
    assert_eq!(outcome.result.added, vec!["s1", "s2"]);
    assert!(outcome.result.updated.is_empty());
    assert!(outcome.result.removed.is_empty());
    assert!(outcome.result.renamed.is_empty());

    assert_eq!(outcome.plan.plan_version, 1);
    assert_eq!(outcome.plan.steps.len(), 2);
    assert_eq!(outcome.plan.steps[0].status, StepStatus::Pending);
    assert_eq!(outcome.plan.steps[0].order_index, 0);
    assert_eq!(outcome.plan.steps[1].order_index, 1);
    assert!(outcome.plan.steps[0].content_hash.is_none());
}

#[test]
fn test_noop_sync_is_idempotent() {
    let plan = plan_with(vec![
        step("s1", "First", Some("one"), StepStatus::Completed),
        step("s2", "Second", Some("two"), StepStatus::Pending),
    ]);
    let parsed_steps = vec![
        parsed("s1", "First", Some("one")),
        parsed("s2", "Second", Some("two")),
    ];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert!(!outcome.result.changed);
    assert_eq!(outcome.result.total_changes(), 0);
    assert_eq!(outcome.plan.plan_version, plan.plan_version);
    assert_eq!(outcome.plan.updated_at, plan.updated_at);
}

#[test]
fn test_whitespace_only_edit_is_not_an_update() {
    let plan = plan_with(vec![step(
        "s1",
        "Title",
        Some("line one\nline two"),
        StepStatus::Pending,
    )]);
    let parsed_steps = vec![parsed("s1", "  Title  ", Some("line one\r\n\r\nline two"))];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert!(!outcome.result.changed);
    assert!(outcome.result.updated.is_empty());
}

#[test]
fn test_in_place_edit_resets_completed_step() {
    let plan = plan_with(vec![completed_step("s1", "Feature", Some("Basic impl"))]);
    let parsed_steps = vec![parsed("s1", "Feature", Some("Extended impl"))];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert!(outcome.result.changed);
    assert_eq!(outcome.result.updated, vec!["s1"]);

    let step = &outcome.plan.steps[0];
    assert_eq!(step.status, StepStatus::Pending);
    assert!(step.content_hash.is_none());
    assert_eq!(step.description.as_deref(), Some("Extended impl"));
}

#[test]
fn test_in_place_edit_keeps_non_settled_status() {
    let plan = plan_with(vec![step(
        "s1",
        "Feature",
        Some("Basic impl"),
        StepStatus::InProgress,
    )]);
    let parsed_steps = vec![parsed("s1", "Feature", Some("Extended impl"))];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.plan.steps[0].status, StepStatus::InProgress);
    assert_eq!(outcome.result.updated, vec!["s1"]);
}

#[test]
fn test_update_applies_parsed_complexity_or_keeps_prior() {
    let mut source = step("s1", "Feature", Some("v1"), StepStatus::Pending);
    source.complexity = Some(Complexity::High);
    let plan = plan_with(vec![source]);

    // No complexity supplied: prior value survives the edit.
    let outcome = reconcile(Some(vec![parsed("s1", "Feature", Some("v2"))]), &plan)
        .expect("source present");
    assert_eq!(outcome.plan.steps[0].complexity, Some(Complexity::High));

    // Supplied complexity wins.
    let mut with_complexity = parsed("s1", "Feature", Some("v3"));
    with_complexity.complexity = Some(Complexity::Low);
    let outcome = reconcile(Some(vec![with_complexity]), &plan).expect("source present");
    assert_eq!(outcome.plan.steps[0].complexity, Some(Complexity::Low));
}

#[test]
fn test_rename_preserves_completion_state() {
    let original = completed_step("s1", "Feature", Some("Basic impl"));
    let original_hash = original.content_hash.clone();
    let plan = plan_with(vec![original]);

    let parsed_steps = vec![
        parsed("s2", "Feature", Some("Basic impl")),
        parsed("s1a", "New", Some("...")),
    ];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.result.renamed.len(), 1);
    assert_eq!(outcome.result.renamed[0].old_id, "s1");
    assert_eq!(outcome.result.renamed[0].new_id, "s2");
    assert_eq!(outcome.result.added, vec!["s1a"]);
    assert_eq!(outcome.result.removed_count(), 0);

    let renamed = outcome.plan.step("s2").expect("renamed step present");
    assert_eq!(renamed.status, StepStatus::Completed);
    assert_eq!(renamed.content_hash, original_hash);

    let added = outcome.plan.step("s1a").expect("added step present");
    assert_eq!(added.status, StepStatus::Pending);
}

#[test]
fn test_rename_ignores_whitespace_differences() {
    let plan = plan_with(vec![completed_step("s1", "Feature", Some("a\nb"))]);
    let parsed_steps = vec![parsed("s9", "  Feature ", Some("a\r\nb"))];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.result.renamed.len(), 1);
    assert_eq!(outcome.result.renamed[0].new_id, "s9");
}

#[test]
fn test_rename_carries_metadata() {
    let mut original = completed_step("s1", "Feature", Some("impl"));
    original
        .metadata
        .insert("ticket".to_string(), serde_json::json!("PROJ-42"));
    let plan = plan_with(vec![original]);

    let outcome = reconcile(Some(vec![parsed("s2", "Feature", Some("impl"))]), &plan)
        .expect("source present");

    let renamed = outcome.plan.step("s2").expect("renamed step present");
    assert_eq!(renamed.metadata["ticket"], serde_json::json!("PROJ-42"));
}

#[test]
fn test_pending_steps_are_not_rename_candidates() {
    // Same content under a new id, but the source was never completed:
    // no hash to vouch for it, so this is an add plus a removal.
    let plan = plan_with(vec![step("s1", "Feature", Some("impl"), StepStatus::Pending)]);
    let outcome = reconcile(Some(vec![parsed("s2", "Feature", Some("impl"))]), &plan)
        .expect("source present");

    assert!(outcome.result.renamed.is_empty());
    assert_eq!(outcome.result.added, vec!["s2"]);
    assert_eq!(outcome.result.removed, vec!["s1"]);
}

#[test]
fn test_identifier_match_preempts_hash_match() {
    // s1 keeps its id and content; s2 is completed with the same content.
    // s1 must be classified unchanged, never renamed from s2.
    let plan = plan_with(vec![
        step("s1", "Shared", Some("content"), StepStatus::Pending),
        completed_step("s2", "Shared", Some("content")),
    ]);
    let parsed_steps = vec![
        parsed("s1", "Shared", Some("content")),
        parsed("s2", "Shared", Some("content")),
    ];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert!(!outcome.result.changed);
    assert!(outcome.result.renamed.is_empty());
}

#[test]
fn test_no_double_rename_match() {
    // Two completed steps with identical content, both superseded by new
    // ids: exactly one rename (first in parse order), one addition, and
    // the unclaimed original becomes a removal.
    let plan = plan_with(vec![
        completed_step("s1", "Same", Some("content")),
        completed_step("s2", "Same", Some("content")),
    ]);
    let parsed_steps = vec![
        parsed("n1", "Same", Some("content")),
        parsed("n2", "Same", Some("content")),
    ];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.result.renamed.len(), 1);
    assert_eq!(outcome.result.renamed[0].new_id, "n1");
    assert_eq!(outcome.result.added, vec!["n2"]);
    assert_eq!(outcome.result.removed.len(), 1);
}

#[test]
fn test_removed_steps_are_reported() {
    let plan = plan_with(vec![
        step("s1", "Keep", None, StepStatus::Pending),
        step("s2", "Drop", None, StepStatus::Pending),
    ]);
    let parsed_steps = vec![parsed("s1", "Keep", None)];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.result.removed, vec!["s2"]);
    assert_eq!(outcome.plan.steps.len(), 1);
}

#[test]
fn test_reorder_refreshes_order_without_counting_as_change() {
    let plan = plan_with(vec![
        step("s1", "First", None, StepStatus::Pending),
        step("s2", "Second", None, StepStatus::Pending),
    ]);
    let parsed_steps = vec![parsed("s2", "Second", None), parsed("s1", "First", None)];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert!(!outcome.result.changed);
    assert_eq!(outcome.plan.plan_version, plan.plan_version);
    assert_eq!(outcome.plan.steps[0].id, "s2");
    assert_eq!(outcome.plan.steps[0].order_index, 0);
    assert_eq!(outcome.plan.steps[1].id, "s1");
    assert_eq!(outcome.plan.steps[1].order_index, 1);
}

#[test]
fn test_parent_links_refresh_from_parse() {
    let plan = plan_with(vec![
        step("s1", "Parent", None, StepStatus::Pending),
        step("s2", "Child", None, StepStatus::Pending),
    ]);
    let mut child = parsed("s2", "Child", None);
    child.parent_id = Some("s1".to_string());
    let parsed_steps = vec![parsed("s1", "Parent", None), child];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(
        outcome.plan.step("s2").expect("present").parent_id.as_deref(),
        Some("s1")
    );
    // Parentage alone is not a content change.
    assert!(!outcome.result.changed);
}

#[test]
fn test_duplicate_parsed_ids_are_reported_not_applied() {
    let plan = Plan::new();
    let parsed_steps = vec![
        parsed("s1", "First", None),
        parsed("s1", "Conflicting duplicate", None),
    ];

    let outcome = reconcile(Some(parsed_steps), &plan).expect("source present");

    assert_eq!(outcome.plan.steps.len(), 1);
    assert_eq!(outcome.plan.steps[0].title, "First");
    assert_eq!(outcome.result.errors.len(), 1);
    assert!(outcome.result.errors[0].contains("duplicate step id 's1'"));
}

#[test]
fn test_version_increments_by_exactly_one_per_changed_pass() {
    let mut plan = Plan::new();
    let parsed_steps = vec![parsed("s1", "First", None)];

    for expected_version in 1..=3u64 {
        let doc: Vec<ParsedStep> = parsed_steps
            .iter()
            .cloned()
            .map(|mut p| {
                p.title = format!("First v{expected_version}");
                p
            })
            .collect();
        let outcome = reconcile(Some(doc), &plan).expect("source present");
        assert!(outcome.result.changed);
        assert_eq!(outcome.plan.plan_version, expected_version);
        plan = outcome.plan;
    }

    // A no-op pass leaves the version alone.
    let doc = vec![parsed("s1", "First v3", None)];
    let outcome = reconcile(Some(doc), &plan).expect("source present");
    assert!(!outcome.result.changed);
    assert_eq!(outcome.plan.plan_version, 3);
}

#[test]
fn test_input_plan_is_not_mutated() {
    let plan = plan_with(vec![completed_step("s1", "Feature", Some("impl"))]);
    let before = plan.clone();

    let _ = reconcile(Some(vec![parsed("s2", "Feature", Some("impl"))]), &plan)
        .expect("source present");

    assert_eq!(plan, before);
}
