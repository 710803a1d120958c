//! Content fingerprinting for steps and whole plans.
//!
//! Hashes are SHA-256 digests truncated to 16 hex characters. That is
//! plenty for change detection (this is not a security boundary) and keeps
//! the values short enough to persist and log comfortably. Outputs are
//! stable across calls and process restarts.

use sha2::{Digest, Sha256};

use crate::canon::normalize;
use crate::models::Step;

/// Truncated hash length in hex characters.
const HASH_LEN: usize = 16;

/// Joins the title and description fields before hashing. U+001F (unit
/// separator) cannot occur naturally at a field boundary, so
/// `("A|", "B")` and `("A", "|B")` hash differently.
const FIELD_SEPARATOR: char = '\u{1f}';

fn digest_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)[..HASH_LEN].to_string()
}

/// Computes the content fingerprint of a (title, description) pair.
///
/// Both fields are canonicalized first, so whitespace-only and
/// line-ending-only differences never change the hash. An absent
/// description hashes the same as an empty one.
pub fn step_hash(title: &str, description: Option<&str>) -> String {
    let title = normalize(title);
    let description = normalize(description.unwrap_or(""));
    digest_hex(&format!("{title}{FIELD_SEPARATOR}{description}"))
}

/// Computes an order-independent fingerprint of a whole step sequence.
///
/// Per-step content fingerprints are sorted before being combined, so any
/// permutation of the same steps yields the same plan hash while any edit
/// to a step's title or description changes it.
pub fn plan_hash(steps: &[Step]) -> String {
    let mut fingerprints: Vec<String> = steps
        .iter()
        .map(|step| step_hash(&step.title, step.description.as_deref()))
        .collect();
    fingerprints.sort_unstable();
    digest_hex(&fingerprints.join("\n"))
}

/// Checks whether a step's content still matches its stored fingerprint.
///
/// Returns false when no fingerprint is stored; a hash is only
/// trustworthy while the step remains completed.
pub fn is_unchanged(step: &Step) -> bool {
    match step.content_hash.as_deref() {
        Some(stored) => stored == step_hash(&step.title, step.description.as_deref()),
        None => false,
    }
}

/// Stamps a step with the fingerprint of its current content.
///
/// Called exactly once per completion event, by whichever collaborator
/// marks the step completed.
pub fn set_content_hash(step: &mut Step) {
    step.content_hash = Some(step_hash(&step.title, step.description.as_deref()));
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::{is_unchanged, plan_hash, set_content_hash, step_hash, HASH_LEN};
    use crate::models::{Step, StepStatus};

    fn step(id: &str, title: &str, description: Option<&str>) -> Step {
        Step {
            id: id.to_string(),
            parent_id: None,
            order_index: 0,
            title: title.to_string(),
            description: description.map(String::from),
            status: StepStatus::Pending,
            content_hash: None,
            complexity: None,
            metadata: Map::new(),
        }
    }

    #[test]
    fn step_hash_is_deterministic() {
        assert_eq!(
            step_hash("Feature", Some("Basic impl")),
            step_hash("Feature", Some("Basic impl"))
        );
    }

    #[test]
    fn step_hash_is_fixed_length_hex() {
        let hash = step_hash("Feature", Some("Basic impl"));
        assert_eq!(hash.len(), HASH_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn step_hash_ignores_whitespace_and_line_endings() {
        assert_eq!(step_hash("T", Some("a\nb")), step_hash("T", Some("a\r\nb")));
        assert_eq!(step_hash("T", Some("a\nb")), step_hash("T", Some("a\r b")));
        assert_eq!(step_hash("  T  ", Some("  D  ")), step_hash("T", Some("D")));
    }

    #[test]
    fn step_hash_absent_description_equals_empty() {
        assert_eq!(step_hash("T", None), step_hash("T", Some("")));
    }

    #[test]
    fn step_hash_field_boundary_does_not_collide() {
        assert_ne!(step_hash("A|", Some("B")), step_hash("A", Some("|B")));
    }

    #[test]
    fn step_hash_sensitive_to_content() {
        assert_ne!(step_hash("T", Some("a")), step_hash("T", Some("b")));
        assert_ne!(step_hash("T1", Some("a")), step_hash("T2", Some("a")));
    }

    #[test]
    fn plan_hash_is_order_independent() {
        let a = step("s1", "First", Some("one"));
        let b = step("s2", "Second", Some("two"));
        let c = step("s3", "Third", None);

        let forward = plan_hash(&[a.clone(), b.clone(), c.clone()]);
        let shuffled = plan_hash(&[c, a, b]);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn plan_hash_is_content_sensitive() {
        let original = vec![step("s1", "First", Some("one"))];
        let edited = vec![step("s1", "First", Some("one, revised"))];
        assert_ne!(plan_hash(&original), plan_hash(&edited));
    }

    #[test]
    fn plan_hash_of_empty_plan_is_stable() {
        assert_eq!(plan_hash(&[]), plan_hash(&[]));
    }

    #[test]
    fn is_unchanged_requires_stored_hash() {
        let step = step("s1", "T", Some("D"));
        assert!(!is_unchanged(&step));
    }

    #[test]
    fn is_unchanged_detects_edits() {
        let mut step = step("s1", "T", Some("D"));
        set_content_hash(&mut step);
        assert!(is_unchanged(&step));

        step.description = Some("Edited".to_string());
        assert!(!is_unchanged(&step));
    }
}
