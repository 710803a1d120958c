//! Cascade deletion over parent/child links.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::Step;

/// Computes the transitive descendants of the given root steps.
///
/// The result excludes the roots themselves and covers arbitrary depth.
/// The parent/child graph is assumed acyclic but not enforced anywhere
/// upstream (the editor is free text under no schema), so traversal is a
/// visited-set-guarded BFS over an adjacency map built once per call; a
/// cycle is silently tolerated rather than looping.
pub fn cascade_descendants(roots: &HashSet<String>, steps: &[Step]) -> HashSet<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for step in steps {
        if let Some(parent) = step.parent_id.as_deref() {
            children.entry(parent).or_default().push(step.id.as_str());
        }
    }

    let mut visited: HashSet<&str> = roots.iter().map(String::as_str).collect();
    let mut queue: VecDeque<&str> = visited.iter().copied().collect();
    let mut descendants: HashSet<String> = HashSet::new();

    while let Some(id) = queue.pop_front() {
        if let Some(kids) = children.get(id) {
            for &kid in kids {
                if visited.insert(kid) {
                    descendants.insert(kid.to_string());
                    queue.push_back(kid);
                }
            }
        }
    }

    descendants
}
