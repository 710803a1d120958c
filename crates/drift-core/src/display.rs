//! Display implementations for domain models and results.
//!
//! Kept separate from the model definitions to maintain clean separation
//! between data structures and presentation logic. Output is
//! markdown-flavored for readable terminal display, following the status
//! icon conventions of the step model.

use std::fmt;

use crate::directives::DirectiveOutcome;
use crate::models::{
    Complexity, Plan, SnapshotComparison, Step, StepStatus, SyncResult,
};

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.title, self.status.with_icon())?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if let Some(parent) = &self.parent_id {
            writeln!(f, "- Parent: {parent}")?;
        }
        if let Some(complexity) = &self.complexity {
            writeln!(f, "- Complexity: {complexity}")?;
        }
        if let Some(hash) = &self.content_hash {
            writeln!(f, "- Content hash: {hash}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan (v{})", self.plan_version)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Approved: {}", if self.is_approved { "yes" } else { "no" })?;
        writeln!(f, "- Reviews: {}", self.review_count)?;
        writeln!(f, "- Created: {}", self.created_at)?;
        writeln!(f, "- Updated: {}", self.updated_at)?;

        if !self.steps.is_empty() {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
                writeln!(f)?;
            }
        } else {
            writeln!(f, "\nNo steps in this plan.")?;
        }

        Ok(())
    }
}

fn write_id_line(f: &mut fmt::Formatter<'_>, label: &str, ids: &[String]) -> fmt::Result {
    if ids.is_empty() {
        writeln!(f, "- {label} (0)")
    } else {
        writeln!(f, "- {label} ({}): {}", ids.len(), ids.join(", "))
    }
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Plan Sync")?;
        writeln!(f)?;

        if !self.changed {
            writeln!(f, "No changes detected.")?;
        } else {
            write_id_line(f, "Added", &self.added)?;
            write_id_line(f, "Updated", &self.updated)?;
            write_id_line(f, "Removed", &self.removed)?;
            if self.renamed.is_empty() {
                writeln!(f, "- Renamed (0)")?;
            } else {
                let pairs: Vec<String> = self
                    .renamed
                    .iter()
                    .map(|r| format!("{} -> {}", r.old_id, r.new_id))
                    .collect();
                writeln!(f, "- Renamed ({}): {}", self.renamed.len(), pairs.join(", "))?;
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "\n### Errors")?;
            writeln!(f)?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for SnapshotComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Snapshot Comparison")?;
        writeln!(f)?;
        writeln!(f, "- Before: {}", self.before_hash)?;
        writeln!(f, "- After: {}", self.after_hash)?;
        writeln!(
            f,
            "- Changed: {}",
            if self.changed { "yes" } else { "no" }
        )?;
        Ok(())
    }
}

impl fmt::Display for DirectiveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Modification Directives")?;
        writeln!(f)?;
        write_id_line(f, "Modified", &self.modifications.modified_ids)?;
        write_id_line(f, "Added", &self.modifications.added_ids)?;
        write_id_line(f, "Removed", &self.modifications.removed_ids)?;
        write_id_line(f, "Cascade removed", &self.cascade_deleted_ids)?;
        write_id_line(f, "All removed", &self.all_removed_ids)?;
        writeln!(f, "- Valid: {}", if self.is_valid { "yes" } else { "no" })?;

        if !self.errors.is_empty() {
            writeln!(f, "\n### Errors")?;
            writeln!(f)?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }

        Ok(())
    }
}
