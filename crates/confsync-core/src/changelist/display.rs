//! Changelist formatting for user review

use std::fmt::Write;

use super::types::{ChangeOp, Changelist};

/// Format a changelist for terminal display
#[must_use]
pub fn format_changelist(changelist: &Changelist) -> String {
    let mut output = String::new();

    writeln!(output, "=== Changelist ===").unwrap();
    writeln!(output, "Collections: {}", changelist.collections.len()).unwrap();
    writeln!(output, "Operations: {}", changelist.len()).unwrap();
    writeln!(output).unwrap();

    for op in &changelist.changes {
        match op {
            ChangeOp::Create { .. } => {
                writeln!(output, "CREATE: {}", op.label()).unwrap();
            }
            ChangeOp::Update { diff, .. } => {
                writeln!(output, "UPDATE: {}", op.label()).unwrap();
                for line in diff.lines() {
                    writeln!(output, "  {line}").unwrap();
                }
            }
            ChangeOp::Delete { .. } => {
                writeln!(output, "DELETE: {}", op.label()).unwrap();
            }
        }
        writeln!(output).unwrap();
    }

    output
}

/// Summary statistics for a changelist
#[derive(Debug, Default)]
pub struct ChangeSummary {
    /// Entries to create
    pub creates: usize,
    /// Entries to update
    pub updates: usize,
    /// Entries to delete
    pub deletes: usize,
}

impl ChangeSummary {
    /// Generate summary from a changelist
    #[must_use]
    pub fn from_changelist(changelist: &Changelist) -> Self {
        let mut summary = Self::default();

        for op in &changelist.changes {
            match op {
                ChangeOp::Create { .. } => summary.creates += 1,
                ChangeOp::Update { .. } => summary.updates += 1,
                ChangeOp::Delete { .. } => summary.deletes += 1,
            }
        }

        summary
    }

    /// Format as a one-line summary
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{} create(s), {} update(s), {} delete(s)",
            self.creates, self.updates, self.deletes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_changelist() -> Changelist {
        let mut changelist = Changelist::new(vec![String::new(), "staging".to_string()]);
        changelist.changes.push(ChangeOp::Create {
            collection: String::new(),
            name: "system.site".to_string(),
        });
        changelist.changes.push(ChangeOp::Update {
            collection: "staging".to_string(),
            name: "workflow.type".to_string(),
            diff: "-old\n+new\n".to_string(),
        });
        changelist.changes.push(ChangeOp::Delete {
            collection: String::new(),
            name: "stale.entry".to_string(),
        });
        changelist
    }

    #[test]
    fn test_format_lists_operations_with_labels() {
        let output = format_changelist(&sample_changelist());
        assert!(output.contains("CREATE: system.site"));
        assert!(output.contains("UPDATE: staging/workflow.type"));
        assert!(output.contains("  -old"));
        assert!(output.contains("DELETE: stale.entry"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = ChangeSummary::from_changelist(&sample_changelist());
        assert_eq!(summary.creates, 1);
        assert_eq!(summary.updates, 1);
        assert_eq!(summary.deletes, 1);
        assert_eq!(summary.one_line(), "1 create(s), 1 update(s), 1 delete(s)");
    }
}
