//! Action trait definition.
//!
//! Actions convert Issues into Operations. Each Action can be implemented
//! for multiple Issue types, providing type-safe handling.

use std::collections::BTreeMap;

use anyhow::Result;

use super::operation::Operation;

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of operations processed.
    pub processed: usize,
    /// Number of operations skipped (e.g., nested in another removal).
    pub skipped: usize,
    /// Number of changes actually applied to files.
    pub changes_applied: usize,
    /// Number of messages removed, counting those inside removed contexts.
    pub messages_removed: usize,
    /// Number of contexts removed.
    pub contexts_removed: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.messages_removed += other.messages_removed;
        self.contexts_removed += other.contexts_removed;
        self.files_modified += other.files_modified;
    }
}

/// Action trait - converts Issues into Operations and executes them.
///
/// Each Action struct can implement this trait for multiple Issue types,
/// providing type-safe handling of different issues.
///
/// # Example
///
/// ```ignore
/// // In command code:
/// if apply {
///     RemoveMessage::run(&issues)?;
/// } else {
///     RemoveMessage::preview(&issues);
/// }
/// ```
pub trait Action<I> {
    /// Convert issues to low-level operations.
    ///
    /// This is the only method that must be implemented.
    fn to_operations(issues: &[I]) -> Vec<Operation>;

    /// Execute the action (modify files).
    ///
    /// Default implementation calls `to_operations` and executes each operation.
    fn run(issues: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(issues);
        execute_operations(&ops)
    }

    /// Preview the action (dry-run mode).
    ///
    /// Default implementation calls `to_operations` and previews each operation.
    fn preview(issues: &[I]) {
        let ops = Self::to_operations(issues);
        for op in &ops {
            op.preview();
        }
    }
}

pub(crate) fn execute_operations(ops: &[Operation]) -> Result<ActionStats> {
    let mut by_file: BTreeMap<&str, Vec<Operation>> = BTreeMap::new();
    for op in ops {
        by_file.entry(op.file_path()).or_default().push(op.clone());
    }

    let mut stats = ActionStats {
        processed: ops.len(),
        ..Default::default()
    };

    for (file_path, file_ops) in by_file {
        let applied = Operation::apply_removals(file_path, &file_ops)?;
        stats.skipped += file_ops.len() - applied;
        stats.changes_applied += applied;
        if applied > 0 {
            stats.files_modified += 1;
        }
        tracing::debug!("{}: {} removal(s) applied", file_path, applied);
    }

    for op in ops {
        stats.messages_removed += op.message_count();
        if matches!(op, Operation::RemoveContext { .. }) {
            stats.contexts_removed += 1;
        }
    }

    Ok(stats)
}
