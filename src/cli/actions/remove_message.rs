//! RemoveMessage action.
//!
//! Removes retired messages from translation files.
//! Used by the `qtl clean` command.

use std::collections::BTreeMap;

use crate::issues::ObsoleteIssue;

use super::operation::Operation;
use super::traits::Action;

/// Action to remove `obsolete`/`vanished` messages from `.ts` files.
///
/// When every message of a context is removed, the whole `<context>` is
/// removed instead so no empty context is left behind.
pub struct RemoveMessage;

impl Action<ObsoleteIssue> for RemoveMessage {
    fn to_operations(issues: &[ObsoleteIssue]) -> Vec<Operation> {
        // Group by (file, context start) to spot fully retired contexts.
        let mut groups: BTreeMap<(&str, usize), Vec<&ObsoleteIssue>> = BTreeMap::new();
        for issue in issues {
            groups
                .entry((issue.context.file_path(), issue.context_span.start))
                .or_default()
                .push(issue);
        }

        let mut ops = Vec::new();
        for ((file_path, _), group) in groups {
            let first = group[0];
            if group.len() >= first.context_len {
                ops.push(Operation::RemoveContext {
                    file_path: file_path.to_string(),
                    name: first.context.context_name.clone(),
                    line: first.context.line(),
                    span: first.context_span.clone(),
                    messages: group.len(),
                });
            } else {
                ops.extend(group.into_iter().map(|issue| Operation::RemoveMessage {
                    context: issue.context.clone(),
                    span: issue.span.clone(),
                }));
            }
        }

        ops
    }
}
