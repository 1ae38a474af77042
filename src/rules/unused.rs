//! Unused message detection rule.
//!
//! Detects live messages that no scanned source file translates. Usually a
//! string was removed or reworded in code and `lupdate` has not been run yet.

use std::collections::HashSet;

use crate::{
    core::{CheckContext, MessageKey, TranslationFile},
    issues::UnusedMessageIssue,
    rules::helpers::sort_by_message,
};

pub fn check_unused_messages_issues(ctx: &CheckContext) -> Vec<UnusedMessageIssue> {
    // Without any source file every message would look unused.
    if ctx.files.is_empty() {
        tracing::debug!("no source files scanned, skipping unused-message");
        return Vec::new();
    }
    check_unused_messages(ctx.used_keys(), &ctx.translations)
}

/// Check for translation entries that are not used in any source code.
///
/// # Arguments
/// * `used_keys` - Set of all message keys found in source code
/// * `files` - Parsed translation files
pub fn check_unused_messages(
    used_keys: &HashSet<MessageKey>,
    files: &[TranslationFile],
) -> Vec<UnusedMessageIssue> {
    let mut issues: Vec<UnusedMessageIssue> = files
        .iter()
        .flat_map(|file| file.live_entries())
        .filter(|entry| !used_keys.contains(&entry.key()))
        .map(|entry| UnusedMessageIssue {
            context: entry.context.clone(),
        })
        .collect();

    sort_by_message(&mut issues, |i| &i.context);
    issues
}
