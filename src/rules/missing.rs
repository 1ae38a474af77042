//! Missing message detection rule.
//!
//! Detects strings passed to `tr()` (or declared in a `.ui` form) that have
//! no live entry in one or more translation files. `lupdate` has not been
//! run since the string was added, so those locales show the source text.

use std::collections::HashSet;

use crate::{
    core::{CheckContext, MessageKey, TrCall, TranslationFile},
    issues::MissingMessageIssue,
};

pub fn check_missing_messages_issues(ctx: &CheckContext) -> Vec<MissingMessageIssue> {
    check_missing_messages(ctx.key_usages(), &ctx.translations)
}

/// One issue per call site, listing every locale that lacks the message.
///
/// Retired entries do not count: `lupdate` would revive them, but until
/// then Qt ignores them.
pub fn check_missing_messages(
    usages: &[TrCall],
    files: &[TranslationFile],
) -> Vec<MissingMessageIssue> {
    if files.is_empty() {
        return Vec::new();
    }

    let known: Vec<(&str, HashSet<MessageKey>)> = files
        .iter()
        .map(|f| (f.locale.as_str(), f.live_entries().map(|e| e.key()).collect()))
        .collect();

    let mut issues: Vec<MissingMessageIssue> = usages
        .iter()
        .filter_map(|call| {
            let mut missing_in: Vec<String> = known
                .iter()
                .filter(|(_, keys)| !keys.contains(&call.key))
                .map(|(locale, _)| locale.to_string())
                .collect();
            if missing_in.is_empty() {
                return None;
            }
            missing_in.sort();
            missing_in.dedup();
            Some(MissingMessageIssue {
                context: call.context.clone(),
                key: call.key.clone(),
                missing_in,
            })
        })
        .collect();

    issues.sort_by(|a, b| {
        a.context
            .location
            .cmp(&b.context.location)
            .then_with(|| a.key.cmp(&b.key))
    });

    issues
}
