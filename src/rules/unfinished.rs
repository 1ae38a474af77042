//! Unfinished translation detection rule.
//!
//! Reports live messages that are flagged `type="unfinished"` or have no
//! translated text at all. Qt falls back to the source text for both.

use crate::{
    core::{CheckContext, TranslationFile, TranslationState},
    issues::UnfinishedIssue,
    rules::helpers::sort_by_message,
};

pub fn check_unfinished_issues(ctx: &CheckContext) -> Vec<UnfinishedIssue> {
    check_unfinished(&ctx.translations)
}

pub fn check_unfinished(files: &[TranslationFile]) -> Vec<UnfinishedIssue> {
    let mut issues: Vec<UnfinishedIssue> = files
        .iter()
        .flat_map(|file| file.live_entries())
        .filter(|entry| {
            entry.state == TranslationState::Unfinished || entry.is_empty_translation()
        })
        .map(|entry| UnfinishedIssue {
            context: entry.context.clone(),
            empty: entry.is_empty_translation(),
        })
        .collect();

    sort_by_message(&mut issues, |i| &i.context);
    issues
}
