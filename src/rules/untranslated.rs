//! Untranslated value detection rule.
//!
//! Detects finished translations whose text is identical to the source.
//! This often means the translator copied the source and forgot to
//! translate it.
//!
//! Texts without any alphabetic character (`%1`, `1.5`) and texts listed in
//! `ignoreTexts` are skipped, as are files whose target language equals
//! their source language.

use std::collections::HashSet;

use crate::{
    core::{CheckContext, TranslationFile, TranslationState},
    issues::UntranslatedIssue,
    rules::helpers::sort_by_message,
    utils::contains_alphabetic,
};

pub fn check_untranslated_issues(ctx: &CheckContext) -> Vec<UntranslatedIssue> {
    check_untranslated(&ctx.translations, &ctx.ignore_texts)
}

pub fn check_untranslated(
    files: &[TranslationFile],
    ignore_texts: &HashSet<String>,
) -> Vec<UntranslatedIssue> {
    let mut issues = Vec::new();

    for file in files {
        if file.source_language.as_deref() == Some(file.locale.as_str()) {
            continue;
        }

        for entry in file.live_entries() {
            if entry.state != TranslationState::Finished {
                continue;
            }
            let source = entry.source();
            if !contains_alphabetic(source) || ignore_texts.contains(source) {
                continue;
            }
            if entry.translations().iter().any(|t| *t == source) {
                issues.push(UntranslatedIssue {
                    context: entry.context.clone(),
                    locale: file.locale.clone(),
                });
            }
        }
    }

    sort_by_message(&mut issues, |i| &i.context);
    issues
}
