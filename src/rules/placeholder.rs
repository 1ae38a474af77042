//! Placeholder mismatch detection rule.
//!
//! Compares the `%1`..`%99` and `%n` markers of each source string with its
//! translation. A marker dropped or invented by the translator makes
//! `QString::arg()` substitute into the wrong slot at runtime.

use crate::{
    core::{CheckContext, TranslationFile, placeholders::compare_placeholders},
    issues::PlaceholderMismatchIssue,
    rules::helpers::sort_by_message,
};

pub fn check_placeholder_issues(ctx: &CheckContext) -> Vec<PlaceholderMismatchIssue> {
    check_placeholders(&ctx.translations, ctx.config.allow_placeholder_reorder)
}

/// Check every live, non-empty translation against its source.
///
/// Numerus messages are checked form by form; the reported issue names the
/// first offending form.
pub fn check_placeholders(
    files: &[TranslationFile],
    allow_reorder: bool,
) -> Vec<PlaceholderMismatchIssue> {
    let mut issues = Vec::new();

    for entry in files.iter().flat_map(|f| f.live_entries()) {
        if entry.is_empty_translation() {
            continue;
        }

        let mismatch = entry
            .translations()
            .into_iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .find_map(|(i, text)| {
                compare_placeholders(entry.source(), text, allow_reorder, entry.numerus)
                    .map(|m| (i, m))
            });

        if let Some((form, mismatch)) = mismatch {
            issues.push(PlaceholderMismatchIssue {
                context: entry.context.clone(),
                kind: mismatch.kind,
                expected: mismatch.expected,
                actual: mismatch.actual,
                numerus_form: entry.numerus.then_some(form),
            });
        }
    }

    sort_by_message(&mut issues, |i| &i.context);
    issues
}
