//! Retired message detection rule.
//!
//! `lupdate` keeps messages it no longer finds in the sources, marked
//! `type="obsolete"` (or `type="vanished"` in TS 2.1). They bloat the files
//! translators work on; `qtl clean` removes them.

use crate::{
    core::{CheckContext, TranslationFile},
    issues::ObsoleteIssue,
    rules::helpers::sort_by_message,
};

pub fn check_obsolete_issues(ctx: &CheckContext) -> Vec<ObsoleteIssue> {
    check_obsolete(&ctx.translations)
}

pub fn check_obsolete(files: &[TranslationFile]) -> Vec<ObsoleteIssue> {
    let mut issues = Vec::new();

    for file in files {
        for context in &file.contexts {
            for entry in context.messages.iter().filter(|e| e.state.is_retired()) {
                issues.push(ObsoleteIssue {
                    context: entry.context.clone(),
                    state: entry.state,
                    span: entry.span.clone(),
                    context_span: context.span.clone(),
                    context_len: context.messages.len(),
                });
            }
        }
    }

    sort_by_message(&mut issues, |i| &i.context);
    issues
}
