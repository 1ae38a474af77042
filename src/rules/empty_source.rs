//! Empty source detection rule.
//!
//! A message with no source text can never be looked up by `tr()`, so it is
//! dead weight in every locale.

use crate::{
    core::{CheckContext, TranslationFile},
    issues::EmptySourceIssue,
    rules::helpers::sort_by_message,
};

pub fn check_empty_source_issues(ctx: &CheckContext) -> Vec<EmptySourceIssue> {
    check_empty_source(&ctx.translations)
}

/// Find messages whose source is empty or whitespace-only.
pub fn check_empty_source(files: &[TranslationFile]) -> Vec<EmptySourceIssue> {
    let mut issues: Vec<EmptySourceIssue> = files
        .iter()
        .flat_map(|file| file.entries())
        .filter(|entry| entry.source().trim().is_empty())
        .map(|entry| EmptySourceIssue {
            context: entry.context.clone(),
        })
        .collect();

    sort_by_message(&mut issues, |i| &i.context);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::helpers::fixtures::ts_file;

    #[test]
    fn test_empty_and_blank_sources() {
        let file = ts_file(
            "po/GaussianBeam_fr.ts",
            "fr",
            r#"<context>
    <name>Lens</name>
    <message>
        <source></source>
        <translation>Rien</translation>
    </message>
    <message>
        <source>   </source>
        <translation>Espace</translation>
    </message>
    <message>
        <source>Focal</source>
        <translation>Focale</translation>
    </message>
</context>
"#,
        );

        let issues = check_empty_source(&[file]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].context.translation, "Rien");
        assert_eq!(issues[1].context.translation, "Espace");
    }

    #[test]
    fn test_no_files() {
        assert!(check_empty_source(&[]).is_empty());
    }
}
