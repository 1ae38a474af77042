//! Duplicate message detection rule.
//!
//! Two messages with the same context, source and disambiguation comment
//! inside one translation file are ambiguous: Qt picks whichever it loads
//! last. Every occurrence after the first is reported.

use std::collections::HashMap;

use crate::{
    core::{CheckContext, MessageKey, TranslationFile},
    issues::DuplicateMessageIssue,
    rules::helpers::sort_by_message,
};

pub fn check_duplicate_messages_issues(ctx: &CheckContext) -> Vec<DuplicateMessageIssue> {
    check_duplicate_messages(&ctx.translations)
}

pub fn check_duplicate_messages(files: &[TranslationFile]) -> Vec<DuplicateMessageIssue> {
    let mut issues = Vec::new();

    for file in files {
        // Keys are file-wide so a context split across two blocks still counts.
        let mut first_seen: HashMap<MessageKey, usize> = HashMap::new();
        for entry in file.entries() {
            let line = entry.context.line();
            match first_seen.get(&entry.key()) {
                Some(&first_line) => issues.push(DuplicateMessageIssue {
                    context: entry.context.clone(),
                    first_line,
                }),
                None => {
                    first_seen.insert(entry.key(), line);
                }
            }
        }
    }

    sort_by_message(&mut issues, |i| &i.context);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::helpers::fixtures::ts_file;

    const CONTEXTS: &str = r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Lock</source>
        <translation>Verrouiller</translation>
    </message>
    <message>
        <source>Lock</source>
        <comment>menu</comment>
        <translation>Bloquer</translation>
    </message>
    <message>
        <source>Lock</source>
        <translation>Fixer</translation>
    </message>
</context>
<context>
    <name>OpticsView</name>
    <message>
        <source>Lock</source>
        <translation>Verrouiller</translation>
    </message>
</context>
"#;

    #[test]
    fn test_duplicates_in_same_context() {
        let file = ts_file("po/GaussianBeam_fr.ts", "fr", CONTEXTS);
        let first_line = file.entries().next().unwrap().context.line();

        let issues = check_duplicate_messages(&[file]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].context.translation, "Fixer");
        assert_eq!(issues[0].first_line, first_line);
    }

    #[test]
    fn test_same_key_in_other_file_is_not_duplicate() {
        let fr = ts_file("po/GaussianBeam_fr.ts", "fr", CONTEXTS);
        let de = ts_file("po/GaussianBeam_de.ts", "de", CONTEXTS);

        let issues = check_duplicate_messages(&[de, fr]);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].context.file_path(), "po/GaussianBeam_de.ts");
        assert_eq!(issues[1].context.file_path(), "po/GaussianBeam_fr.ts");
    }

    #[test]
    fn test_split_context_blocks() {
        let file = ts_file(
            "po/GaussianBeam_fr.ts",
            "fr",
            r#"<context>
    <name>Lens</name>
    <message>
        <source>Focal</source>
        <translation>Focale</translation>
    </message>
</context>
<context>
    <name>Lens</name>
    <message>
        <source>Focal</source>
        <translation>Distance focale</translation>
    </message>
</context>
"#,
        );

        let issues = check_duplicate_messages(&[file]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].context.translation, "Distance focale");
    }
}
