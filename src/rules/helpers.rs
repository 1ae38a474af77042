//! Helper functions shared by rule implementations.

use crate::core::MessageContext;

/// Sort translation file issues by file path, then line, then message label.
pub fn sort_by_message<T>(issues: &mut [T], context: impl Fn(&T) -> &MessageContext) {
    issues.sort_by(|a, b| {
        let (a, b) = (context(a), context(b));
        a.location
            .file_path
            .cmp(&b.location.file_path)
            .then_with(|| a.location.line.cmp(&b.location.line))
            .then_with(|| a.key().cmp(&b.key()))
    });
}
