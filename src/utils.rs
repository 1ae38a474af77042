//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use qtl::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Lens"));
/// assert!(contains_alphabetic("Échelle"));
/// assert!(contains_alphabetic("R²"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("%1 %"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Render a message string on a single line for reports.
///
/// Line breaks and tabs are shown as escape sequences so multi-line
/// sources like `"Waist\nPosition"` stay on one report line.
pub fn display_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
