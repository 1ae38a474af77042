//! Qt argument markers inside message strings.
//!
//! `QString::arg()` substitutes `%1` through `%99` (and the locale-aware
//! `%L1` forms); plural messages use `%n`. A doubled `%%` is a literal
//! percent sign.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// `%1`..`%99` or `%L1`..`%L99`.
    Arg(u8),
    /// `%n` or `%Ln`.
    Count,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Arg(n) => write!(f, "%{}", n),
            Placeholder::Count => write!(f, "%n"),
        }
    }
}

/// Extract placeholder markers in order of appearance.
pub fn extract_placeholders(text: &str) -> Vec<Placeholder> {
    let bytes = text.as_bytes();
    let mut result = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'%') {
            i += 2;
            continue;
        }

        let mut j = i + 1;
        if bytes.get(j) == Some(&b'L') {
            j += 1;
        }

        match bytes.get(j) {
            Some(b'n') => {
                result.push(Placeholder::Count);
                i = j + 1;
            }
            Some(b) if b.is_ascii_digit() => {
                let start = j;
                while j < bytes.len() && j - start < 2 && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                // Safe: the slice holds one or two ASCII digits.
                let value: u8 = text[start..j].parse().unwrap_or(0);
                if value > 0 {
                    result.push(Placeholder::Arg(value));
                }
                i = j;
            }
            _ => i += 1,
        }
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderMismatchKind {
    /// Markers are missing or extra.
    Count,
    /// Same markers, different relative order.
    Order,
}

impl fmt::Display for PlaceholderMismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderMismatchKind::Count => write!(f, "count"),
            PlaceholderMismatchKind::Order => write!(f, "order"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    pub kind: PlaceholderMismatchKind,
    pub expected: Vec<Placeholder>,
    pub actual: Vec<Placeholder>,
}

/// Compare the markers of a source string and one of its translations.
///
/// In numerus mode `%n` is ignored: singular forms routinely spell the
/// count out ("une lentille") instead of repeating `%n`.
pub fn compare_placeholders(
    source: &str,
    translation: &str,
    allow_reorder: bool,
    numerus: bool,
) -> Option<PlaceholderMismatch> {
    let keep = |p: &Placeholder| !(numerus && *p == Placeholder::Count);
    let expected: Vec<Placeholder> = extract_placeholders(source)
        .into_iter()
        .filter(keep)
        .collect();
    let actual: Vec<Placeholder> = extract_placeholders(translation)
        .into_iter()
        .filter(keep)
        .collect();

    let mut expected_sorted = expected.clone();
    let mut actual_sorted = actual.clone();
    expected_sorted.sort();
    actual_sorted.sort();

    let kind = if expected_sorted != actual_sorted {
        PlaceholderMismatchKind::Count
    } else if !allow_reorder && expected != actual {
        PlaceholderMismatchKind::Order
    } else {
        return None;
    };

    Some(PlaceholderMismatch {
        kind,
        expected,
        actual,
    })
}

/// Format a marker list as `%1, %2`, or `none`.
pub fn format_placeholders(placeholders: &[Placeholder]) -> String {
    if placeholders.is_empty() {
        return "none".to_string();
    }
    placeholders
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
