//! File parsers for translation files and source code.
//!
//! This module provides parsers for different file types:
//! - `ts`: Qt Linguist translation file parser (scans the translations directory)
//! - `cpp`: C++ source scanner for `tr()`-style calls
//! - `ui`: Qt Designer form scanner

pub mod cpp;
pub mod ts;
pub mod ui;

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub(crate) fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub(crate) fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
