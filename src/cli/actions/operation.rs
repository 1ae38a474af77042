//! Low-level edits on translation files.

use std::{fs, ops::Range};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::MessageContext;

/// A single edit produced by an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Remove one `<message>` element.
    RemoveMessage {
        context: MessageContext,
        span: Range<usize>,
    },
    /// Remove a whole `<context>` element.
    RemoveContext {
        file_path: String,
        name: String,
        line: usize,
        span: Range<usize>,
        /// Number of messages removed with it.
        messages: usize,
    },
}

impl Operation {
    pub fn file_path(&self) -> &str {
        match self {
            Operation::RemoveMessage { context, .. } => context.file_path(),
            Operation::RemoveContext { file_path, .. } => file_path,
        }
    }

    pub fn span(&self) -> &Range<usize> {
        match self {
            Operation::RemoveMessage { span, .. } | Operation::RemoveContext { span, .. } => span,
        }
    }

    /// Number of messages this operation removes.
    pub fn message_count(&self) -> usize {
        match self {
            Operation::RemoveMessage { .. } => 1,
            Operation::RemoveContext { messages, .. } => *messages,
        }
    }

    /// Print what the operation would do.
    pub fn preview(&self) {
        match self {
            Operation::RemoveMessage { context, .. } => {
                println!(
                    "  {} {}:{}  {}",
                    "-".red(),
                    context.file_path(),
                    context.line(),
                    context.key().to_string().dimmed()
                );
            }
            Operation::RemoveContext {
                file_path,
                name,
                line,
                messages,
                ..
            } => {
                println!(
                    "  {} {}:{}  {} {}",
                    "-".red(),
                    file_path,
                    line,
                    format!("context {}", name).dimmed(),
                    format!("({} message(s))", messages).dimmed()
                );
            }
        }
    }

    /// Apply removals that all target the same file.
    ///
    /// Spans are widened to whole lines when the element sits alone on its
    /// lines, then cut back to front so earlier offsets stay valid.
    /// Returns the number of spans removed.
    pub fn apply_removals(file_path: &str, ops: &[Operation]) -> Result<usize> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path))?;

        let mut ranges: Vec<Range<usize>> = ops
            .iter()
            .map(|op| widen_to_lines(&content, op.span()))
            .collect();
        ranges.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

        // Spans nested in an earlier one go away with it.
        let mut kept: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match kept.last() {
                Some(last) if range.start < last.end => {
                    tracing::debug!("skipping nested span {:?} in {}", range, file_path);
                }
                _ => kept.push(range),
            }
        }

        let mut result = content;
        for range in kept.iter().rev() {
            result.replace_range(range.clone(), "");
        }

        fs::write(file_path, result)
            .with_context(|| format!("Failed to write file: {}", file_path))?;

        Ok(kept.len())
    }
}

/// Extend `span` over leading indentation and the trailing newline when
/// nothing else shares those lines.
fn widen_to_lines(content: &str, span: &Range<usize>) -> Range<usize> {
    let bytes = content.as_bytes();
    let mut start = span.start;
    let mut end = span.end.min(bytes.len());

    let line_start = content[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let only_indent_before = content[line_start..start]
        .bytes()
        .all(|b| b == b' ' || b == b'\t');

    let line_end = content[end..]
        .find('\n')
        .map(|i| end + i + 1)
        .unwrap_or(bytes.len());
    let only_space_after = content[end..line_end].trim().is_empty();

    if only_indent_before && only_space_after {
        start = line_start;
        end = line_end;
    }

    start..end
}
