//! Issue types for translation file analysis results.
//!
//! This module defines all issue types that can be detected during analysis.
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users (CLI, MCP, etc.)
//! - Action: to fix the issue (remove retired messages)

use std::ops::Range;

use enum_dispatch::enum_dispatch;

use crate::core::{
    MessageContext, MessageKey, SourceContext, TranslationState,
    placeholders::{Placeholder, PlaceholderMismatchKind, format_placeholders},
};
use crate::utils::display_text;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    EmptySource,
    DuplicateMessage,
    PlaceholderMismatch,
    Unfinished,
    Untranslated,
    Obsolete,
    MissingMessage,
    UnusedMessage,
    StaleLocation,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::EmptySource => write!(f, "empty-source"),
            Rule::DuplicateMessage => write!(f, "duplicate-message"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
            Rule::Unfinished => write!(f, "unfinished"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::Obsolete => write!(f, "obsolete"),
            Rule::MissingMessage => write!(f, "missing-message"),
            Rule::UnusedMessage => write!(f, "unused-message"),
            Rule::StaleLocation => write!(f, "stale-location"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Translation Files (MessageContext)
// ============================================================

/// Message whose source text is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySourceIssue {
    pub context: MessageContext,
}

impl EmptySourceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EmptySource
    }
}

/// Second or later message with the same source and comment in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMessageIssue {
    pub context: MessageContext,
    /// Line of the first message with this key.
    pub first_line: usize,
}

impl DuplicateMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateMessage
    }
}

/// Translation whose `%1`/`%n` markers disagree with the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    pub context: MessageContext,
    pub kind: PlaceholderMismatchKind,
    pub expected: Vec<Placeholder>,
    pub actual: Vec<Placeholder>,
    /// Index of the offending plural form, for numerus messages.
    pub numerus_form: Option<usize>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

/// Message still waiting for a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinishedIssue {
    pub context: MessageContext,
    /// True if the translation text is empty, not just flagged unfinished.
    pub empty: bool,
}

impl UnfinishedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unfinished
    }
}

/// Finished translation identical to its source (possibly not translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub context: MessageContext,
    /// Locale of the translation file (e.g., "fr").
    pub locale: String,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

/// Message retired by `lupdate` (`obsolete` or `vanished`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsoleteIssue {
    pub context: MessageContext,
    pub state: TranslationState,
    /// Byte span of the `<message>` element.
    pub span: Range<usize>,
    /// Byte span of the enclosing `<context>` element.
    pub context_span: Range<usize>,
    /// Number of messages in the enclosing context.
    pub context_len: usize,
}

impl ObsoleteIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Obsolete
    }
}

/// Live message no scanned source uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedMessageIssue {
    pub context: MessageContext,
}

impl UnusedMessageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedMessage
    }
}

/// Why a `<location>` hint no longer matches the sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleLocationReason {
    FileNotFound,
    LineOutOfRange { line: usize, line_count: usize },
}

/// `<location>` hint pointing at a missing file or past its end.
///
/// The context's location is the `<location>` element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleLocationIssue {
    pub context: MessageContext,
    /// Filename as written in the translation file.
    pub filename: String,
    pub reason: StaleLocationReason,
}

impl StaleLocationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::StaleLocation
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// String translated in code but absent from one or more translation files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMessageIssue {
    pub context: SourceContext,
    pub key: MessageKey,
    /// Locales whose translation file lacks the message.
    pub missing_in: Vec<String>,
}

impl MissingMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingMessage
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// Kind of file that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    Translation,
    Source,
}

impl std::fmt::Display for ParseErrorFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorFileType::Translation => write!(f, "translation"),
            ParseErrorFileType::Source => write!(f, "source"),
        }
    }
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A translation issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    EmptySource(EmptySourceIssue),
    DuplicateMessage(DuplicateMessageIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    Unfinished(UnfinishedIssue),
    Untranslated(UntranslatedIssue),
    Obsolete(ObsoleteIssue),
    MissingMessage(MissingMessageIssue),
    UnusedMessage(UnusedMessageIssue),
    StaleLocation(StaleLocationIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::EmptySource(_) => EmptySourceIssue::severity(),
            Issue::DuplicateMessage(_) => DuplicateMessageIssue::severity(),
            Issue::PlaceholderMismatch(_) => PlaceholderMismatchIssue::severity(),
            Issue::Unfinished(_) => UnfinishedIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
            Issue::Obsolete(_) => ObsoleteIssue::severity(),
            Issue::MissingMessage(_) => MissingMessageIssue::severity(),
            Issue::UnusedMessage(_) => UnusedMessageIssue::severity(),
            Issue::StaleLocation(_) => StaleLocationIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::EmptySource(_) => EmptySourceIssue::rule(),
            Issue::DuplicateMessage(_) => DuplicateMessageIssue::rule(),
            Issue::PlaceholderMismatch(_) => PlaceholderMismatchIssue::rule(),
            Issue::Unfinished(_) => UnfinishedIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
            Issue::Obsolete(_) => ObsoleteIssue::rule(),
            Issue::MissingMessage(_) => MissingMessageIssue::rule(),
            Issue::UnusedMessage(_) => UnusedMessageIssue::rule(),
            Issue::StaleLocation(_) => StaleLocationIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// Translation file location (no source_line, but has source/translation).
    Message(&'a MessageContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// This trait is implemented by all issue types to provide a consistent
/// interface for the report functions. Uses `enum_dispatch` for zero-cost
/// dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (message key, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

/// `Context::source` label used as the primary message of translation file issues.
fn message_label(ctx: &MessageContext) -> String {
    ctx.key().to_string()
}

fn quoted_translation(ctx: &MessageContext) -> String {
    format!("(\"{}\")", display_text(&ctx.translation))
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for EmptySourceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("source text is empty".to_string())
    }
}

impl Report for DuplicateMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add a <comment> to disambiguate, or remove one of the messages")
    }

    fn details(&self) -> Option<String> {
        Some(format!("first defined at line {}", self.first_line))
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.kind {
            PlaceholderMismatchKind::Order => {
                Some("set \"allowPlaceholderReorder\": true in .qtlrc.json if the order change is intended")
            }
            PlaceholderMismatchKind::Count => None,
        }
    }

    fn details(&self) -> Option<String> {
        let form = self
            .numerus_form
            .map(|i| format!(" in plural form {}", i + 1))
            .unwrap_or_default();
        Some(format!(
            "{} mismatch{}: expected {}, found {}",
            self.kind,
            form,
            format_placeholders(&self.expected),
            format_placeholders(&self.actual)
        ))
    }
}

impl Report for UnfinishedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.empty {
            Some("no translation".to_string())
        } else {
            Some(format!(
                "{} marked unfinished",
                quoted_translation(&self.context)
            ))
        }
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} identical to source in {}",
            quoted_translation(&self.context),
            self.locale
        ))
    }
}

impl Report for ObsoleteIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("run `qtl clean --apply` to remove retired messages")
    }

    fn details(&self) -> Option<String> {
        Some(format!("marked {}", self.state))
    }
}

impl Report for UnusedMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(quoted_translation(&self.context))
    }
}

impl Report for StaleLocationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        message_label(&self.context)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("run lupdate to refresh source locations")
    }

    fn details(&self) -> Option<String> {
        Some(match &self.reason {
            StaleLocationReason::FileNotFound => format!("{} not found", self.filename),
            StaleLocationReason::LineOutOfRange { line, line_count } => format!(
                "{}:{} is past the end of the file ({} lines)",
                self.filename, line, line_count
            ),
        })
    }
}

impl Report for MissingMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("run lupdate to add new strings to the translation files")
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in: {}", self.missing_in.join(", ")))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} file skipped", self.file_type))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// Get line number for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    /// Get column number for sorting.
    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::Message(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
