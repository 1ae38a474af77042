//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow qtl to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    actions::{Action, RemoveMessage},
    commands::{CleanSummary, CommandResult, CommandSummary, InitSummary, StatsSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::stats::FileStats;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// This is the main entry point for reporting. Issues are sorted and
/// displayed with severity, location, source context, and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, translation_files: usize) {
    print_success_to(source_files, translation_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
///
/// The source file count is left out when no source was checked.
pub fn print_success_to<W: Write>(source_files: usize, translation_files: usize, writer: &mut W) {
    let translations = format!(
        "{} translation {}",
        translation_files,
        if translation_files == 1 { "file" } else { "files" }
    );
    let checked = if source_files == 0 {
        translations
    } else {
        format!(
            "{} source {}, {}",
            source_files,
            if source_files == 1 { "file" } else { "files" },
            translations
        )
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Checked {} - no issues found", checked).green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Print the per-file progress table.
pub fn print_stats_to<W: Write>(files: &[FileStats], writer: &mut W) {
    if files.is_empty() {
        return;
    }

    let locale_width = files
        .iter()
        .map(|f| UnicodeWidthStr::width(f.locale.as_str()))
        .max()
        .unwrap_or(0)
        .max("Locale".len());

    let _ = writeln!(
        writer,
        "{}",
        format!(
            "{:<locale_width$}  {:>7}  {:>8}  {:>10}  {:>8}  {:>6}  File",
            "Locale",
            "Total",
            "Finished",
            "Unfinished",
            "Obsolete",
            "Done",
            locale_width = locale_width
        )
        .bold()
    );

    for file in files {
        let completion = format!("{:>6}", format!("{:.1}%", file.completion()));
        let completion = if file.unfinished == 0 {
            completion.green()
        } else {
            completion.yellow()
        };
        let _ = writeln!(
            writer,
            "{:<locale_width$}  {:>7}  {:>8}  {:>10}  {:>8}  {}  {}",
            file.locale,
            file.total,
            file.finished,
            file.unfinished,
            file.obsolete,
            completion,
            file.file_path,
            locale_width = locale_width
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col(), None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| {
            let loc = i.location();
            match loc {
                ReportLocation::Source(ctx) => Some(ctx.line()),
                ReportLocation::Message(ctx) => Some(ctx.line()),
                ReportLocation::File { .. } => None,
            }
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_command_output(result);

    let nothing_found = match &result.summary {
        CommandSummary::Check => result.issues.is_empty(),
        CommandSummary::Clean(summary) => summary.issues.is_empty() && result.issues.is_empty(),
        CommandSummary::Stats(_) | CommandSummary::Init(_) => false,
    };
    if nothing_found {
        print_success(
            result.source_files_checked,
            result.translation_files_checked,
        );
    }

    print_parse_warning(result.parse_error_count, verbose);
}

fn print_command_output(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
        }
        CommandSummary::Clean(summary) => {
            report(&result.issues);
            print_clean(summary);
        }
        CommandSummary::Stats(summary) => {
            report(&result.issues);
            print_stats(summary);
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }
}

fn print_stats(summary: &StatsSummary) {
    print_stats_to(&summary.files, &mut io::stdout().lock());
}

fn print_clean(summary: &CleanSummary) {
    if !summary.is_apply && !summary.issues.is_empty() {
        RemoveMessage::preview(&summary.issues);
        println!();
    }

    let total = summary.obsolete_count + summary.vanished_count;
    if total > 0 {
        if summary.is_apply {
            println!(
                "{} {} message(s) in {} file(s).",
                "Removed".green().bold(),
                summary.removed_count,
                summary.file_count
            );
            if summary.removed_context_count > 0 {
                println!(
                    "  - {} context(s) left empty were removed too",
                    summary.removed_context_count
                );
            }
        } else {
            println!(
                "{} {} message(s) in {} file(s):",
                "Would remove".yellow().bold(),
                total,
                summary.file_count
            );
            if summary.obsolete_count > 0 {
                println!("  - obsolete: {} message(s)", summary.obsolete_count);
            }
            if summary.vanished_count > 0 {
                println!("  - vanished: {} message(s)", summary.vanished_count);
            }
            println!("Run with {} to remove these messages.", "--apply".cyan());
        }
    }
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
        Some(error) => eprintln!("{} {}", "Error:".red().bold(), error),
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placeholders::{Placeholder, PlaceholderMismatchKind};
    use crate::core::{MessageContext, MessageLocation, SourceContext, SourceLocation};
    use crate::core::{MessageKey, TranslationState};
    use crate::issues::{
        MissingMessageIssue, ObsoleteIssue, ParseErrorFileType, ParseErrorIssue,
        PlaceholderMismatchIssue, UnfinishedIssue, UntranslatedIssue,
    };

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip until 'm'
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(issues: &[Issue]) -> String {
        let mut output = Vec::new();
        report_to(issues, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn msg_ctx(line: usize, source: &str, translation: &str) -> MessageContext {
        MessageContext::new(
            MessageLocation::with_line("./po/GaussianBeam_fr.ts", line),
            "GaussianBeamWidget",
            source,
            translation,
        )
    }

    fn missing(line: usize, col: usize, source_line: &str, source: &str) -> Issue {
        let loc = SourceLocation::new("./gui/OpticsView.cpp", line, col);
        Issue::MissingMessage(MissingMessageIssue {
            context: SourceContext::new(loc, source_line),
            key: MessageKey::new("OpticsView", source, None),
            missing_in: vec!["fr".to_string()],
        })
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report_to(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_report_missing_message() {
        let issue = missing(309, 17, "\t\ttext = tr(\"Position: \");", "Position: ");
        let stripped = render(&[issue]);

        assert!(stripped.contains("error: \"OpticsView::Position: \"  missing-message"));
        assert!(stripped.contains("--> ./gui/OpticsView.cpp:309:17"));
        assert!(stripped.contains("309 | \t\ttext = tr(\"Position: \");"));
        assert!(stripped.contains("= note: missing in: fr"));
        assert!(stripped.contains("= hint: run lupdate"));
    }

    #[test]
    fn test_report_message_location_has_no_source_line() {
        let issue = Issue::Unfinished(UnfinishedIssue {
            context: msg_ctx(42, "Wavelength", ""),
            empty: true,
        });
        let stripped = render(&[issue]);

        assert!(stripped.contains("warning: \"GaussianBeamWidget::Wavelength\"  unfinished"));
        assert!(stripped.contains("--> ./po/GaussianBeam_fr.ts:42:"));
        assert!(stripped.contains("= note: no translation"));
        assert!(!stripped.contains(" | "));
    }

    #[test]
    fn test_report_placeholder_mismatch() {
        let issue = Issue::PlaceholderMismatch(PlaceholderMismatchIssue {
            context: msg_ctx(88, "Waist %1 at %2", "Col %1"),
            kind: PlaceholderMismatchKind::Count,
            expected: vec![Placeholder::Arg(1), Placeholder::Arg(2)],
            actual: vec![Placeholder::Arg(1)],
            numerus_form: None,
        });
        let stripped = render(&[issue]);

        assert!(stripped.contains("placeholder-mismatch"));
        assert!(stripped.contains("count mismatch: expected %1, %2, found %1"));
    }

    #[test]
    fn test_report_parse_error_has_no_line() {
        let issue = Issue::ParseError(ParseErrorIssue {
            file_path: "./po/GaussianBeam_de.ts".to_string(),
            error: "malformed XML at line 3".to_string(),
            file_type: ParseErrorFileType::Translation,
        });
        let stripped = render(&[issue]);

        assert!(stripped.contains("error: \"malformed XML at line 3\"  parse-error"));
        assert!(stripped.contains("--> ./po/GaussianBeam_de.ts\n"));
        assert!(stripped.contains("translation file skipped"));
    }

    #[test]
    fn test_report_summary() {
        let issues = vec![
            missing(10, 5, "tr(\"Zoom\")", "Zoom"),
            Issue::Untranslated(UntranslatedIssue {
                context: msg_ctx(5, "Position", "Position"),
                locale: "fr".to_string(),
            }),
            Issue::Obsolete(ObsoleteIssue {
                context: msg_ctx(90, "Old", "Vieux"),
                state: TranslationState::Obsolete,
                span: 0..10,
                context_span: 0..20,
                context_len: 2,
            }),
        ];
        let stripped = render(&issues);

        assert!(stripped.contains("✘ 3 problems (1 error, 2 warnings)"));
    }

    #[test]
    fn test_report_single_problem() {
        let stripped = render(&[missing(10, 5, "tr(\"Zoom\")", "Zoom")]);
        assert!(stripped.contains("✘ 1 problem (1 error, 0 warnings)"));
    }

    #[test]
    fn test_report_sorting_by_file_and_line() {
        let issues = vec![
            Issue::Untranslated(UntranslatedIssue {
                context: msg_ctx(20, "B20", "B20"),
                locale: "fr".to_string(),
            }),
            missing(10, 5, "tr(\"A10\")", "A10"),
            missing(5, 5, "tr(\"A5\")", "A5"),
        ];

        let output = render(&issues);
        let a5_pos = output.find("A5").unwrap();
        let a10_pos = output.find("A10").unwrap();
        let b20_pos = output.find("B20").unwrap();

        assert!(a5_pos < a10_pos, "cpp:5 should come before cpp:10");
        assert!(a10_pos < b20_pos, "gui/ should come before po/");
    }

    #[test]
    fn test_report_unicode_source_line() {
        // "你好" takes 4 display columns, so the caret sits 2 columns further right.
        let issue = missing(10, 6, "\"你好\" tr(\"World\")", "World");
        let stripped = render(&[issue]);

        assert!(stripped.contains("\"你好\" tr(\"World\")"));
        let caret_line = stripped.lines().find(|l| l.trim_end().ends_with('^')).unwrap();
        assert_eq!(caret_line, "   |        ^");
    }

    #[test]
    fn test_print_success() {
        let mut output = Vec::new();
        print_success_to(10, 3, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert_eq!(
            stripped,
            "✓ Checked 10 source files, 3 translation files - no issues found\n"
        );
    }

    #[test]
    fn test_print_success_without_sources() {
        let mut output = Vec::new();
        print_success_to(0, 1, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert_eq!(stripped, "✓ Checked 1 translation file - no issues found\n");
    }

    #[test]
    fn test_print_parse_warning() {
        let mut output = Vec::new();
        print_parse_warning_to(2, false, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(stripped.contains("2 file(s) could not be parsed"));

        let mut output = Vec::new();
        print_parse_warning_to(2, true, &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_print_stats() {
        let files = vec![FileStats {
            file_path: "./po/GaussianBeam_fr.ts".to_string(),
            locale: "fr".to_string(),
            total: 4,
            finished: 3,
            unfinished: 1,
            obsolete: 2,
        }];

        let mut output = Vec::new();
        print_stats_to(&files, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        let lines: Vec<&str> = stripped.lines().collect();

        assert_eq!(
            lines[0],
            "Locale    Total  Finished  Unfinished  Obsolete    Done  File"
        );
        assert_eq!(
            lines[1],
            "fr            4         3           1         2   75.0%  ./po/GaussianBeam_fr.ts"
        );
    }
}
