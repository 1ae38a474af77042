use std::path::PathBuf;

use crate::core::stats::FileStats;
use crate::issues::{Issue, ObsoleteIssue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Clean(CleanSummary),
    Stats(StatsSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CleanSummary {
    pub obsolete_count: usize,
    pub vanished_count: usize,
    /// Messages actually removed (0 in dry-run mode).
    pub removed_count: usize,
    /// Contexts removed because all of their messages went.
    pub removed_context_count: usize,
    pub file_count: usize,
    pub is_apply: bool,
    pub issues: Vec<ObsoleteIssue>,
}

#[derive(Debug)]
pub struct StatsSummary {
    pub files: Vec<FileStats>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running qtl commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
    /// All issues found by the command.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of source files (C++, .ui) that were checked.
    /// 0 if the command never looked at sources.
    pub source_files_checked: usize,
    /// Number of translation files (.ts) that were checked.
    pub translation_files_checked: usize,
}
