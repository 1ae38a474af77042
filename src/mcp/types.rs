use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    core::stats::FileStats,
    issues::{Issue, Report, ReportLocation},
};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root (where `.qtlrc.json` lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTranslationFilesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Directory holding the `.ts` files, overriding `translationsRoot`
    pub translations_root: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOverviewParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Directory holding the `.ts` files, overriding `translationsRoot`
    pub translations_root: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssuesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Directory holding the `.ts` files, overriding `translationsRoot`
    pub translations_root: Option<String>,
    /// Checks to run (e.g. "unfinished", "placeholder"). All checks when omitted.
    pub rules: Option<Vec<String>>,
    /// Maximum number of items to return (default 50, max 100)
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub ignores: Vec<String>,
    pub includes: Vec<String>,
    pub translations_root: String,
    pub source_root: String,
    pub source_extensions: Vec<String>,
    pub ignore_texts: Vec<String>,
    pub allow_placeholder_reorder: bool,
    pub check_locations: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            ignores: c.ignores,
            includes: c.includes,
            translations_root: c.translations_root,
            source_root: c.source_root,
            source_extensions: c.source_extensions,
            ignore_texts: c.ignore_texts,
            allow_placeholder_reorder: c.allow_placeholder_reorder,
            check_locations: c.check_locations,
        }
    }
}

// ============================================================
// Translation File Types (get_translation_files)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFilesResult {
    /// Effective `translationsRoot` setting
    pub translations_root: String,
    pub files: Vec<TranslationFileInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFileInfo {
    pub locale: String,
    pub file_path: String,
    /// Messages that are not obsolete or vanished
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
    /// Percentage of finished messages (0-100)
    pub completion: f64,
}

impl From<&FileStats> for TranslationFileInfo {
    fn from(stats: &FileStats) -> Self {
        Self {
            locale: stats.locale.clone(),
            file_path: stats.file_path.clone(),
            total: stats.total,
            finished: stats.finished,
            unfinished: stats.unfinished,
            obsolete: stats.obsolete,
            completion: (stats.completion() * 10.0).round() / 10.0,
        }
    }
}

// ============================================================
// Scan Types (scan_overview, scan_issues)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOverviewResult {
    pub translation_file_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    /// Issue count per rule, only rules with at least one issue
    pub rules: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssuesResult {
    pub total_count: usize,
    pub items: Vec<IssueItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub rule: String,
    pub severity: String,
    pub file_path: String,
    /// 1-indexed line, 0 for file-level issues
    pub line: usize,
    pub col: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let (file_path, line, col) = match issue.location() {
            ReportLocation::Source(ctx) => (ctx.file_path().to_string(), ctx.line(), ctx.col()),
            ReportLocation::Message(ctx) => (ctx.file_path().to_string(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path.to_string(), 0, 0),
        };
        Self {
            rule: issue.rule().to_string(),
            severity: issue.severity().to_string(),
            file_path,
            line,
            col,
            message: issue.message(),
            details: issue.details(),
            hint: issue.hint().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
