use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::{
        CommonArgs,
        commands::check::{CheckRule, run_checks},
    },
    config::load_config,
    core::{CheckContext, stats::FileStats},
    issues::{Issue, Severity},
};

use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, GetTranslationFilesParams, IssueItem, Pagination,
    ScanIssuesParams, ScanIssuesResult, ScanOverviewParams, ScanOverviewResult,
    TranslationFileInfo, TranslationFilesResult,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;

#[derive(Clone)]
pub struct QtlMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for QtlMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl QtlMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current qtl configuration
    #[tool(description = "Get the current qtl configuration (.qtlrc.json merged with defaults).")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };

        to_tool_result(&config_dto)
    }

    /// List translation files with their progress
    #[tool(
        description = "List Qt Linguist translation files (*.ts) with locale, path and message counts (total, finished, unfinished, obsolete)."
    )]
    pub async fn get_translation_files(
        &self,
        params: Parameters<GetTranslationFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = build_context(&params.0.project_root_path, &params.0.translations_root)?;

        let files = ctx
            .translations
            .iter()
            .map(|file| TranslationFileInfo::from(&FileStats::from_file(file)))
            .collect();

        to_tool_result(&TranslationFilesResult {
            translations_root: ctx.config.translations_root.clone(),
            files,
        })
    }

    /// Get issue counts per rule
    #[tool(
        description = "Run every check and return the number of issues per rule without details. Use this first to understand the overall state before diving into details."
    )]
    pub async fn scan_overview(
        &self,
        params: Parameters<ScanOverviewParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = build_context(&params.0.project_root_path, &params.0.translations_root)?;
        let issues = run_checks(&ctx, &CheckRule::all());

        let mut rules: BTreeMap<String, usize> = BTreeMap::new();
        for issue in &issues {
            *rules.entry(issue.rule().to_string()).or_default() += 1;
        }

        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();

        to_tool_result(&ScanOverviewResult {
            translation_file_count: ctx.translation_files_checked(),
            error_count,
            warning_count: issues.len() - error_count,
            rules,
        })
    }

    /// Get detailed issues, optionally filtered by check
    #[tool(
        description = "Run the selected checks (all when `rules` is omitted) and return a paginated list of issues with file, line, message and hint. Valid rules: empty-source, duplicate, placeholder, unfinished, untranslated, obsolete, missing, unused, stale-location."
    )]
    pub async fn scan_issues(
        &self,
        params: Parameters<ScanIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let checks = match &params.rules {
            Some(names) if !names.is_empty() => parse_rules(names)?,
            _ => CheckRule::all(),
        };

        let ctx = build_context(&params.project_root_path, &params.translations_root)?;
        let mut issues: Vec<Issue> = run_checks(&ctx, &checks);
        issues.sort();

        let total_count = issues.len();

        // Apply pagination
        let items: Vec<IssueItem> = issues
            .iter()
            .skip(offset)
            .take(limit)
            .map(IssueItem::from)
            .collect();

        let has_more = offset + items.len() < total_count;

        to_tool_result(&ScanIssuesResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }
}

fn build_context(
    project_root: &str,
    translations_root: &Option<String>,
) -> Result<CheckContext, McpError> {
    let common = CommonArgs {
        source_root: Some(PathBuf::from(project_root)),
        translations_root: translations_root.as_ref().map(PathBuf::from),
        verbose: false,
    };

    CheckContext::new(&common)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

fn parse_rules(names: &[String]) -> Result<Vec<CheckRule>, McpError> {
    let mut checks = Vec::new();
    for name in names {
        let rule = CheckRule::from_str(name, true).map_err(|_| {
            McpError::invalid_params(format!("Unknown rule: {}", name), None)
        })?;
        if !checks.contains(&rule) {
            checks.push(rule);
        }
    }
    Ok(checks)
}

fn to_tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for QtlMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "qtl MCP helps AI agents maintain Qt Linguist (.ts) translations.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_translation_files - List .ts files with locale and progress counts\n\
                 3. scan_overview - Get issue counts per rule\n\
                 4. scan_issues - Get detailed issues (filter by rule, paginated)\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_overview to understand the overall state\n\
                 2. Fix errors first: placeholder, duplicate, empty-source, parse-error\n\
                 3. Then fix missing messages (run lupdate to add them to every .ts file)\n\
                 4. Finally translate unfinished and untranslated messages\n\n\
                 Obsolete and vanished messages can be removed with `qtl clean --apply`."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = QtlMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
