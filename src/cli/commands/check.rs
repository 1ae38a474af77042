use anyhow::{Ok, Result};
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        duplicate::check_duplicate_messages_issues, empty_source::check_empty_source_issues,
        missing::check_missing_messages_issues, obsolete::check_obsolete_issues,
        placeholder::check_placeholder_issues, stale_location::check_stale_locations_issues,
        unfinished::check_unfinished_issues, untranslated::check_untranslated_issues,
        unused::check_unused_messages_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    EmptySource,
    Duplicate,
    Placeholder,
    Unfinished,
    Untranslated,
    Obsolete,
    Missing,
    Unused,
    StaleLocation,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::EmptySource,
            CheckRule::Duplicate,
            CheckRule::Placeholder,
            CheckRule::Unfinished,
            CheckRule::Untranslated,
            CheckRule::Obsolete,
            CheckRule::Missing,
            CheckRule::Unused,
            CheckRule::StaleLocation,
        ]
    }

    /// Rules that need the `tr()` calls from source files.
    pub fn needs_sources(&self) -> bool {
        matches!(self, CheckRule::Missing | CheckRule::Unused)
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks.clone()
    };
    let issues = run_checks(&ctx, &checks);

    let source_files_checked = if checks.iter().any(CheckRule::needs_sources) {
        ctx.files.len()
    } else {
        0
    };

    Ok(finish(
        CommandSummary::Check,
        issues,
        source_files_checked,
        ctx.translation_files_checked(),
        true,
    ))
}

/// Run the given rules and collect their issues, parse errors included.
pub fn run_checks(ctx: &CheckContext, checks: &[CheckRule]) -> Vec<Issue> {
    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        tracing::debug!(rule = ?check, "running check");
        match check {
            CheckRule::EmptySource => {
                let issues = check_empty_source_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::EmptySource));
            }
            CheckRule::Duplicate => {
                let issues = check_duplicate_messages_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::DuplicateMessage));
            }
            CheckRule::Placeholder => {
                let issues = check_placeholder_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::PlaceholderMismatch));
            }
            CheckRule::Unfinished => {
                let issues = check_unfinished_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::Unfinished));
            }
            CheckRule::Untranslated => {
                let issues = check_untranslated_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::Untranslated));
            }
            CheckRule::Obsolete => {
                let issues = check_obsolete_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::Obsolete));
            }
            CheckRule::Missing => {
                let issues = check_missing_messages_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::MissingMessage));
            }
            CheckRule::Unused => {
                let issues = check_unused_messages_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::UnusedMessage));
            }
            CheckRule::StaleLocation => {
                let issues = check_stale_locations_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::StaleLocation));
            }
        }
    }

    // Collected last so source parse errors from the checks above are included.
    all_issues.extend(ctx.parse_errors().into_iter().map(Issue::ParseError));

    all_issues
}
