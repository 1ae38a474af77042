use std::collections::HashSet;

use super::super::{
    actions::{Action, RemoveMessage},
    args::{CleanCommand, CleanRule},
};
use super::helper::finish;
use super::{CleanSummary, CommandResult, CommandSummary};
use crate::{
    core::{CheckContext, TranslationState},
    issues::{Issue, ObsoleteIssue},
    rules::obsolete::check_obsolete_issues,
};
use anyhow::{Ok, Result};

impl CleanRule {
    pub fn all() -> HashSet<Self> {
        [Self::Obsolete, Self::Vanished].into_iter().collect()
    }

    fn matches(&self, state: TranslationState) -> bool {
        match self {
            CleanRule::Obsolete => state == TranslationState::Obsolete,
            CleanRule::Vanished => state == TranslationState::Vanished,
        }
    }
}

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;
    let apply = args.apply;

    let rules = if args.rules.is_empty() {
        CleanRule::all()
    } else {
        args.rules.iter().copied().collect()
    };

    let issues: Vec<ObsoleteIssue> = check_obsolete_issues(&ctx)
        .into_iter()
        .filter(|issue| rules.iter().any(|rule| rule.matches(issue.state)))
        .collect();

    let obsolete_count = issues
        .iter()
        .filter(|i| i.state == TranslationState::Obsolete)
        .count();
    let vanished_count = issues.len() - obsolete_count;

    let (file_count, removed_count, removed_context_count) = if apply && !issues.is_empty() {
        let stats = RemoveMessage::run(&issues)?;
        (
            stats.files_modified,
            stats.messages_removed,
            stats.contexts_removed,
        )
    } else {
        let files: HashSet<&str> = issues.iter().map(|i| i.context.file_path()).collect();
        (files.len(), 0, 0)
    };

    let mut all_issues: Vec<Issue> = Vec::new();
    all_issues.extend(ctx.parse_errors().into_iter().map(Issue::ParseError));

    Ok(finish(
        CommandSummary::Clean(CleanSummary {
            obsolete_count,
            vanished_count,
            removed_count,
            removed_context_count,
            file_count,
            is_apply: apply,
            issues,
        }),
        all_issues,
        0,
        ctx.translation_files_checked(),
        false,
    ))
}
