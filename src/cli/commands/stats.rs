use anyhow::{Ok, Result};

use super::super::args::StatsCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, StatsSummary};
use crate::{
    core::{CheckContext, stats::FileStats},
    issues::Issue,
};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.args.common)?;

    let files: Vec<FileStats> = ctx.translations.iter().map(FileStats::from_file).collect();

    let issues: Vec<Issue> = ctx
        .parse_errors()
        .into_iter()
        .map(Issue::ParseError)
        .collect();

    Ok(finish(
        CommandSummary::Stats(StatsSummary { files }),
        issues,
        0,
        ctx.translation_files_checked(),
        false,
    ))
}
