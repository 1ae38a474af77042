//! Stale `<location>` detection rule.
//!
//! Checks that every location hint of a live message points at a source
//! file that exists and has at least that many lines. Only runs when
//! `checkLocations` is enabled.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    core::{CheckContext, MessageLocation, TranslationFile},
    issues::{StaleLocationIssue, StaleLocationReason},
    rules::helpers::sort_by_message,
};

pub fn check_stale_locations_issues(ctx: &CheckContext) -> Vec<StaleLocationIssue> {
    if !ctx.config.check_locations {
        return Vec::new();
    }
    check_stale_locations(&ctx.translations)
}

pub fn check_stale_locations(files: &[TranslationFile]) -> Vec<StaleLocationIssue> {
    // Line counts per resolved path; `None` when the file cannot be read.
    let mut line_counts: HashMap<PathBuf, Option<usize>> = HashMap::new();
    let mut issues = Vec::new();

    for file in files {
        for entry in file.live_entries() {
            for hint in &entry.locations {
                let line_count = *line_counts
                    .entry(hint.resolved.clone())
                    .or_insert_with(|| count_lines(&hint.resolved));

                let reason = match (line_count, hint.line) {
                    (None, _) => StaleLocationReason::FileNotFound,
                    (Some(count), Some(line)) if line > count => {
                        StaleLocationReason::LineOutOfRange {
                            line,
                            line_count: count,
                        }
                    }
                    _ => continue,
                };

                let mut context = entry.context.clone();
                context.location = MessageLocation::with_line(&file.file_path, hint.ts_line);
                issues.push(StaleLocationIssue {
                    context,
                    filename: hint.filename.clone(),
                    reason,
                });
            }
        }
    }

    sort_by_message(&mut issues, |i| &i.context);
    issues
}

fn count_lines(path: &Path) -> Option<usize> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content.lines().count()),
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}
