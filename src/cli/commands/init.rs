use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::helper::finish;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default `.qtlrc.json` into `dir`.
///
/// An existing config file is never overwritten; that case is reported as
/// an error in the summary rather than returned as `Err`.
pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    let error = if config_path.exists() {
        Some(format!("{} already exists", CONFIG_FILE_NAME))
    } else {
        fs::write(&config_path, default_config_json()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        None
    };

    Ok(finish(
        CommandSummary::Init(InitSummary {
            path: config_path,
            error,
        }),
        Vec::new(),
        0,
        0,
        true,
    ))
}
