use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".qtlrc.json";

/// Directories that never hold translatable sources.
pub const BUILD_DIR_PATTERNS: &[&str] = &["**/build/**", "**/.git/**", "**/moc_*", "**/ui_*.h"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_translations_root")]
    pub translations_root: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub allow_placeholder_reorder: bool,
    #[serde(default = "default_check_locations")]
    pub check_locations: bool,
}

fn default_translations_root() -> String {
    "./".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_source_extensions() -> Vec<String> {
    ["cpp", "cc", "cxx", "h", "hpp", "ui"]
        .map(String::from)
        .to_vec()
}

fn default_check_locations() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            translations_root: default_translations_root(),
            source_root: default_source_root(),
            source_extensions: default_source_extensions(),
            ignore_texts: Vec::new(),
            allow_placeholder_reorder: false,
            check_locations: default_check_locations(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is invalid,
    /// or if an extension is written with a leading dot.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if let Some(ext) = self.source_extensions.iter().find(|e| e.starts_with('.')) {
            anyhow::bail!(
                "Invalid entry in 'sourceExtensions': \"{}\" (write extensions without the leading dot)",
                ext
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
