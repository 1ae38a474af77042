use std::{
    cell::OnceCell,
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow, bail};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        AllKeyUsages, MessageKey, TranslationFile,
        file_scanner::scan_files,
        key_usage::used_keys,
        parsers::{cpp::extract_tr_calls, ts::scan_translation_files, ui::extract_ui_strings},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// Source-side data, computed on first use.
struct SourceData {
    usages: AllKeyUsages,
    parse_errors: Vec<ParseErrorIssue>,
}

/// Analysis context shared by every rule.
///
/// Translation files are loaded eagerly, since every command needs them.
/// Source files are only listed up front; they are read and scanned for
/// `tr()` calls the first time a rule asks for key usages.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--translations-root po`)
/// 2. `.qtlrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (where the config file search started).
    pub root_dir: PathBuf,

    /// All source files to scan for translatable strings.
    pub files: HashSet<String>,

    /// Parsed translation files, sorted by path.
    pub translations: Vec<TranslationFile>,

    /// Texts never reported as untranslated (from config `ignoreTexts`).
    pub ignore_texts: HashSet<String>,

    pub verbose: bool,

    /// Translation files that failed to parse.
    translation_parse_errors: Vec<ParseErrorIssue>,

    source_data: OnceCell<SourceData>,

    used_keys: OnceCell<HashSet<MessageKey>>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - Translations directory doesn't exist
    /// - No translation file is found
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let root_str = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(root_str))?;
        if !config_result.from_file {
            tracing::info!("No .qtlrc.json found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(ref translations_root) = common_args.translations_root {
            config.translations_root = translations_root.to_string_lossy().to_string();
        }

        let source_dir = resolve_dir(&root_dir, &config.source_root);
        let translations_dir = resolve_dir(&root_dir, &config.translations_root);
        let source_dir_str = source_dir.to_string_lossy().to_string();

        let (scan_result, translation_result) = rayon::join(
            || {
                scan_files(
                    &source_dir_str,
                    &config.includes,
                    &config.ignores,
                    &config.source_extensions,
                )
            },
            || scan_translation_files(&translations_dir),
        );

        if scan_result.skipped_count > 0 {
            tracing::warn!(
                "{} path(s) skipped due to access errors",
                scan_result.skipped_count
            );
        }

        let translation_result = translation_result?;

        let translation_parse_errors: Vec<ParseErrorIssue> = translation_result
            .warnings
            .iter()
            .map(|warning| ParseErrorIssue {
                file_path: warning.file_path.clone(),
                error: warning.error.clone(),
                file_type: ParseErrorFileType::Translation,
            })
            .collect();

        if translation_result.files.is_empty() && translation_parse_errors.is_empty() {
            bail!(
                "No translation files (*.ts) found in '{}'",
                translations_dir.display()
            );
        }

        tracing::debug!(
            sources = scan_result.files.len(),
            translations = translation_result.files.len(),
            "scan complete"
        );

        let ignore_texts = config.ignore_texts.iter().cloned().collect();

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            translations: translation_result.files,
            ignore_texts,
            verbose,
            translation_parse_errors,
            source_data: OnceCell::new(),
            used_keys: OnceCell::new(),
        })
    }

    fn source_data(&self) -> &SourceData {
        self.source_data.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let result = std::fs::read_to_string(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|content| {
                            if file_path.ends_with(".ui") {
                                extract_ui_strings(&content, file_path)
                            } else {
                                Ok(extract_tr_calls(&content, file_path))
                            }
                        });
                    (file_path.clone(), result)
                })
                .collect();

            let mut usages = Vec::new();
            let mut parse_errors = Vec::new();

            for (file_path, result) in results {
                match result {
                    Ok(calls) => usages.extend(calls),
                    Err(e) => {
                        tracing::debug!("{} - {:#}", file_path, e);
                        parse_errors.push(ParseErrorIssue {
                            file_path,
                            error: format!("{:#}", e),
                            file_type: ParseErrorFileType::Source,
                        });
                    }
                }
            }

            usages.sort_by(|a, b| a.context.location.cmp(&b.context.location));
            parse_errors.sort_by(|a, b| a.file_path.cmp(&b.file_path));

            SourceData {
                usages,
                parse_errors,
            }
        })
    }

    /// Get all translatable strings found in source files (lazy initialization).
    pub fn key_usages(&self) -> &AllKeyUsages {
        &self.source_data().usages
    }

    /// Get set of all message keys used in source code (lazy initialization).
    pub fn used_keys(&self) -> &HashSet<MessageKey> {
        self.used_keys
            .get_or_init(|| used_keys(self.key_usages()))
    }

    /// Get parse errors from translation files and, if they were scanned
    /// already, source files.
    pub fn parse_errors(&self) -> Vec<ParseErrorIssue> {
        let mut errors = self.translation_parse_errors.clone();
        if let Some(data) = self.source_data.get() {
            errors.extend(data.parse_errors.iter().cloned());
        }
        errors
    }

    /// Number of translation files that were parsed or attempted.
    pub fn translation_files_checked(&self) -> usize {
        self.translations.len() + self.translation_parse_errors.len()
    }

    /// Locales of the parsed translation files, in file order.
    pub fn locales(&self) -> Vec<&str> {
        self.translations.iter().map(|f| f.locale.as_str()).collect()
    }
}

/// Resolve a configured directory relative to the project root.
///
/// With the default root (`.`) the configured path is kept as-is, so
/// reports show `./po/GaussianBeam_fr.ts` rather than `././po/...`.
fn resolve_dir(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
