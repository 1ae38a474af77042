use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::BUILD_DIR_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

/// Collect source files under `base_dir` whose extension is one of
/// `extensions` (without the leading dot).
///
/// Generated files (`moc_*`, `ui_*.h`) and build directories are always
/// skipped.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
) -> ScanResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    glob_patterns.extend(BUILD_DIR_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = Path::new(base_dir).join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => {
                        paths.extend(entries.flatten().filter(|entry| entry.is_dir()));
                    }
                    Err(e) => tracing::warn!("Invalid glob pattern '{}': {}", inc, e),
                }
            } else {
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!("Include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::debug!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && has_extension(path, extensions) {
                files.insert(path_str.into());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
