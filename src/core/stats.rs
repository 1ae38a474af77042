//! Translation progress per file.

use crate::core::{TranslationFile, TranslationState};

#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    pub file_path: String,
    pub locale: String,
    /// Live messages (not obsolete or vanished).
    pub total: usize,
    /// Live messages with a finished, non-empty translation.
    pub finished: usize,
    pub unfinished: usize,
    /// Retired messages (obsolete or vanished).
    pub obsolete: usize,
}

impl FileStats {
    pub fn from_file(file: &TranslationFile) -> Self {
        let mut stats = FileStats {
            file_path: file.file_path.clone(),
            locale: file.locale.clone(),
            total: 0,
            finished: 0,
            unfinished: 0,
            obsolete: 0,
        };

        for entry in file.entries() {
            if entry.state.is_retired() {
                stats.obsolete += 1;
                continue;
            }
            stats.total += 1;
            if entry.state == TranslationState::Finished && !entry.is_empty_translation() {
                stats.finished += 1;
            } else {
                stats.unfinished += 1;
            }
        }

        stats
    }

    /// Share of live messages that are finished, in percent.
    ///
    /// A file without live messages counts as complete.
    pub fn completion(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / self.total as f64
        }
    }
}
