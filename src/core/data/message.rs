use std::{fmt, ops::Range, path::PathBuf};

/// Position information in translation (`.ts`) files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the translation file (e.g., "./po/GaussianBeam_fr.ts").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self::new(file_path, line, 1)
    }
}

/// Position of a `<message>` together with what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// Name of the owning `<context>` (e.g., "GaussianBeamForm").
    pub context_name: String,
    /// The English source string.
    pub source: String,
    /// The translated string (first numerus form for plural messages).
    pub translation: String,
    /// Disambiguation `<comment>`.
    pub comment: Option<String>,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        context_name: impl Into<String>,
        source: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            location,
            context_name: context_name.into(),
            source: source.into(),
            translation: translation.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment.filter(|c| !c.is_empty());
        self
    }

    /// Identity of the message this context describes.
    pub fn key(&self) -> MessageKey {
        MessageKey::new(
            self.context_name.clone(),
            self.source.clone(),
            self.comment.as_deref(),
        )
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// Translation state, taken from the `type` attribute of `<translation>`.
///
/// | attribute          | state        |
/// |--------------------|--------------|
/// | (none)             | `Finished`   |
/// | `type="unfinished"`| `Unfinished` |
/// | `type="obsolete"`  | `Obsolete`   |
/// | `type="vanished"`  | `Vanished`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationState {
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            Some("unfinished") => TranslationState::Unfinished,
            Some("obsolete") => TranslationState::Obsolete,
            Some("vanished") => TranslationState::Vanished,
            _ => TranslationState::Finished,
        }
    }

    /// Entries `lupdate` no longer finds in the sources.
    pub fn is_retired(&self) -> bool {
        matches!(self, TranslationState::Obsolete | TranslationState::Vanished)
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationState::Finished => write!(f, "finished"),
            TranslationState::Unfinished => write!(f, "unfinished"),
            TranslationState::Obsolete => write!(f, "obsolete"),
            TranslationState::Vanished => write!(f, "vanished"),
        }
    }
}

/// A `<location filename=".." line=".."/>` hint, resolved against the
/// translation file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHint {
    /// Filename as written in the file (after inheriting from the previous hint).
    pub filename: String,
    /// Resolved path on disk.
    pub resolved: PathBuf,
    /// Absolute line number, if any.
    pub line: Option<usize>,
    /// Line of the `<location>` element inside the translation file.
    pub ts_line: usize,
}

/// Identity of a translatable string: `(context, source, disambiguation)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    /// Disambiguation comment, empty when absent.
    pub comment: String,
}

impl MessageKey {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<String>,
        comment: Option<&str>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            comment: comment.unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}",
            self.context,
            crate::utils::display_text(&self.source)
        )?;
        if !self.comment.is_empty() {
            write!(f, " ({})", self.comment)?;
        }
        Ok(())
    }
}

/// A single `<message>` from a translation file.
#[derive(Debug, Clone)]
pub struct TranslationEntry {
    /// Message context (location, context name, source, translation, comment).
    pub context: MessageContext,
    /// Developer note for translators (`<extracomment>`).
    pub extra_comment: Option<String>,
    /// True when the message carries `numerus="yes"`.
    pub numerus: bool,
    /// Plural forms; empty for non-numerus messages.
    pub numerus_forms: Vec<String>,
    pub state: TranslationState,
    pub locations: Vec<LocationHint>,
    /// Byte span of the `<message>` element in the file.
    pub span: Range<usize>,
}

impl TranslationEntry {
    pub fn key(&self) -> MessageKey {
        self.context.key()
    }

    pub fn comment(&self) -> Option<&str> {
        self.context.comment.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.context.source
    }

    pub fn translation(&self) -> &str {
        &self.context.translation
    }

    /// All translated texts: every numerus form, or the single translation.
    pub fn translations(&self) -> Vec<&str> {
        if self.numerus && !self.numerus_forms.is_empty() {
            self.numerus_forms.iter().map(String::as_str).collect()
        } else {
            vec![self.context.translation.as_str()]
        }
    }

    /// True if no translated text has been written yet.
    pub fn is_empty_translation(&self) -> bool {
        self.translations().iter().all(|t| t.is_empty())
    }
}

/// A named `<context>` block.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    pub name: String,
    pub line: usize,
    /// Byte span of the `<context>` element in the file.
    pub span: Range<usize>,
    pub messages: Vec<TranslationEntry>,
}

/// A parsed Qt Linguist translation file.
#[derive(Debug, Clone)]
pub struct TranslationFile {
    pub file_path: String,
    /// Target locale (e.g., "fr").
    pub locale: String,
    pub source_language: Option<String>,
    /// TS format version (e.g., "1.1", "2.1").
    pub version: Option<String>,
    pub contexts: Vec<TranslationContext>,
}

impl TranslationFile {
    pub fn new(file_path: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            locale: locale.into(),
            source_language: None,
            version: None,
            contexts: Vec::new(),
        }
    }

    /// All entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.contexts.iter().flat_map(|c| c.messages.iter())
    }

    /// Entries that are not obsolete or vanished.
    pub fn live_entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries().filter(|e| !e.state.is_retired())
    }

    pub fn context(&self, name: &str) -> Option<&TranslationContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
