//! Qt Linguist `.ts` file parser.
//!
//! Streams the XML with quick-xml and builds a [`TranslationFile`], keeping
//! line numbers and byte spans so rules can point at the offending
//! `<message>` and the clean action can cut it out of the file.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use super::{build_line_index, offset_to_line};
use crate::core::{
    LocationHint, MessageContext, MessageLocation, TranslationContext, TranslationEntry,
    TranslationFile, TranslationState,
};

#[derive(Debug, Error)]
pub enum TsError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed XML at line {line}: {source}")]
    Xml {
        line: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("invalid attribute at line {line}: {message}")]
    Attribute { line: usize, message: String },
    #[error("not a Qt Linguist file (missing <TS> root element)")]
    NotLinguist,
    #[error("unexpected end of file inside <{0}>")]
    UnexpectedEof(&'static str),
}

/// A warning from scanning translation files.
#[derive(Debug, Clone)]
pub struct TranslationScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanTranslationsResult {
    /// Parsed files, sorted by path.
    pub files: Vec<TranslationFile>,
    pub warnings: Vec<TranslationScanWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ContextName,
    Source,
    Translation,
    NumerusForm,
    Comment,
    ExtraComment,
}

struct ContextBuilder {
    name: String,
    line: usize,
    start: usize,
    messages: Vec<TranslationEntry>,
}

#[derive(Default)]
struct MessageBuilder {
    line: usize,
    start: usize,
    source: String,
    translation: String,
    comment: Option<String>,
    extra_comment: Option<String>,
    numerus: bool,
    numerus_forms: Vec<String>,
    state: TranslationState,
    locations: Vec<LocationHint>,
}

/// Tracks Qt's compact location encoding: a `<location>` without `filename`
/// reuses the previous one, and `line="+3"` is relative to the previous
/// line recorded for the same file.
#[derive(Default)]
struct LocationTracker {
    last_filename: Option<String>,
    last_lines: HashMap<String, i64>,
}

impl LocationTracker {
    fn resolve(
        &mut self,
        filename: Option<String>,
        line: Option<String>,
        ts_line: usize,
        base_dir: &Path,
    ) -> Option<LocationHint> {
        let filename = filename.or_else(|| self.last_filename.clone())?;
        self.last_filename = Some(filename.clone());

        let line = match line {
            None => None,
            Some(value) => {
                let trimmed = value.trim();
                let relative = trimmed.starts_with('+') || trimmed.starts_with('-');
                let absolute = trimmed
                    .trim_start_matches('+')
                    .parse::<i64>()
                    .ok()
                    .map(|parsed| {
                        if relative {
                            self.last_lines.get(&filename).copied().unwrap_or(0) + parsed
                        } else {
                            parsed
                        }
                    })
                    .filter(|absolute| *absolute >= 0);
                let Some(absolute) = absolute else {
                    tracing::debug!(
                        line = ts_line,
                        value = %value,
                        "dropping location with invalid line number"
                    );
                    return None;
                };
                self.last_lines.insert(filename.clone(), absolute);
                Some(absolute as usize)
            }
        };

        Some(LocationHint {
            resolved: base_dir.join(&filename),
            filename,
            line,
            ts_line,
        })
    }
}

fn attr(e: &BytesStart, name: &str, line: usize) -> Result<Option<String>, TsError> {
    let to_error = |err: &dyn std::fmt::Display| TsError::Attribute {
        line,
        message: err.to_string(),
    };
    match e.try_get_attribute(name).map_err(|err| to_error(&err))? {
        Some(a) => Ok(Some(
            a.unescape_value()
                .map_err(|err| to_error(&err))?
                .into_owned(),
        )),
        None => Ok(None),
    }
}

/// Guess the locale from a file name following Qt's `app_xx.ts` or
/// `app_xx_YY.ts` convention.
///
/// Examples:
/// - "GaussianBeam_fr.ts" -> "fr"
/// - "GaussianBeam_zh_CN.ts" -> "zh_CN"
/// - "de.ts" -> "de"
pub fn locale_from_path(path: impl AsRef<Path>) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let parts: Vec<&str> = stem.split('_').collect();

    let is_region = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase());
    let is_language =
        |s: &str| (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase());

    match parts.as_slice() {
        [.., lang, region] if parts.len() >= 3 && is_language(lang) && is_region(region) => {
            format!("{}_{}", lang, region)
        }
        [_, .., last] => last.to_string(),
        _ => stem.to_string(),
    }
}

/// Quick sniff to tell Linguist XML apart from TypeScript sources, which
/// share the `.ts` extension.
pub fn is_linguist_document(content: &str) -> bool {
    content.contains("<TS>") || content.contains("<TS ") || content.contains("<!DOCTYPE TS")
}

/// Qt 4 `lupdate` (TS formats before 2.0) wrote non-ASCII `tr()` literals
/// as their UTF-8 bytes read as Latin-1, e.g. `&#xc2;&#xb5;m` for "µm".
/// A missing version is the oldest format.
fn is_legacy_format(version: Option<&str>) -> bool {
    version
        .and_then(|v| v.split('.').next())
        .and_then(|major| major.trim().parse::<u32>().ok())
        .is_none_or(|major| major < 2)
}

/// Decode text whose chars are all Latin-1 and whose bytes, taken one per
/// char, form valid UTF-8. Returns `None` when the text is not mojibake.
pub fn repair_latin1_mojibake(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

fn source_key(text: String, legacy: bool) -> String {
    if legacy {
        repair_latin1_mojibake(&text).unwrap_or(text)
    } else {
        text
    }
}

pub fn parse_ts_str(content: &str, file_path: &str) -> Result<TranslationFile, TsError> {
    let base_dir = Path::new(file_path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let line_index = build_line_index(content);
    let line_at = |offset: usize| offset_to_line(&line_index, offset);

    let mut reader = Reader::from_str(content);

    let mut file: Option<TranslationFile> = None;
    let mut context: Option<ContextBuilder> = None;
    let mut message: Option<MessageBuilder> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut locations = LocationTracker::default();
    let mut legacy = false;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|source| TsError::Xml {
            line: line_at(reader.error_position() as usize),
            source,
        })?;
        let end = reader.buffer_position() as usize;
        let line = line_at(start);

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let opened_in = field;
                match e.name().as_ref() {
                    b"TS" => {
                        let locale = attr(e, "language", line)?
                            .filter(|l| !l.is_empty())
                            .unwrap_or_else(|| locale_from_path(file_path));
                        let mut ts = TranslationFile::new(file_path, locale);
                        ts.version = attr(e, "version", line)?;
                        legacy = is_legacy_format(ts.version.as_deref());
                        ts.source_language = attr(e, "sourcelanguage", line)?;
                        file = Some(ts);
                    }
                    b"context" => {
                        if file.is_none() {
                            return Err(TsError::NotLinguist);
                        }
                        context = Some(ContextBuilder {
                            name: String::new(),
                            line,
                            start,
                            messages: Vec::new(),
                        });
                    }
                    b"name" if context.is_some() && message.is_none() && !is_empty => {
                        field = Some(Field::ContextName);
                    }
                    b"message" if context.is_some() => {
                        let numerus = attr(e, "numerus", line)?.as_deref() == Some("yes");
                        message = Some(MessageBuilder {
                            line,
                            start,
                            numerus,
                            ..Default::default()
                        });
                    }
                    b"location" => {
                        if let Some(msg) = message.as_mut() {
                            let hint = locations.resolve(
                                attr(e, "filename", line)?,
                                attr(e, "line", line)?,
                                line,
                                &base_dir,
                            );
                            msg.locations.extend(hint);
                        }
                    }
                    b"source" if message.is_some() && !is_empty => {
                        field = Some(Field::Source);
                    }
                    b"translation" => {
                        if let Some(msg) = message.as_mut() {
                            msg.state =
                                TranslationState::from_type_attr(attr(e, "type", line)?.as_deref());
                            if !is_empty {
                                field = Some(Field::Translation);
                            }
                        }
                    }
                    b"numerusform" => {
                        if let Some(msg) = message.as_mut() {
                            if is_empty {
                                msg.numerus_forms.push(String::new());
                            } else {
                                field = Some(Field::NumerusForm);
                            }
                        }
                    }
                    b"comment" if message.is_some() && !is_empty => {
                        field = Some(Field::Comment);
                    }
                    b"extracomment" if message.is_some() && !is_empty => {
                        field = Some(Field::ExtraComment);
                    }
                    _ => {}
                }
                if field != opened_in {
                    text.clear();
                }
            }
            Event::Text(ref t) => {
                if field.is_some() {
                    let unescaped = t.unescape().map_err(|source| TsError::Xml { line, source })?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(ref c) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(c));
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"name" if field == Some(Field::ContextName) => {
                    if let Some(ctx) = context.as_mut() {
                        ctx.name = std::mem::take(&mut text);
                    }
                    field = None;
                }
                b"source" if field == Some(Field::Source) => {
                    if let Some(msg) = message.as_mut() {
                        msg.source = source_key(std::mem::take(&mut text), legacy);
                    }
                    field = None;
                }
                b"numerusform" if field == Some(Field::NumerusForm) => {
                    if let Some(msg) = message.as_mut() {
                        msg.numerus_forms.push(std::mem::take(&mut text));
                    }
                    field = Some(Field::Translation);
                }
                b"translation" if field == Some(Field::Translation) => {
                    if let Some(msg) = message.as_mut() {
                        msg.translation = match msg.numerus_forms.first() {
                            Some(first) => first.clone(),
                            None => std::mem::take(&mut text),
                        };
                    }
                    text.clear();
                    field = None;
                }
                b"comment" if field == Some(Field::Comment) => {
                    if let Some(msg) = message.as_mut() {
                        msg.comment = Some(source_key(std::mem::take(&mut text), legacy))
                            .filter(|c| !c.is_empty());
                    }
                    field = None;
                }
                b"extracomment" if field == Some(Field::ExtraComment) => {
                    if let Some(msg) = message.as_mut() {
                        msg.extra_comment =
                            Some(std::mem::take(&mut text)).filter(|c| !c.is_empty());
                    }
                    field = None;
                }
                b"message" => {
                    if let (Some(msg), Some(ctx)) = (message.take(), context.as_mut()) {
                        ctx.messages.push(TranslationEntry {
                            context: MessageContext::new(
                                MessageLocation::with_line(file_path, msg.line),
                                ctx.name.clone(),
                                msg.source,
                                msg.translation,
                            )
                            .with_comment(msg.comment),
                            extra_comment: msg.extra_comment,
                            numerus: msg.numerus,
                            numerus_forms: msg.numerus_forms,
                            state: msg.state,
                            locations: msg.locations,
                            span: msg.start..end,
                        });
                    }
                    field = None;
                }
                b"context" => {
                    if let (Some(ctx), Some(ts)) = (context.take(), file.as_mut()) {
                        ts.contexts.push(TranslationContext {
                            name: ctx.name,
                            line: ctx.line,
                            span: ctx.start..end,
                            messages: ctx.messages,
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if message.is_some() {
        return Err(TsError::UnexpectedEof("message"));
    }
    if context.is_some() {
        return Err(TsError::UnexpectedEof("context"));
    }
    file.ok_or(TsError::NotLinguist)
}

pub fn parse_ts_file(path: &Path) -> Result<TranslationFile, TsError> {
    let content = fs::read_to_string(path)?;
    parse_ts_str(&content, &path.to_string_lossy())
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_str(),
            Some(".git" | "target" | "node_modules")
        )
}

pub fn scan_translation_files(root: impl AsRef<Path>) -> Result<ScanTranslationsResult> {
    let root = root.as_ref();

    if !root.exists() {
        bail!(
            "Translations directory '{}' does not exist.\n\
             Hint: Check your .qtlrc.json 'translationsRoot' setting.",
            root.display()
        );
    }

    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("ts"))
        .collect();

    let parsed: Vec<(PathBuf, Option<Result<TranslationFile, TsError>>)> = candidates
        .into_par_iter()
        .map(|path| {
            let outcome = match fs::read_to_string(&path) {
                Ok(content) if !is_linguist_document(&content) => None,
                Ok(content) => Some(parse_ts_str(&content, &path.to_string_lossy())),
                Err(e) => Some(Err(TsError::Io(e))),
            };
            (path, outcome)
        })
        .collect();

    let mut result = ScanTranslationsResult::default();
    for (path, outcome) in parsed {
        match outcome {
            None => {
                tracing::debug!(path = %path.display(), "skipping non-Linguist .ts file");
            }
            Some(Ok(file)) => {
                tracing::debug!(
                    path = %path.display(),
                    locale = %file.locale,
                    messages = file.len(),
                    "parsed translation file"
                );
                result.files.push(file);
            }
            Some(Err(e)) => {
                result.warnings.push(TranslationScanWarning {
                    file_path: path.to_string_lossy().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    result.files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    result.warnings.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    Ok(result)
}
