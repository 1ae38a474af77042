//! Extract translatable strings from Qt Designer `.ui` forms.

use anyhow::{Context as _, Result};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::{build_line_index, offset_to_line};
use crate::core::{MessageKey, SourceContext, SourceLocation, TrCall};

struct PendingString {
    offset: usize,
    comment: Option<String>,
    text: String,
}

fn attr(e: &BytesStart, name: &str) -> Result<Option<String>> {
    Ok(match e.try_get_attribute(name)? {
        Some(a) => Some(a.unescape_value()?.into_owned()),
        None => None,
    })
}

/// Collect every `<string>` of a form, using the form's top-level `<class>`
/// as the translation context. Strings marked `notr="true"` and empty
/// strings are skipped.
pub fn extract_ui_strings(content: &str, file_path: &str) -> Result<Vec<TrCall>> {
    let line_index = build_line_index(content);
    let mut reader = Reader::from_str(content);

    let mut depth = 0usize;
    let mut class_name: Option<String> = None;
    let mut in_class = false;
    let mut class_text = String::new();
    let mut current: Option<PendingString> = None;
    let mut found: Vec<PendingString> = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().with_context(|| {
            format!(
                "malformed form XML at line {}",
                offset_to_line(&line_index, reader.error_position() as usize)
            )
        })?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                match e.name().as_ref() {
                    // <ui> is depth 1, its own <class> child is depth 2.
                    b"class" if depth == 2 && class_name.is_none() => {
                        in_class = true;
                        class_text.clear();
                    }
                    b"string" => {
                        let notr = attr(e, "notr")?.as_deref() == Some("true");
                        if !notr {
                            current = Some(PendingString {
                                offset: start,
                                comment: attr(e, "comment")?.filter(|c| !c.is_empty()),
                                text: String::new(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                if in_class {
                    class_text.push_str(&t.unescape()?);
                } else if let Some(s) = current.as_mut() {
                    s.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(ref c) => {
                if let Some(s) = current.as_mut() {
                    s.text.push_str(&String::from_utf8_lossy(c));
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"class" if in_class => {
                        in_class = false;
                        class_name = Some(class_text.trim().to_string());
                    }
                    b"string" => {
                        if let Some(s) = current.take().filter(|s| !s.text.is_empty()) {
                            found.push(s);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Some(class_name) = class_name.filter(|c| !c.is_empty()) else {
        tracing::debug!(file = file_path, "form has no <class>, skipping");
        return Ok(Vec::new());
    };

    let lines: Vec<&str> = content.lines().collect();
    Ok(found
        .into_iter()
        .map(|s| {
            let line = offset_to_line(&line_index, s.offset);
            let col = content[line_index[line - 1]..s.offset].chars().count() + 1;
            TrCall::new(
                MessageKey::new(class_name.clone(), s.text, s.comment.as_deref()),
                SourceContext::new(
                    SourceLocation::new(file_path, line, col),
                    lines.get(line - 1).copied().unwrap_or_default(),
                ),
            )
        })
        .collect())
}
