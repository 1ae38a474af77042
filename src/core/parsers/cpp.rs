//! Extract `tr()`-style translatable strings from C++ sources.
//!
//! This is a lexical scan, not a C++ parser. Comments are blanked out first
//! (keeping byte offsets), then call sites are matched by regex and their
//! literal arguments decoded. The context of an unqualified `tr()` is the
//! class of the closest preceding `Class::method(` definition, `class`
//! body or `Q_DECLARE_TR_FUNCTIONS` declaration.

use std::sync::LazyLock;

use regex::Regex;

use super::{build_line_index, offset_to_line};
use crate::core::{MessageKey, SourceContext, SourceLocation, TrCall};

static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\b(?P<qual>[A-Za-z_]\w*)\s*(?:::|->)\s*)?\b(?P<func>trUtf8|tr|translate|QT_TR_NOOP_UTF8|QT_TR_NOOP|QT_TRANSLATE_NOOP)\s*\(",
    )
    .unwrap()
});

static METHOD_DEF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:[A-Za-z_][\w<>,: \t*&]*?[ \t*&:])?(?P<class>[A-Za-z_]\w*)::~?[A-Za-z_]\w*[ \t]*\([^;\n]*(?:\{.*)?$",
    )
    .unwrap()
});

static CLASS_DEF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?P<enum>enum[ \t]+)?(?:class|struct)[ \t]+(?:[A-Z_][A-Z0-9_]*[ \t]+)?(?P<class>[A-Za-z_]\w*)[^;\n]*$",
    )
    .unwrap()
});

static DECLARE_TR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bQ_DECLARE_TR_FUNCTIONS\s*\(\s*(?P<class>[A-Za-z_]\w*)\s*\)").unwrap()
});

/// Qualifiers under which `translate()` is Qt's static translation entry point.
const TRANSLATE_RECEIVERS: &[&str] = &["QCoreApplication", "QApplication", "qApp"];

/// Replace `//` and `/* */` comments with spaces, keeping byte offsets and
/// newlines intact. String and character literals are left untouched.
pub fn blank_comments(content: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str(char),
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();

    let blank = |out: &mut String, c: char| {
        if c == '\n' {
            out.push('\n');
        } else {
            out.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                ('"' | '\'', _) => {
                    out.push(c);
                    state = State::Str(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
                blank(&mut out, c);
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
        }
    }

    out
}

/// Decode the body of a C string literal starting just after the opening
/// quote. Returns the decoded bytes and the offset just past the closing
/// quote, or `None` if the literal is unterminated.
fn read_string_literal(bytes: &[u8], mut pos: usize) -> Option<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    loop {
        let b = *bytes.get(pos)?;
        pos += 1;
        match b {
            b'"' => return Some((out, pos)),
            b'\n' => return None,
            b'\\' => {
                let e = *bytes.get(pos)?;
                pos += 1;
                match e {
                    b'n' => out.push(b'\n'),
                    b't' => out.push(b'\t'),
                    b'r' => out.push(b'\r'),
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'v' => out.push(0x0b),
                    b'0'..=b'7' => {
                        let mut value = u32::from(e - b'0');
                        for _ in 0..2 {
                            match bytes.get(pos) {
                                Some(d @ b'0'..=b'7') => {
                                    value = value * 8 + u32::from(d - b'0');
                                    pos += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push(value as u8);
                    }
                    b'x' => {
                        let mut value = 0u32;
                        while let Some(d) = bytes.get(pos).and_then(|d| (*d as char).to_digit(16)) {
                            value = (value * 16 + d) & 0xff;
                            pos += 1;
                        }
                        out.push(value as u8);
                    }
                    // Line continuation inside a literal.
                    b'\n' => {}
                    other => out.push(other),
                }
            }
            other => out.push(other),
        }
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Read up to `max` call arguments starting after the opening parenthesis.
///
/// Each argument is `Some` when it is a (possibly concatenated) string
/// literal. Reading stops at the first argument that is not a literal,
/// which is recorded as `None`.
fn read_literal_args(text: &str, mut pos: usize, max: usize) -> Vec<Option<String>> {
    let bytes = text.as_bytes();
    let mut args = Vec::new();

    while args.len() < max {
        pos = skip_whitespace(bytes, pos);
        let mut literal: Option<Vec<u8>> = None;
        while bytes.get(pos) == Some(&b'"') {
            let Some((decoded, next)) = read_string_literal(bytes, pos + 1) else {
                args.push(None);
                return args;
            };
            literal.get_or_insert_with(Vec::new).extend(decoded);
            pos = skip_whitespace(bytes, next);
        }

        let value = literal.map(|b| String::from_utf8_lossy(&b).into_owned());
        match bytes.get(pos) {
            Some(b',') if value.is_some() => {
                args.push(value);
                pos += 1;
            }
            Some(b')') if value.is_some() => {
                args.push(value);
                break;
            }
            _ => {
                args.push(None);
                break;
            }
        }
    }

    args
}

/// Offsets where the enclosing translation context changes, in order.
fn context_markers(text: &str) -> Vec<(usize, String)> {
    let mut markers: Vec<(usize, String)> = Vec::new();

    for caps in METHOD_DEF_REGEX.captures_iter(text) {
        if let (Some(m), Some(class)) = (caps.get(0), caps.name("class")) {
            markers.push((m.start(), class.as_str().to_string()));
        }
    }
    for caps in CLASS_DEF_REGEX.captures_iter(text) {
        if caps.name("enum").is_some() {
            continue;
        }
        if let (Some(m), Some(class)) = (caps.get(0), caps.name("class")) {
            markers.push((m.start(), class.as_str().to_string()));
        }
    }
    for caps in DECLARE_TR_REGEX.captures_iter(text) {
        if let (Some(m), Some(class)) = (caps.get(0), caps.name("class")) {
            markers.push((m.start(), class.as_str().to_string()));
        }
    }

    markers.sort_by_key(|(offset, _)| *offset);
    markers
}

fn context_at(markers: &[(usize, String)], offset: usize) -> Option<&str> {
    let idx = markers.partition_point(|(start, _)| *start <= offset);
    idx.checked_sub(1).map(|i| markers[i].1.as_str())
}

/// Find every translatable string literal in a C++ source file.
pub fn extract_tr_calls(content: &str, file_path: &str) -> Vec<TrCall> {
    let text = blank_comments(content);
    let line_index = build_line_index(content);
    let lines: Vec<&str> = content.lines().collect();
    let markers = context_markers(&text);

    let mut calls = Vec::new();

    for caps in CALL_REGEX.captures_iter(&text) {
        let (Some(whole), Some(func)) = (caps.get(0), caps.name("func")) else {
            continue;
        };
        let qual = caps.name("qual").map(|q| q.as_str());
        let args_start = whole.end();

        let (context, source, comment) = match func.as_str() {
            "tr" | "trUtf8" => {
                // `obj->tr()` is not a translation call lupdate understands.
                if whole.as_str().contains("->") {
                    continue;
                }
                let args = read_literal_args(&text, args_start, 2);
                let Some(Some(source)) = args.first().cloned() else {
                    continue;
                };
                let context = match qual {
                    Some(class) => Some(class.to_string()),
                    None => context_at(&markers, func.start()).map(str::to_string),
                };
                (context, source, args.get(1).cloned().flatten())
            }
            "QT_TR_NOOP" | "QT_TR_NOOP_UTF8" => {
                if qual.is_some() {
                    continue;
                }
                let args = read_literal_args(&text, args_start, 1);
                let Some(Some(source)) = args.first().cloned() else {
                    continue;
                };
                let context = context_at(&markers, func.start()).map(str::to_string);
                (context, source, None)
            }
            "translate" => {
                if !qual.is_some_and(|q| TRANSLATE_RECEIVERS.contains(&q)) {
                    continue;
                }
                let args = read_literal_args(&text, args_start, 3);
                let (Some(Some(context)), Some(Some(source))) =
                    (args.first().cloned(), args.get(1).cloned())
                else {
                    continue;
                };
                (Some(context), source, args.get(2).cloned().flatten())
            }
            "QT_TRANSLATE_NOOP" => {
                if qual.is_some() {
                    continue;
                }
                let args = read_literal_args(&text, args_start, 2);
                let (Some(Some(context)), Some(Some(source))) =
                    (args.first().cloned(), args.get(1).cloned())
                else {
                    continue;
                };
                (Some(context), source, None)
            }
            _ => continue,
        };

        let line = offset_to_line(&line_index, func.start());
        let Some(context) = context else {
            tracing::debug!(
                file = file_path,
                line,
                "tr() call outside of any class, skipping"
            );
            continue;
        };

        let line_start = line_index[line - 1];
        let col = content[line_start..func.start()].chars().count() + 1;
        let source_line = lines.get(line - 1).copied().unwrap_or_default();

        calls.push(TrCall::new(
            MessageKey::new(context, source, comment.as_deref().filter(|c| !c.is_empty())),
            SourceContext::new(SourceLocation::new(file_path, line, col), source_line),
        ));
    }

    calls
}
