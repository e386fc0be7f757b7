//! `.properties` resource file parser.
//!
//! Follows the usual properties grammar: `#`/`!` comment lines, `=`, `:` or
//! whitespace as key/value separator, trailing-backslash line continuation
//! and `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes. Commas carry no meaning, so
//! `a=x,y` has the single value `x,y`.
//!
//! Every entry remembers the physical line its assignment starts on, which
//! makes this parser usable as a line index on its own.

use std::{borrow::Cow, fs, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use thiserror::Error;

use super::line_index::LineIndex;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("malformed \\uxxxx encoding: \"\\u{0}\"")]
    MalformedUnicode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    #[error("malformed escape sequence on line {line}")]
    Escape {
        line: usize,
        #[source]
        source: EscapeError,
    },
}

/// A decoded value together with the 1-based line its assignment begins on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub value: String,
    pub line: usize,
}

/// Decoded key/value pairs of one file, in first-definition order.
///
/// A key defined twice keeps its first position but takes the later
/// value and line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, PropertyEntry>,
}

impl Properties {
    pub fn get(&self, key: &str) -> Option<&PropertyEntry> {
        self.entries.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, line: usize) {
        self.entries.insert(
            key.into(),
            PropertyEntry {
                value: value.into(),
                line,
            },
        );
    }

    /// Key to line mapping taken straight from the parsed entries.
    pub fn line_index(&self) -> LineIndex {
        self.iter().map(|(k, e)| (k.to_string(), e.line)).collect()
    }
}

/// Raw text and parsed entries of one resource file.
#[derive(Debug)]
pub struct ResourceFile {
    pub content: String,
    pub properties: Properties,
}

pub fn parse_properties_file(path: &Path) -> Result<ResourceFile> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read resource file: {:?}", path))?;
    let content = decode_content(&bytes).into_owned();
    let properties = parse_properties(&content)
        .with_context(|| format!("Failed to parse resource file: {:?}", path))?;
    Ok(ResourceFile {
        content,
        properties,
    })
}

/// Decode file bytes as UTF-8, or as ISO-8859-1 when they are not valid UTF-8.
pub fn decode_content(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix(UTF8_BOM).unwrap_or(text)),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

pub fn parse_properties(content: &str) -> Result<Properties, PropertiesError> {
    let mut properties = Properties::default();

    for logical in logical_lines(content) {
        let (raw_key, raw_value) = split_key_value(&logical.text);
        let line = logical.line;
        let key = unescape(raw_key).map_err(|source| PropertiesError::Escape { line, source })?;
        let value =
            unescape(raw_value).map_err(|source| PropertiesError::Escape { line, source })?;
        properties.insert(key, value, line);
    }

    Ok(properties)
}

/// Split text into physical lines on `\n`, `\r\n` or `\r`.
///
/// A trailing terminator does not produce an extra empty line.
pub(crate) fn physical_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&content[start..]);
    }

    lines
}

/// One assignment with continuation lines already joined.
struct LogicalLine {
    /// Physical line the assignment starts on.
    line: usize,
    text: String,
}

fn logical_lines(content: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut lines = physical_lines(content).into_iter().enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }

        let mut text = String::new();
        let mut current = trimmed;
        loop {
            if !has_continuation(current) {
                text.push_str(current);
                break;
            }
            text.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(is_blank),
                None => break,
            }
        }
        // a lone continuation backslash leaves nothing to assign
        if text.is_empty() {
            continue;
        }

        result.push(LogicalLine {
            line: index + 1,
            text,
        });
    }

    result
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// An odd number of trailing backslashes continues the line.
fn has_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

/// Split a logical line into its still-escaped key and value.
fn split_key_value(text: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = text.len();
    let mut value_start = text.len();
    let mut has_separator = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            _ => {}
        }
    }

    let mut value = text[value_start..].trim_start_matches(is_blank);
    if !has_separator && let Some(rest) = value.strip_prefix(['=', ':']) {
        value = rest.trim_start_matches(is_blank);
    }

    (&text[..key_end], value)
}

/// Resolve properties escape sequences.
///
/// Unknown escapes drop the backslash (`\=` becomes `=`). Consecutive
/// `\uXXXX` escapes are read as UTF-16, so surrogate pairs decode to a single
/// character; an unpaired surrogate becomes U+FFFD.
pub fn unescape(raw: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_utf16(&mut units, &mut out);
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(EscapeError::MalformedUnicode(hex));
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|_| EscapeError::MalformedUnicode(hex.clone()))?;
                units.push(unit);
            }
            Some(other) => {
                flush_utf16(&mut units, &mut out);
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\u{c}',
                    other => other,
                });
            }
            None => {}
        }
    }
    flush_utf16(&mut units, &mut out);

    Ok(out)
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
