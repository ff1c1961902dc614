//! Text codecs: delimited display, JSON, NCCSV and CSV parsing.

use std::fmt::{self, Write as _};

use array_common::ArrayResult;

use crate::buffer::TypedArray;
use crate::kind::Kind;

fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        let _ = write!(out, "\\u{:04x}", unit);
    }
}

/// Backslash-escape text for the delimited display: control characters and
/// everything outside printable ASCII become `\uXXXX`.
pub(crate) fn escape_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => push_unicode_escape(&mut out, c),
        }
    }
    out
}

/// JSON string literal with every non-ASCII character escaped as `\uXXXX`.
pub(crate) fn json_quote(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_owned()).to_string();
    if quoted.is_ascii() {
        return quoted;
    }
    let mut out = String::with_capacity(quoted.len() + 8);
    for c in quoted.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            push_unicode_escape(&mut out, c);
        }
    }
    out
}

/// NCCSV escaping: backslash escapes for control characters, `""` for quotes.
fn nccsv_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\"\""),
            c if c.is_control() => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// NCCSV string value, double-quoted only when it has to be.
pub(crate) fn nccsv_quote(text: &str) -> String {
    let escaped = nccsv_escape(text);
    let needs_quotes = escaped.contains(',')
        || escaped.contains('"')
        || text.starts_with(' ')
        || text.ends_with(' ');
    if needs_quotes {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// NCCSV char attribute: `"'c'"`.
pub(crate) fn nccsv_char(text: &str) -> String {
    format!("\"'{}'\"", nccsv_escape(text))
}

/// Decode backslash escapes inside a quoted CSV item.
fn unescape(raw: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut buf = [0u16; 2];
    while let Some(c) = chars.next() {
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        match chars.next() {
            Some('n') => units.push('\n' as u16),
            Some('r') => units.push('\r' as u16),
            Some('t') => units.push('\t' as u16),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u16::from_str_radix(&hex, 16) {
                    Ok(unit) if hex.len() == 4 => units.push(unit),
                    _ => units.extend("\\u".encode_utf16().chain(hex.encode_utf16())),
                }
            }
            Some(other) => units.extend_from_slice(other.encode_utf16(&mut buf)),
            None => units.push('\\' as u16),
        }
    }
    String::from_utf16_lossy(&units)
}

/// Split comma-separated values. Unquoted items are trimmed; double-quoted
/// items keep their spacing, use `""` for a quote and may hold backslash
/// escapes. Blank input yields no items.
pub fn split_csv(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    if text.trim().is_empty() {
        return items;
    }

    let mut chars = text.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let quoted = chars.peek() == Some(&'"');
        let mut item = String::new();
        if quoted {
            chars.next();
            let mut raw = String::new();
            while let Some(c) = chars.next() {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        raw.push('"');
                    }
                    '"' => break,
                    '\\' => {
                        raw.push('\\');
                        if let Some(next) = chars.next() {
                            raw.push(next);
                        }
                    }
                    c => raw.push(c),
                }
            }
            item.push_str(&unescape(&raw));
        }

        let mut more = false;
        for c in chars.by_ref() {
            if c == ',' {
                more = true;
                break;
            }
            if !quoted {
                item.push(c);
            }
        }

        items.push(if quoted { item } else { item.trim().to_string() });
        if !more {
            return items;
        }
    }
}

impl<K: Kind> TypedArray<K> {
    /// Parse comma-separated text. Unparseable items are stored as missing.
    pub fn from_csv(text: &str) -> ArrayResult<Self> {
        let items = split_csv(text);
        let mut array = Self::with_capacity(items.len())?;
        for item in &items {
            array.add_string(item)?;
        }
        Ok(array)
    }

    /// JSON literal for one element; missing values are `null`.
    pub fn get_json_string(&self, index: usize) -> ArrayResult<String> {
        let word = self.get_word(index)?;
        Ok(if self.word_is_missing(word) {
            "null".to_string()
        } else {
            K::json_text(word)
        })
    }

    /// Every element as a JSON literal, separated by `", "`.
    pub fn to_json_csv_string(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.iter_words().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if self.word_is_missing(word) {
                out.push_str("null");
            } else {
                out.push_str(&K::json_text(word));
            }
        }
        out
    }

    /// NCCSV data-section text for one element; missing values are empty.
    pub fn get_nccsv_data_string(&self, index: usize) -> ArrayResult<String> {
        let word = self.get_word(index)?;
        Ok(if self.word_is_missing(word) {
            String::new()
        } else {
            K::nccsv_data_text(word)
        })
    }

    /// NCCSV attribute list, e.g. `-128b,0b,127b` or `"'a'","'b'"`.
    pub fn to_nccsv_att_string(&self) -> String {
        self.iter_words()
            .map(K::nccsv_att_text)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `", "`-separated display. Numeric kinds show the stored value even when it
/// is the sentinel; chars are escaped.
impl<K: Kind> fmt::Display for TypedArray<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.iter_words().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&K::display_text(word))?;
        }
        Ok(())
    }
}
