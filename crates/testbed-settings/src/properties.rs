//! Reader for flat `key=value` property files.
//!
//! Follows the usual property-file conventions:
//!
//! - `#` and `!` start comment lines
//! - keys end at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\<c>` for any other `c`
//!
//! Parsing never fails: malformed `\u` escapes are kept literally.

use std::collections::BTreeMap;

/// Whitespace as understood by property files.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parsed property-file contents. Later duplicate keys override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Parses property-file text.
    pub fn parse(text: &str) -> Self {
        let entries = logical_lines(text)
            .iter()
            .map(|line| split_key_value(line))
            .collect();
        Self { entries }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Joins continuation lines and drops blank and comment lines.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for natural in normalized.split('\n') {
        let trimmed = natural.trim_start_matches(is_blank);
        if !continuing && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.push_str(trimmed);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }
    if continuing {
        lines.push(current);
    }
    lines
}

fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();

    let mut key_end = chars.len();
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    (unescape(&chars[..key_end]), unescape(&chars[value_start..]))
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escape) = chars.get(i) else {
            break;
        };
        i += 1;
        match escape {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'u' => match hex_unit(chars, i) {
                Some(unit) => {
                    i += 4;
                    out.push(decode_unit(unit, chars, &mut i));
                }
                None => out.push_str("\\u"),
            },
            other => out.push(other),
        }
    }
    out
}

/// Reads four hex digits starting at `at`.
fn hex_unit(chars: &[char], at: usize) -> Option<u32> {
    let digits = chars.get(at..at + 4)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

/// Decodes a UTF-16 unit, consuming a following `\uXXXX` low surrogate if
/// `unit` is a high surrogate.
fn decode_unit(unit: u32, chars: &[char], i: &mut usize) -> char {
    let followed_by_escape = chars.get(*i) == Some(&'\\') && chars.get(*i + 1) == Some(&'u');
    if (0xD800..0xDC00).contains(&unit) && followed_by_escape {
        let low = hex_unit(chars, *i + 2).filter(|low| (0xDC00..0xE000).contains(low));
        if let Some(low) = low {
            *i += 6;
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
    }
    char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)
}
