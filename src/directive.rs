// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Directive parsing.
//!
//! Extracts structured directives from free documentation text.
//!
//! # Grammar
//!
//! ```text
//! directive := namespace ":@" name [ "(" [ arg { "," arg } ] ")" ]
//! arg       := value | key "=" value
//! value     := bare-token | '"' text '"' | "'" text "'"
//! ```
//!
//! Bare tokens stop at `,`, `=` and `)`. Quoted text may contain any of
//! those; the active quote and the backslash itself are escaped with a
//! backslash. Other backslash sequences are kept as written so regular
//! expressions survive: `"\d+"` reads as `\d+`, `"a\\b"` as `a\b`.
//!
//! # Example
//!
//! ```rust,ignore
//! /// Display name.
//! ///
//! /// docrule:@required
//! /// docrule:@min_len(3)
//! /// docrule:@pattern(re="^[a-z]+(, [a-z]+)*$")
//! pub name: String,
//! ```
//!
//! # Recovery
//!
//! Parsing never fails. An unterminated quote keeps the rest of the list
//! as a raw token, junk after a closing quote turns the whole argument
//! into its raw text, and a list without `)` runs to the end of the text.

use std::collections::BTreeMap;
use std::fmt;

/// One directive found in documentation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Tool namespace before `:@`.
    pub namespace:  String,
    /// Directive name after `:@`.
    pub name:       String,
    /// Positional arguments in source order.
    pub positional: Vec<String>,
    /// Keyed arguments.
    pub keyed:      BTreeMap<String, String>,
    /// Matched source text.
    pub raw:        String
}

impl Directive {
    /// Build a directive without source text.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let mut directive = Self {
            namespace:  namespace.into(),
            name:       name.into(),
            positional: Vec::new(),
            keyed:      BTreeMap::new(),
            raw:        String::new()
        };
        directive.raw = directive.to_string();
        directive
    }

    /// Add a positional argument.
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self.raw = self.to_string();
        self
    }

    /// Add a keyed argument.
    #[must_use]
    pub fn with_keyed(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyed.insert(key.into(), value.into());
        self.raw = self.to_string();
        self
    }

    /// Positional argument at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Keyed argument value.
    #[must_use]
    pub fn key(&self, key: &str) -> Option<&str> {
        self.keyed.get(key).map(String::as_str)
    }

    /// First positional argument, or the keyed value under `key`.
    ///
    /// Lets `min_len(3)` and `min_len(n=3)` read the same.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.arg(0).or_else(|| self.key(key))
    }

    /// Whether the directive carries any argument.
    #[must_use]
    pub fn has_args(&self) -> bool {
        !self.positional.is_empty() || !self.keyed.is_empty()
    }

    /// Compare namespace, name and arguments, ignoring the source text.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.positional == other.positional
            && self.keyed == other.keyed
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:@{}", self.namespace, self.name)?;
        if !self.has_args() {
            return Ok(());
        }

        f.write_str("(")?;
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            f.write_str(&quote_value(value))?;
        }
        for (key, value) in &self.keyed {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", key, quote_value(value))?;
        }
        f.write_str(")")
    }
}

/// Parse every directive in `text`.
///
/// Matches never overlap and are returned in source order.
#[must_use]
pub fn parse(text: &str) -> Vec<Directive> {
    let mut scanner = Scanner {
        text,
        pos: 0
    };
    let mut found = Vec::new();

    while let Some(directive) = scanner.next_directive() {
        found.push(directive);
    }

    found
}

/// Parse directives and keep those in `namespace`.
#[must_use]
pub fn parse_namespace(text: &str, namespace: &str) -> Vec<Directive> {
    parse(text)
        .into_iter()
        .filter(|d| d.namespace == namespace)
        .collect()
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Quote `value` when a bare token could not carry it.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value != value.trim()
        || value
            .chars()
            .any(|c| matches!(c, ',' | '=' | ')' | '"' | '\'') || c.is_control());

    if !needs_quotes {
        return value.to_string();
    }

    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Outcome of reading one value.
struct Value {
    text:   String,
    quoted: bool
}

struct Scanner<'a> {
    text: &'a str,
    pos:  usize
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn next_directive(&mut self) -> Option<Directive> {
        loop {
            let marker = self.pos + self.text[self.pos..].find(":@")?;

            let namespace_start = self.namespace_start(marker);
            let name_start = marker + 2;
            let name_end = name_start
                + self.text[name_start..]
                    .find(|c: char| !is_name_char(c))
                    .unwrap_or(self.text.len() - name_start);

            let name = &self.text[name_start..name_end];
            let namespace = &self.text[namespace_start..marker];

            if namespace.is_empty() || name.is_empty() || !name.starts_with(is_ident_start) {
                self.pos = name_start;
                continue;
            }

            let mut directive = Directive {
                namespace:  namespace.to_string(),
                name:       name.to_string(),
                positional: Vec::new(),
                keyed:      BTreeMap::new(),
                raw:        String::new()
            };

            self.pos = name_end;
            if self.peek() == Some('(') {
                self.bump();
                self.parse_args(&mut directive);
            }

            directive.raw = self.text[namespace_start..self.pos].to_string();
            return Some(directive);
        }
    }

    /// Walk back from `marker` over namespace characters, never crossing
    /// the end of the previous match.
    fn namespace_start(&self, marker: usize) -> usize {
        let mut start = marker;
        for (index, c) in self.text[self.pos..marker].char_indices().rev() {
            if !is_namespace_char(c) {
                break;
            }
            start = self.pos + index;
        }

        // The namespace has to begin like an identifier.
        while start < marker && !self.text[start..].starts_with(is_ident_start) {
            start += self.text[start..].chars().next().map_or(1, char::len_utf8);
        }
        start
    }

    fn parse_args(&mut self, directive: &mut Directive) {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return,
                Some(')') => {
                    self.bump();
                    return;
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                _ => {}
            }

            self.parse_arg(directive);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.bump(),
                Some(')') => {
                    self.bump();
                    return;
                }
                None => return,
                // A stray character after a value; skip it and keep going.
                Some(_) => self.bump()
            }
        }
    }

    fn parse_arg(&mut self, directive: &mut Directive) {
        if matches!(self.peek(), Some('"' | '\'')) {
            let value = self.parse_quoted();
            directive.positional.push(value.text);
            return;
        }

        let token = self.take_bare(&[',', '=', ')']);
        if self.peek() == Some('=') {
            self.bump();
            self.skip_whitespace();
            let value = if matches!(self.peek(), Some('"' | '\'')) {
                self.parse_quoted()
            } else {
                Value {
                    // An `=` inside a bare value is kept as written.
                    text:   self.take_bare(&[',', ')']),
                    quoted: false
                }
            };
            if !token.is_empty() {
                directive.keyed.insert(token, value.text);
            } else if value.quoted || !value.text.is_empty() {
                directive.positional.push(value.text);
            }
            return;
        }

        if !token.is_empty() {
            directive.positional.push(token);
        }
    }

    /// Read up to one of `stops` and trim.
    fn take_bare(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                break;
            }
            self.bump();
        }
        self.text[start..self.pos].trim().to_string()
    }

    /// Read a quoted value starting at the opening quote.
    fn parse_quoted(&mut self) -> Value {
        let start = self.pos;
        let Some(quote) = self.peek() else {
            return Value {
                text:   String::new(),
                quoted: false
            };
        };
        self.bump();

        let mut text = String::new();
        let mut closed = false;
        while let Some(c) = self.peek() {
            self.bump();
            if c == '\\'
                && let Some(next) = self.peek()
                && (next == quote || next == '\\')
            {
                text.push(next);
                self.bump();
            } else if c == quote {
                closed = true;
                break;
            } else {
                text.push(c);
            }
        }

        if !closed {
            // Unterminated: keep everything up to the list's `)` as written.
            let end = self.text[start..]
                .find(')')
                .map_or(self.text.len(), |offset| start + offset);
            self.pos = end;
            return Value {
                text:   self.text[start..end].trim().to_string(),
                quoted: false
            };
        }

        let after_quote = self.pos;
        self.skip_whitespace();
        match self.peek() {
            None | Some(',' | ')') => Value {
                text,
                quoted: true
            },
            Some(_) => {
                // Junk after the closing quote: fall back to the raw text.
                self.pos = after_quote;
                self.take_bare(&[',', ')']);
                Value {
                    text:   self.text[start..self.pos].trim().to_string(),
                    quoted: false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
