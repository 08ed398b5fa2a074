// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code emission.
//!
//! A [`GeneratedUnit`] buffers the statements of one output artifact and
//! owns its module alias table. Rules print lines made of [`Token`]s;
//! references to other modules are bound to a local alias on first use and
//! rendered as one sorted block of `use` items.
//!
//! # Aliases
//!
//! | Reference | Printed as |
//! |-----------|------------|
//! | own module | bare symbol |
//! | `crate::api::v3` (first) | `v3::Symbol`, `use crate::api::v3;` |
//! | `crate::legacy::v3` (second) | `v3_2::Symbol`, `use crate::legacy::v3 as v3_2;` |
//! | `regex` | `regex::Symbol`, no `use` needed |
//! | `crate`, `super::super` | fully qualified, never bound |
//!
//! # Rendering
//!
//! ```text
//! // Code generated by docrule. DO NOT EDIT.
//!
//! use std::time;                 sorted by module path
//! static EMAIL_PATTERN: ...;     one static per pattern source
//! impl User { ... }              buffered body
//! ```
//!
//! Everything after the marker goes through `prettyplease`. When the text
//! does not parse, the raw text is returned with the parser error.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::utils::marker::GENERATED_MARKER;

/// One piece of a printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text.
    Text(String),
    /// Symbol qualified by the module that declares it.
    Ref {
        /// Module path, e.g. `std::time`.
        module: String,
        /// Symbol inside the module.
        symbol: String
    }
}

impl Token {
    /// Literal text token.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Qualified reference token.
    #[must_use]
    pub fn reference(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::Ref {
            module: module.into(),
            symbol: symbol.into()
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Regular expression a rule needs as a shared static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryPattern {
    /// Static item name, e.g. `EMAIL_PATTERN`.
    pub name:    String,
    /// Regular expression source.
    pub pattern: String
}

impl AuxiliaryPattern {
    /// Create a pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            pattern: pattern.into()
        }
    }
}

/// Rendered artifact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Artifact contents, starting with the generated marker.
    pub text:         String,
    /// Formatter error when `text` is the unformatted fallback.
    pub format_error: Option<String>
}

/// Buffered output of one artifact.
#[derive(Debug, Clone, Default)]
pub struct GeneratedUnit {
    own_module: String,
    statements: Vec<String>,
    bindings:   BTreeMap<String, String>,
    taken:      HashMap<String, String>,
    pinned:     HashMap<String, String>,
    statics:    Vec<(AuxiliaryPattern, String)>,
    skip:       bool
}

impl GeneratedUnit {
    /// Empty unit for an artifact belonging to `own_module`.
    #[must_use]
    pub fn new(own_module: impl Into<String>) -> Self {
        Self {
            own_module: own_module.into(),
            ..Self::default()
        }
    }

    /// Module the artifact belongs to.
    #[must_use]
    pub fn own_module(&self) -> &str {
        &self.own_module
    }

    /// Append one line built from `tokens`.
    pub fn print<I>(&mut self, tokens: I)
    where
        I: IntoIterator,
        I::Item: Into<Token>
    {
        let mut line = String::new();
        for token in tokens {
            match token.into() {
                Token::Text(text) => line.push_str(&text),
                Token::Ref {
                    module,
                    symbol
                } => line.push_str(&self.qualify(&module, &symbol))
            }
        }
        self.statements.push(line);
    }

    /// Append one line of literal text.
    pub fn line(&mut self, text: impl Into<String>) {
        self.statements.push(text.into());
    }

    /// Buffered lines.
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Drop lines printed after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.statements.truncate(len);
    }

    /// Insert a line before position `at`.
    pub fn insert_line(&mut self, at: usize, text: impl Into<String>) {
        let at = at.min(self.statements.len());
        self.statements.insert(at, text.into());
    }

    /// Whether nothing has been printed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Use `alias` for `module` instead of deriving it.
    ///
    /// Takes effect on the first reference to `module`; a module that is
    /// already bound keeps its alias.
    pub fn pin_alias(&mut self, module: impl Into<String>, alias: impl Into<String>) {
        self.pinned.insert(module.into(), alias.into());
    }

    /// Printable form of `symbol` from `module`, binding an alias if needed.
    pub fn qualify(&mut self, module: &str, symbol: &str) -> String {
        if module == self.own_module || module.is_empty() {
            return symbol.to_string();
        }
        if is_unbindable(module) {
            return format!("{module}::{symbol}");
        }
        let alias = self.alias(module);
        format!("{alias}::{symbol}")
    }

    /// Local alias bound to `module`, binding it on first request.
    pub fn alias(&mut self, module: &str) -> String {
        if let Some(alias) = self.bindings.get(module) {
            return alias.clone();
        }

        let base = self
            .pinned
            .get(module)
            .cloned()
            .unwrap_or_else(|| last_segment(module).to_string());
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.get(&candidate).is_some_and(|owner| owner != module) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.taken.insert(candidate.clone(), module.to_string());
        self.bindings.insert(module.to_string(), candidate.clone());
        candidate
    }

    /// Module bindings used so far, keyed by module path.
    #[must_use]
    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    /// Declare `pattern` as a `static` regex of this artifact and return
    /// the name of the static to match against.
    ///
    /// Requests with the same name and source share one static. A name
    /// already bound to a different source gets a `_2`, `_3`, ... suffix.
    pub fn require_pattern(&mut self, pattern: &AuxiliaryPattern, runtime: &str) -> String {
        let mut name = pattern.name.clone();
        let mut n = 1;
        while let Some((existing, _)) = self.statics.iter().find(|(existing, _)| existing.name == name) {
            if existing.pattern == pattern.pattern {
                return name;
            }
            n += 1;
            name = format!("{}_{n}", pattern.name);
        }

        let lazy = self.qualify("std::sync", "LazyLock");
        let regex = self.qualify(&format!("{runtime}::regex"), "Regex");
        let item = format!(
            "static {name}: {lazy}<{regex}> = {lazy}::new(|| {regex}::new({source:?}).expect(\"invalid {name}\"));",
            source = pattern.pattern
        );
        self.statics.push((AuxiliaryPattern::new(name.clone(), pattern.pattern.clone()), item));
        name
    }

    /// Mark the unit as producing no artifact.
    pub fn set_skip(&mut self, skip: bool) {
        self.skip = skip;
    }

    /// Whether the unit produces no artifact.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Render the artifact.
    ///
    /// Returns `None` for skipped units.
    #[must_use]
    pub fn render(&self) -> Option<Rendered> {
        if self.skip {
            return None;
        }

        let mut body = String::new();
        for (module, alias) in &self.bindings {
            let name = last_segment(module);
            if alias == name {
                if module.contains("::") {
                    body.push_str(&format!("use {module};\n"));
                }
            } else {
                body.push_str(&format!("use {module} as {alias};\n"));
            }
        }
        for (_, item) in &self.statics {
            body.push_str(item);
            body.push('\n');
        }
        for statement in &self.statements {
            body.push_str(statement);
            body.push('\n');
        }

        let rendered = match syn::parse_file(&body) {
            Ok(file) => Rendered {
                text:         format!("{GENERATED_MARKER}\n\n{}", prettyplease::unparse(&file)),
                format_error: None
            },
            Err(err) => {
                warn!(module = %self.own_module, error = %err, "generated code failed to format");
                Rendered {
                    text:         format!("{GENERATED_MARKER}\n\n{body}"),
                    format_error: Some(err.to_string())
                }
            }
        };
        Some(rendered)
    }
}

fn last_segment(module: &str) -> &str {
    module.rsplit("::").next().unwrap_or(module)
}

fn is_unbindable(module: &str) -> bool {
    matches!(last_segment(module), "crate" | "self" | "super")
}
