// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Source model providers.
//!
//! A provider turns source files into [`RawUnit`]s: a flat, language-neutral
//! listing of record types, aliases, opaque types, constant runs and method
//! names. The [`Introspector`](crate::Introspector) consumes raw units in
//! two passes to build the [`SourceModel`](crate::SourceModel).
//!
//! # Patterns
//!
//! Providers select units by module path:
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `*` | every unit |
//! | `crate::models` | exactly that module |
//! | `crate::models::*` | that module and everything below it |

mod syn_source;

use std::path::PathBuf;

pub use syn_source::{SynProvider, parse_unit};

use crate::diagnostics::Position;
use crate::error::SourceError;
use crate::model::{ModuleBinding, TypeExpr};

/// Loads raw units for the introspector.
pub trait SourceModelProvider {
    /// Load every unit whose module path matches one of `patterns`.
    ///
    /// An empty pattern list selects everything.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when a selected unit cannot be read or
    /// parsed. The caller must abort the run.
    fn load(&self, patterns: &[&str]) -> Result<Vec<RawUnit>, SourceError>;
}

/// Whether `module_path` is selected by `pattern`.
#[must_use]
pub fn matches_pattern(pattern: &str, module_path: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.strip_suffix("::*") {
        Some(prefix) => {
            module_path == prefix
                || module_path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with("::"))
        }
        None => pattern == module_path
    }
}

/// Whether any pattern selects `module_path`. No patterns select all.
#[must_use]
pub fn matches_any(patterns: &[&str], module_path: &str) -> bool {
    patterns.is_empty() || patterns.iter().any(|p| matches_pattern(p, module_path))
}

/// One compilation unit as loaded by a provider.
#[derive(Debug, Clone, Default)]
pub struct RawUnit {
    /// Module path, e.g. `crate::models`.
    pub module_path: String,
    /// Source file.
    pub path:        PathBuf,
    /// Module bindings in source order.
    pub bindings:    Vec<ModuleBinding>,
    /// Items in source order.
    pub items:       Vec<RawItem>,
    /// Whether the file starts with the generated-artifact marker.
    pub generated:   bool
}

/// Top-level item of a raw unit.
#[derive(Debug, Clone)]
pub enum RawItem {
    /// Type with named members.
    Record(RawRecord),
    /// Type alias.
    Alias(RawAlias),
    /// Type without introspectable members (enum, tuple struct).
    Opaque(RawType),
    /// Consecutive constant declarations.
    Constants(Vec<RawConst>),
    /// Method names declared for a type.
    Methods {
        /// Type the methods belong to.
        type_name: String,
        /// Method names.
        names:     Vec<String>
    }
}

/// Record type with its fields.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Type name.
    pub name:     String,
    /// Documentation text.
    pub doc:      String,
    /// Declaration position.
    pub position: Position,
    /// Fields in source order.
    pub fields:   Vec<RawField>
}

/// Field of a record type.
#[derive(Debug, Clone)]
pub struct RawField {
    /// Field name.
    pub name:      String,
    /// Lowered type.
    pub ty:        TypeExpr,
    /// Type as written.
    pub signature: String,
    /// Documentation text.
    pub doc:       String,
    /// Plain comment text.
    pub comment:   String,
    /// Field position.
    pub position:  Position
}

/// Type alias.
#[derive(Debug, Clone)]
pub struct RawAlias {
    /// Alias name.
    pub name:   String,
    /// Documentation text.
    pub doc:    String,
    /// Aliased type.
    pub target: TypeExpr
}

/// Named type without members.
#[derive(Debug, Clone)]
pub struct RawType {
    /// Type name.
    pub name: String,
    /// Documentation text.
    pub doc:  String
}

/// Constant declaration.
#[derive(Debug, Clone)]
pub struct RawConst {
    /// Constant name.
    pub name:    String,
    /// Type as written; `None` carries the previous constant's type.
    pub ty:      Option<String>,
    /// Initializer as written.
    pub literal: String,
    /// Documentation text.
    pub doc:     String
}
