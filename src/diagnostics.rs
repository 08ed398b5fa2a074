// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured diagnostics.
//!
//! Every semantic problem found while checking directives is reported as a
//! [`Diagnostic`] rather than an `Err`. The [`Diagnostics`] collector keeps
//! records in insertion order, which already follows the
//! declaration → member → directive traversal order.
//!
//! # Code Space
//!
//! | Code | Default severity | Meaning |
//! |------|------------------|---------|
//! | `missing-parameter` | error | directive needs an argument it did not get |
//! | `parameter-mismatch` | error | argument has the wrong type or shape |
//! | `inapplicable-directive` | error | directive cannot apply to the member's type |
//! | `capability-not-found` | error | nested method or value set does not exist |
//! | `malformed-pattern` | error | auxiliary regular expression does not compile |
//! | `empty-value-set` | error | enumerated value set has no values |
//! | `conflicting-bounds` | warning | a minimum is greater than a maximum |
//! | `unknown-directive` | info | no rule is registered under this name |
//! | `format-failure` | warning | generated source could not be formatted |

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Tag attached to every diagnostic this crate produces.
pub const TOOL: &str = "docrule";

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the hosting run fail.
    Error,
    /// Reported, never fails a run.
    Warning,
    /// Forward-compatibility notes.
    Info
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info"
        })
    }
}

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DiagnosticCode {
    /// Directive needs an argument it did not get.
    MissingParameter,
    /// Argument has the wrong type or shape.
    ParameterMismatch,
    /// Directive does not apply to the member's classification.
    InapplicableDirective,
    /// Referenced nested method or enumerated value set was not found.
    CapabilityNotFound,
    /// Auxiliary pattern text is not a valid regular expression.
    MalformedPattern,
    /// Enumerated value set is empty.
    EmptyValueSet,
    /// A minimum bound exceeds the matching maximum.
    ConflictingBounds,
    /// No rule is registered under the directive name.
    UnknownDirective,
    /// Rendered source could not be formatted.
    FormatFailure
}

impl DiagnosticCode {
    /// The stable string form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "missing-parameter",
            Self::ParameterMismatch => "parameter-mismatch",
            Self::InapplicableDirective => "inapplicable-directive",
            Self::CapabilityNotFound => "capability-not-found",
            Self::MalformedPattern => "malformed-pattern",
            Self::EmptyValueSet => "empty-value-set",
            Self::ConflictingBounds => "conflicting-bounds",
            Self::UnknownDirective => "unknown-directive",
            Self::FormatFailure => "format-failure"
        }
    }
}

impl From<DiagnosticCode> for &'static str {
    fn from(code: DiagnosticCode) -> Self {
        code.as_str()
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location in a source file. Lines and columns are 1-based; zero means
/// unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Source file the location points into.
    pub file:   PathBuf,
    /// 1-based line.
    pub line:   usize,
    /// 1-based column.
    pub column: usize
}

impl Position {
    /// Create a position.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// One positioned, severity-tagged record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Tool that produced the record.
    pub source:   &'static str,
    /// Severity.
    pub severity: Severity,
    /// Stable code.
    pub code:     DiagnosticCode,
    /// Human readable message.
    pub message:  String,
    /// Where the problem is.
    pub position: Position
}

impl Diagnostic {
    /// Whether this record should fail a run.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}[{}/{}]: {}",
            self.position, self.severity, self.source, self.code, self.message
        )
    }
}

/// Accumulates diagnostics in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a record with an explicit severity.
    pub fn push(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        position: &Position,
        message: impl Into<String>
    ) {
        self.items.push(Diagnostic {
            source: TOOL,
            severity,
            code,
            message: message.into(),
            position: position.clone()
        });
    }

    /// Record an error.
    pub fn error(&mut self, code: DiagnosticCode, position: &Position, message: impl Into<String>) {
        self.push(Severity::Error, code, position, message);
    }

    /// Record an error from format arguments.
    pub fn error_fmt(&mut self, code: DiagnosticCode, position: &Position, args: fmt::Arguments<'_>) {
        self.push(Severity::Error, code, position, args.to_string());
    }

    /// Record a warning.
    pub fn warning(
        &mut self,
        code: DiagnosticCode,
        position: &Position,
        message: impl Into<String>
    ) {
        self.push(Severity::Warning, code, position, message);
    }

    /// Record a warning from format arguments.
    pub fn warning_fmt(
        &mut self,
        code: DiagnosticCode,
        position: &Position,
        args: fmt::Arguments<'_>
    ) {
        self.push(Severity::Warning, code, position, args.to_string());
    }

    /// Record an informational note.
    pub fn info(&mut self, code: DiagnosticCode, position: &Position, message: impl Into<String>) {
        self.push(Severity::Info, code, position, message);
    }

    /// Merge records from a sub-collector, keeping their order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(other);
    }

    /// Whether any error-severity record was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Borrow the records collected so far.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Final list in insertion order.
    #[must_use]
    pub fn collect(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
