// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime support for code generated by docrule.
//!
//! Generated `validate` methods collect every failed check into a
//! [`ValidationErrors`] and return it as the error of a `Result`:
//!
//! ```rust
//! use docrule_runtime::{Validate, ValidationErrors};
//!
//! struct User {
//!     name: String
//! }
//!
//! impl Validate for User {
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         let mut errors = ValidationErrors::new();
//!         if self.name.is_empty() {
//!             errors.add("name", "must not be empty");
//!         }
//!         errors.into_result()
//!     }
//! }
//!
//! let err = User { name: String::new() }.validate().unwrap_err();
//! assert_eq!(err.to_string(), "name: must not be empty");
//! ```
//!
//! # Overview
//!
//! - [`ValidationErrors`], [`FieldError`] — collected failures
//! - [`Validate`] — implemented for every generated type
//! - [`parse_duration`] — duration checks
//! - [`one_of`] — string value sets
//! - [`regex`] — re-exported for generated pattern statics

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt;
use std::time::Duration;

/// Re-export for generated `static` patterns.
pub use regex;

/// Types whose values can be checked.
pub trait Validate {
    /// Check the value, returning every failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when at least one check fails.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldError {
    /// Field path, e.g. `address.city` or `tags[2]`.
    pub field:   String,
    /// What went wrong.
    pub message: String
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Failures collected by a `validate` method, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.errors))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    errors: Vec<FieldError>
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure of `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field:   field.into(),
            message: message.into()
        });
    }

    /// Append the failures of a nested value under `prefix`.
    ///
    /// `city` merged under `address` becomes `address.city`; a nested error
    /// without a field takes the prefix as its field.
    pub fn merge(&mut self, prefix: impl Into<String>, nested: ValidationErrors) {
        let prefix = prefix.into();
        self.errors
            .extend(nested.errors.into_iter().map(|error| FieldError {
                field:   match (prefix.is_empty(), error.field.is_empty()) {
                    (true, _) => error.field,
                    (false, true) => prefix.clone(),
                    (false, false) if error.field.starts_with('[') => {
                        format!("{prefix}{}", error.field)
                    }
                    (false, false) => format!("{prefix}.{}", error.field)
                },
                message: error.message
            }));
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failures in check order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Iterate over failures.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Messages recorded for `field`.
    pub fn messages<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Text that is not a duration.
#[derive(Debug, thiserror::Error)]
#[error("invalid duration `{input}`: {source}")]
pub struct DurationError {
    /// Rejected input.
    pub input:  String,
    /// Parser error.
    #[source]
    pub source: humantime::DurationError
}

/// Parse a duration such as `1h 30m`, `500ms` or `2days`.
///
/// # Errors
///
/// Returns [`DurationError`] when `text` is not a duration.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    humantime::parse_duration(text.trim()).map_err(|source| DurationError {
        input: text.to_string(),
        source
    })
}

/// Whether `value` is one of `allowed`.
#[must_use]
pub fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}
