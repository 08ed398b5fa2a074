// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fatal errors.
//!
//! Only input that cannot be loaded at all is an error. Everything the
//! engine can keep going past is a [`Diagnostic`](crate::Diagnostic).

use std::path::PathBuf;

/// A compilation unit could not be loaded.
///
/// Aborts the run; no artifacts are produced for the unit.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source file could not be read.
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        /// File that failed.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error
    },

    /// The source file is not valid Rust.
    #[error("failed to parse `{}`: {source}", path.display())]
    Parse {
        /// File that failed.
        path:   PathBuf,
        /// Parser error with location.
        #[source]
        source: syn::Error
    }
}

impl SourceError {
    /// File the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io {
                path, ..
            }
            | Self::Parse {
                path, ..
            } => path
        }
    }
}
