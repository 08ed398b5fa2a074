// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities.
//!
//! # Submodules
//!
//! - [`docs`] — doc comment and plain comment extraction
//! - [`marker`] — generated-artifact marker line
//! - [`tokens`] — compact token printing for signatures and literals

pub mod docs;
pub mod marker;
pub mod tokens;
