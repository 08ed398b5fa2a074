// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated code marker.
//!
//! The first line of every rendered artifact. Providers use it to skip
//! previously generated files, and lint or coverage tooling uses it to
//! filter generated code.

/// Exact first line of generated artifacts.
pub const GENERATED_MARKER: &str = "// Code generated by docrule. DO NOT EDIT.";

/// Whether `text` starts with the generated marker line.
#[must_use]
pub fn is_generated(text: &str) -> bool {
    text.trim_start_matches('\u{feff}')
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == GENERATED_MARKER)
}
