// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// docrule:@generate
pub struct User {
    /// docrule:@required
    /// docrule:@min_len(3)
    pub name: String,
    /// docrule:@max_len(4)
    pub nick: Option<String>
}

include!("user_docrule.rs");
