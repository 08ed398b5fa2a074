// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// docrule:@generate
pub struct Order {
    /// docrule:@one_of(pending, active, completed)
    pub status: String,
    /// docrule:@duration
    /// docrule:@duration_min(1s)
    /// docrule:@duration_max(1h)
    pub timeout: String,
    /// docrule:@dive(email=)
    pub contacts: Vec<String>
}

include!("order_docrule.rs");
