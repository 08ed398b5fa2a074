// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use super::user::User;

/// docrule:@generate
pub struct Account {
    /// docrule:@nested
    pub owner: User,
    /// docrule:@min(1)
    /// docrule:@max(10)
    pub seats: u8
}

include!("account_docrule.rs");
