// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `enum` over a constant group, `eq` on booleans, `pattern` statics.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub &'static str);

pub const PENDING: Status = Status("pending");
pub const ACTIVE: Status = Status("active");

/// docrule:@generate
pub struct Order {
    /// docrule:@enum
    pub status:   Status,
    /// docrule:@eq(true)
    pub accepted: bool,
    /// docrule:@pattern(re="^[A-Z]{3}-[0-9]+$")
    pub code:     String
}

include!("../generated/constant_groups_docrule.rs");

fn main() {
    let mut order = Order {
        status:   ACTIVE,
        accepted: true,
        code:     "ABC-42".to_string()
    };
    assert!(order.validate().is_ok());

    order.status = Status("lost");
    order.accepted = false;
    order.code = "abc".to_string();
    let errors = order.validate().unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["status", "accepted", "code"]);
}
