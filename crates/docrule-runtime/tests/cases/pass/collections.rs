// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `dive` over maps and lists of nested values, `required` on options.

use std::collections::BTreeMap;

use docrule_runtime::Validate;

/// docrule:@generate
pub struct Address {
    /// docrule:@required
    pub city: String
}

/// docrule:@generate
pub struct Book {
    /// docrule:@required
    pub owner:     Option<Address>,
    /// docrule:@dive
    pub addresses: BTreeMap<String, Address>,
    /// docrule:@dive
    pub history:   Vec<Option<Address>>,
    /// docrule:@dive(min=1)
    pub scores:    Vec<u32>
}

include!("../generated/collections_docrule.rs");

fn main() {
    let empty = Address {
        city: String::new()
    };
    let mut addresses = BTreeMap::new();
    addresses.insert(
        "home".to_string(),
        Address {
            city: String::new()
        }
    );

    let book = Book {
        owner: None,
        addresses,
        history: vec![None, Some(empty)],
        scores: vec![3, 0]
    };
    let errors = Validate::validate(&book).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        ["owner", "addresses[home].city", "history[1].city", "scores[1]"]
    );
}
