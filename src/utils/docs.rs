// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation and comment extraction.
//!
//! Directives live in two places:
//!
//! - doc comments (`///`, `/** */`), which syn keeps as `#[doc = "..."]`
//!   attributes;
//! - plain `//` comments next to a field, which syn drops, so they are read
//!   back from the raw source lines.
//!
//! ```rust,ignore
//! pub struct User {
//!     /// Display name.
//!     /// docrule:@required
//!     // docrule:@min_len(3)
//!     pub name: String, // docrule:@max_len(64)
//! }
//! ```

use syn::Attribute;

/// Extract doc comments from attributes.
///
/// Combines all `#[doc = "..."]` attributes into a single string, trimming
/// each line. Returns an empty string when there are none.
pub fn extract_doc_comments(attrs: &[Attribute]) -> String {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .collect();

    doc_lines
        .iter()
        .flat_map(|block| block.lines())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Plain comment block directly above line `line` (1-based).
///
/// Walks upward over `//` lines, stepping over doc comments and
/// single-line attributes, and stops at the first other line.
pub fn leading_comment(lines: &[&str], line: usize) -> String {
    let mut collected = Vec::new();
    let mut index = line.saturating_sub(1);

    while index > 0 {
        index -= 1;
        let text = lines.get(index).map_or("", |l| l.trim());
        if text.starts_with("///") || text.starts_with("//!") || is_attribute_line(text) {
            continue;
        }
        match text.strip_prefix("//") {
            Some(comment) => collected.push(comment.trim()),
            None => break
        }
    }

    collected.reverse();
    collected.join("\n")
}

/// Trailing `//` comment on line `line` (1-based).
pub fn trailing_comment(lines: &[&str], line: usize) -> String {
    let Some(text) = line.checked_sub(1).and_then(|i| lines.get(i)) else {
        return String::new();
    };

    let mut in_string = false;
    let mut escaped = false;
    let mut previous = '\0';
    for (index, c) in text.char_indices() {
        if in_string {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '/' && previous == '/' {
            let rest = &text[index + 1..];
            // A `///` here would be a doc comment on the next item.
            if rest.starts_with('/') {
                return String::new();
            }
            return rest.trim().to_string();
        }
        previous = if in_string { '\0' } else { c };
    }

    String::new()
}

fn is_attribute_line(text: &str) -> bool {
    text.starts_with("#[") && text.ends_with(']')
}
