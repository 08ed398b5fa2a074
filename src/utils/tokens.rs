// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compact token printing.
//!
//! `TokenStream::to_string` separates every token with a space
//! (`Vec < String >`). Member signatures and constant initializers are
//! shown to users and matched by name, so they are printed the way people
//! write them instead.

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Word,
    Lifetime,
    Group,
    Separator,
    Colon,
    Operator,
    Punct
}

/// Print `tokens` compactly.
pub fn tidy(tokens: impl ToTokens) -> String {
    let mut out = String::new();
    write_stream(tokens.to_token_stream(), &mut out);
    out
}

fn write_stream(stream: TokenStream, out: &mut String) {
    let mut prev = Prev::Start;
    let mut lifetime_tick = false;

    for tree in stream {
        match tree {
            TokenTree::Ident(ident) => {
                if matches!(
                    prev,
                    Prev::Word | Prev::Lifetime | Prev::Group | Prev::Separator | Prev::Colon | Prev::Operator
                ) {
                    out.push(' ');
                }
                out.push_str(&ident.to_string());
                prev = if lifetime_tick { Prev::Lifetime } else { Prev::Word };
                lifetime_tick = false;
            }
            TokenTree::Literal(literal) => {
                if matches!(
                    prev,
                    Prev::Word | Prev::Lifetime | Prev::Group | Prev::Separator | Prev::Colon | Prev::Operator
                ) {
                    out.push(' ');
                }
                out.push_str(&literal.to_string());
                prev = Prev::Word;
            }
            TokenTree::Punct(punct) => {
                let c = punct.as_char();
                let operator = matches!(c, '=' | '+') && prev != Prev::Punct;
                if operator && prev != Prev::Start {
                    out.push(' ');
                } else if prev == Prev::Lifetime && !matches!(c, ',' | '>' | ';') {
                    out.push(' ');
                }
                out.push(c);
                lifetime_tick = c == '\'' && punct.spacing() == Spacing::Joint;
                prev = match (c, punct.spacing()) {
                    (',' | ';', _) => Prev::Separator,
                    (':', Spacing::Alone) if prev != Prev::Punct => Prev::Colon,
                    ('=' | '+', Spacing::Alone) => Prev::Operator,
                    (_, Spacing::Joint) => Prev::Punct,
                    _ if operator => Prev::Operator,
                    _ => Prev::Punct
                };
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{ ", " }"),
                    Delimiter::None => ("", "")
                };
                let spaced = match group.delimiter() {
                    Delimiter::Brace => prev != Prev::Start,
                    _ => matches!(
                        prev,
                        Prev::Lifetime | Prev::Separator | Prev::Colon | Prev::Operator
                    )
                };
                if spaced {
                    out.push(' ');
                }
                out.push_str(open);
                write_stream(group.stream(), out);
                out.push_str(close);
                prev = Prev::Group;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(input: &str) -> String {
        let ty: syn::Type = syn::parse_str(input).unwrap();
        tidy(&ty)
    }

    fn expr(input: &str) -> String {
        let expr: syn::Expr = syn::parse_str(input).unwrap();
        tidy(&expr)
    }

    #[test]
    fn generic_types() {
        assert_eq!(ty("Vec < String >"), "Vec<String>");
        assert_eq!(ty("HashMap<String, Vec<u8>>"), "HashMap<String, Vec<u8>>");
        assert_eq!(ty("std :: collections :: BTreeMap<K,V>"), "std::collections::BTreeMap<K, V>");
    }

    #[test]
    fn references_and_lifetimes() {
        assert_eq!(ty("&'a str"), "&'a str");
        assert_eq!(ty("Option<&'static [u8]>"), "Option<&'static [u8]>");
        assert_eq!(ty("Cow<'a, str>"), "Cow<'a, str>");
        assert_eq!(ty("&mut Vec<u8>"), "&mut Vec<u8>");
    }

    #[test]
    fn arrays_and_tuples() {
        assert_eq!(ty("[u8; 32]"), "[u8; 32]");
        assert_eq!(ty("(u8, String)"), "(u8, String)");
    }

    #[test]
    fn literal_expressions() {
        assert_eq!(expr(r#""pending""#), r#""pending""#);
        assert_eq!(expr(r#"Status("active")"#), r#"Status("active")"#);
        assert_eq!(expr("1 + 2"), "1 + 2");
        assert_eq!(expr("-1"), "-1");
    }
}
