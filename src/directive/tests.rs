// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for directive parsing.

use super::*;

fn single(text: &str) -> Directive {
    let mut found = parse(text);
    assert_eq!(found.len(), 1, "expected one directive in {text:?}, got {found:?}");
    found.remove(0)
}

#[test]
fn bare_directive_has_no_args() {
    let d = single("docrule:@required");
    assert_eq!(d.namespace, "docrule");
    assert_eq!(d.name, "required");
    assert!(!d.has_args());
    assert_eq!(d.raw, "docrule:@required");
}

#[test]
fn positional_args() {
    let d = single("docrule:@one_of(pending, active, completed)");
    assert_eq!(d.positional, ["pending", "active", "completed"]);
    assert!(d.keyed.is_empty());
}

#[test]
fn keyed_and_positional_mix() {
    let d = single("docrule:@nested(inner, method=check)");
    assert_eq!(d.arg(0), Some("inner"));
    assert_eq!(d.key("method"), Some("check"));
}

#[test]
fn quoted_value_keeps_separators() {
    let d = single(r#"docrule:@pattern(re="^[a-z]+(, [a-z]+)*=?$")"#);
    assert_eq!(d.key("re"), Some("^[a-z]+(, [a-z]+)*=?$"));
}

#[test]
fn escaped_quotes_are_unescaped() {
    let d = single(r#"docrule:@eq(v="say \"hi\"")"#);
    assert_eq!(d.key("v"), Some(r#"say "hi""#));

    let d = single(r"docrule:@eq(v='it\'s')");
    assert_eq!(d.key("v"), Some("it's"));
}

#[test]
fn other_backslashes_survive() {
    let d = single(r#"docrule:@pattern(re="^\d+\.\d+$")"#);
    assert_eq!(d.key("re"), Some(r"^\d+\.\d+$"));
}

#[test]
fn escaped_backslashes_are_unescaped() {
    let d = single(r#"docrule:@pattern(re="^a\\b\d$")"#);
    assert_eq!(d.key("re"), Some(r"^a\b\d$"));
    assert_eq!(d.to_string(), r"docrule:@pattern(re=^a\b\d$)");

    let d = single(r#"docrule:@pattern(re="^\d+(, \d+)*$")"#);
    assert_eq!(d.key("re"), Some(r"^\d+(, \d+)*$"));
    assert_eq!(d.to_string(), r#"docrule:@pattern(re="^\\d+(, \\d+)*$")"#);
}

#[test]
fn trailing_backslash_round_trips() {
    let d = single(r"docrule:@suffix(it's\)");
    assert_eq!(d.positional, [r"it's\"]);
    assert_eq!(d.to_string(), r#"docrule:@suffix("it's\\")"#);

    let again = single(&d.to_string());
    assert_eq!(again.positional, [r"it's\"]);
    assert!(d.same_shape(&again));
}

#[test]
fn quoted_positional_value() {
    let d = single(r#"docrule:@contains("a, b")"#);
    assert_eq!(d.positional, ["a, b"]);
}

#[test]
fn whitespace_is_trimmed_and_raw_kept() {
    let found = parse("Length. docrule:@min_len(  3 ) trailing prose");
    assert_eq!(found[0].positional, ["3"]);
    assert_eq!(found[0].raw, "docrule:@min_len(  3 )");
}

#[test]
fn finds_every_directive_in_prose() {
    let text = "User name.\n\ndocrule:@required and also docrule:@max_len(10)\n(docrule:@min_len(2))";
    let names: Vec<_> = parse(text).into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["required", "max_len", "min_len"]);
}

#[test]
fn space_before_paren_means_no_args() {
    let d = single("docrule:@required (see the docs)");
    assert!(!d.has_args());
}

#[test]
fn namespace_filter() {
    let found = parse_namespace("other:@skip docrule:@required", "docrule");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "required");
}

#[test]
fn hyphenated_namespace() {
    let d = single("my-tool:@check");
    assert_eq!(d.namespace, "my-tool");
}

#[test]
fn rejects_incomplete_markers() {
    assert!(parse(":@required").is_empty());
    assert!(parse("docrule:@(3)").is_empty());
    assert!(parse("docrule:@9lives").is_empty());
    assert!(parse("no directives here").is_empty());
}

#[test]
fn empty_list() {
    let d = single("docrule:@one_of()");
    assert!(!d.has_args());
    assert_eq!(d.raw, "docrule:@one_of()");
}

#[test]
fn empty_keyed_value_is_kept() {
    let d = single("docrule:@dive(min_len=3, email=)");
    assert_eq!(d.key("min_len"), Some("3"));
    assert_eq!(d.key("email"), Some(""));
}

#[test]
fn unterminated_quote_falls_back_to_raw_token() {
    let found = parse(r#"docrule:@eq(v="abc) docrule:@required"#);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].key("v"), Some(r#""abc"#));
    assert_eq!(found[1].name, "required");
}

#[test]
fn junk_after_closing_quote_falls_back_to_raw_token() {
    let d = single(r#"docrule:@eq(v="a" b, 2)"#);
    assert_eq!(d.key("v"), Some(r#""a" b"#));
    assert_eq!(d.positional, ["2"]);
}

#[test]
fn missing_close_paren_runs_to_end() {
    let d = single("docrule:@one_of(a, b");
    assert_eq!(d.positional, ["a", "b"]);
}

#[test]
fn value_prefers_positional() {
    let d = Directive::new("docrule", "min_len").with_keyed("n", "4");
    assert_eq!(d.value("n"), Some("4"));
    let d = d.with_arg("2");
    assert_eq!(d.value("n"), Some("2"));
}

#[test]
fn builder_keeps_raw_in_sync() {
    let d = Directive::new("docrule", "one_of").with_arg("a").with_arg("b c");
    assert_eq!(d.raw, "docrule:@one_of(a, b c)");
}

#[test]
fn serialization_round_trips() {
    let inputs = [
        "docrule:@required",
        "docrule:@min_len(3)",
        "docrule:@one_of(pending, active, completed)",
        r#"docrule:@pattern(re="^[a-z]+(, [a-z]+)*$")"#,
        r#"docrule:@eq(v="say \"hi\"")"#,
        r"docrule:@eq(v='it\'s')",
        r#"docrule:@contains(" padded ")"#,
        r#"docrule:@eq(v='mixed "double" quotes')"#,
        "docrule:@dive(min_len=3, email=)",
        "docrule:@nested(method=check)",
        "docrule:@one_of(hello world, x)",
        r#"docrule:@eq("k=v", "a)b")"#,
        r#"docrule:@pattern(re="^\d+\\$")"#,
        r#"docrule:@eq(v="a\\\"b")"#,
        r"docrule:@suffix(tail\)"
    ];

    for input in inputs {
        let first = single(input);
        let again = single(&first.to_string());
        assert!(
            first.same_shape(&again),
            "{input} -> {} -> {again:?}",
            first
        );
    }
}
