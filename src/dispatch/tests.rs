// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for directive dispatch.

use super::*;
use crate::diagnostics::{Diagnostic, Severity};
use crate::introspect::Introspector;
use crate::provider::{SourceModelProvider, SynProvider};

fn model(source: &str) -> SourceModel {
    let units = SynProvider::new()
        .with_source("crate::models", "src/models.rs", source)
        .load(&[])
        .unwrap();
    Introspector::default().build(units)
}

fn generate_with(source: &str, config: &Config) -> Vec<String> {
    let model = model(source);
    let registry = RuleRegistry::builtin();
    let dispatcher = Dispatcher::new(&model, &registry, config);
    let mut unit = GeneratedUnit::new("crate::models");
    for declaration in dispatcher.selected() {
        dispatcher.generate_declaration(declaration, &mut unit);
    }
    unit.statements().to_vec()
}

fn generate(source: &str) -> Vec<String> {
    generate_with(source, &Config::default())
}

fn validate(source: &str) -> Vec<Diagnostic> {
    let model = model(source);
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let dispatcher = Dispatcher::new(&model, &registry, &config);
    dispatcher
        .selected()
        .flat_map(|declaration| dispatcher.validate_declaration(declaration))
        .collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

fn position_of(lines: &[String], needle: &str) -> usize {
    lines
        .iter()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("`{needle}` not generated in {lines:#?}"))
}

#[test]
fn generates_method_in_band_order() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct User {
    /// docrule:@min_len(3)
    /// docrule:@required
    pub name: String,
}
"#
    );
    assert_eq!(
        lines,
        [
            "impl User {",
            "pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {",
            "let mut errors = docrule_runtime::ValidationErrors::new();",
            "if self.name.is_empty() {",
            "errors.add(\"name\", \"must not be empty\");",
            "}",
            "if self.name.chars().count() < 3 {",
            "errors.add(\"name\", \"length must be at least 3\");",
            "}",
            "errors.into_result()",
            "}",
            "}",
            "impl docrule_runtime::Validate for User {",
            "fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {",
            "User::validate(self)",
            "}",
            "}",
        ]
    );
}

#[test]
fn statement_order_follows_bands_not_comments() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct Code {
    /// docrule:@suffix(z)
    /// docrule:@pattern(re="^[a-z]+$")
    pub value: String, // docrule:@one_of(abz, xyz)
    // docrule:@max_len(5)
    // docrule:@required
    pub other: String,
}
"#
    );
    let value = [
        position_of(&lines, "docrule_runtime::one_of(&self.value"),
        position_of(&lines, "CODE_VALUE_PATTERN.is_match(&self.value)"),
        position_of(&lines, "self.value.ends_with(\"z\")"),
    ];
    assert!(value.windows(2).all(|pair| pair[0] < pair[1]));

    let other = [
        position_of(&lines, "self.other.is_empty()"),
        position_of(&lines, "self.other.chars().count() > 5"),
    ];
    assert!(other[0] < other[1]);
}

#[test]
fn comment_directives_are_collected_after_doc_directives() {
    let model = model(
        r#"
pub struct User {
    /// docrule:@required
    pub name: String, // docrule:@max_len(8)
}
"#
    );
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let dispatcher = Dispatcher::new(&model, &registry, &config);
    let member = &model.declarations()[0].members[0];
    let names: Vec<String> = dispatcher
        .member_directives(member)
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["required", "max_len"]);
}

#[test]
fn optional_members_are_unwrapped_once() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct User {
    /// docrule:@min_len(3)
    /// docrule:@max_len(9)
    /// docrule:@required
    pub nick: Option<String>,
}
"#
    );
    let start = position_of(&lines, "if self.nick.is_none() {");
    assert_eq!(lines[start + 1], "errors.add(\"nick\", \"is required\");");
    assert_eq!(lines[start + 3], "if let Some(value) = &self.nick {");
    assert_eq!(lines[start + 4], "if value.chars().count() < 3 {");
    assert_eq!(lines[start + 7], "if value.chars().count() > 9 {");
    assert_eq!(lines[start + 10], "}");
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.starts_with("if let Some(value)"))
            .count(),
        1
    );
}

#[test]
fn numeric_checks_deref_unwrapped_values() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct Limits {
    /// docrule:@min(1)
    pub retries: Option<u8>,
    /// docrule:@max(0.5)
    pub ratio: f64,
}
"#
    );
    position_of(&lines, "if *value < 1 {");
    position_of(&lines, "if self.ratio > 0.5 {");
}

#[test]
fn fused_duration_parses_once() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct Job {
    /// docrule:@duration_max(1h)
    /// docrule:@duration
    /// docrule:@duration_min(1s)
    pub timeout: String,
}
"#
    );
    assert_eq!(lines.iter().filter(|l| l.contains("parse_duration(")).count(), 1);
    let min = position_of(&lines, "if parsed < time::Duration::new(1, 0) {");
    let max = position_of(&lines, "if parsed > time::Duration::new(3600, 0) {");
    assert!(min < max);
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.contains("must be a valid duration"))
            .count(),
        1
    );
}

#[test]
fn duration_format_only() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct Job {
    /// docrule:@duration
    pub every: String,
}
"#
    );
    position_of(&lines, "if docrule_runtime::parse_duration(&self.every).is_err() {");
}

#[test]
fn unknown_directives_are_ignored_when_generating() {
    let source = r#"
/// docrule:@generate
pub struct User {
    /// docrule:@frobnicate(3)
    pub name: String,
}
"#;
    let lines = generate(source);
    assert_eq!(lines[2], "Ok(())");
    assert!(!lines.iter().any(|l| l.contains("errors")));

    let diagnostics = validate(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Info);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownDirective);
}

#[test]
fn unselected_declarations_are_skipped() {
    let source = r#"
pub struct User {
    /// docrule:@required
    pub name: String,
}
"#;
    assert!(generate(source).is_empty());

    let config = Config::default().with_select_annotated(true);
    let lines = generate_with(source, &config);
    assert_eq!(lines[0], "impl User {");
}

#[test]
fn member_directive_on_type_is_flagged() {
    let diagnostics = validate(
        r#"
/// docrule:@generate
/// docrule:@required
pub struct User {
    pub name: String,
}
"#
    );
    assert_eq!(codes(&diagnostics), [DiagnosticCode::InapplicableDirective]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn validate_boundaries() {
    let diagnostics = validate(
        r#"
/// docrule:@generate
pub struct Limits {
    /// docrule:@min_len(0)
    /// docrule:@max_len(255)
    pub name: String,
    /// docrule:@max(10)
    pub level: u8,
    /// docrule:@min(0.5)
    pub ratio: f32,
}
"#
    );
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");

    let diagnostics = validate(
        r#"
/// docrule:@generate
pub struct Limits {
    /// docrule:@min_len(-1)
    pub name: String,
    /// docrule:@min(1.5)
    pub level: u8,
    /// docrule:@max_len
    pub tags: Vec<String>,
}
"#
    );
    assert_eq!(
        codes(&diagnostics),
        [
            DiagnosticCode::ParameterMismatch,
            DiagnosticCode::ParameterMismatch,
            DiagnosticCode::MissingParameter,
        ]
    );
}

#[test]
fn validate_reports_taxonomy() {
    let diagnostics = validate(
        r#"
/// docrule:@generate
pub struct Broken {
    /// docrule:@email
    pub age: u32,
    /// docrule:@pattern(re="([a-z")
    pub slug: String,
    /// docrule:@one_of()
    pub status: String,
}
"#
    );
    assert_eq!(
        codes(&diagnostics),
        [
            DiagnosticCode::InapplicableDirective,
            DiagnosticCode::MalformedPattern,
            DiagnosticCode::EmptyValueSet,
        ]
    );
    assert!(diagnostics.iter().all(Diagnostic::is_error));
}

#[test]
fn conflicting_bounds_warn() {
    let diagnostics = validate(
        r#"
/// docrule:@generate
pub struct Limits {
    /// docrule:@min_len(5)
    /// docrule:@max_len(3)
    pub name: String,
    /// docrule:@duration_min(1h)
    /// docrule:@duration_max(1m)
    pub timeout: String,
}
"#
    );
    assert_eq!(
        codes(&diagnostics),
        [DiagnosticCode::ConflictingBounds, DiagnosticCode::ConflictingBounds]
    );
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

const NESTED: &str = r#"
pub struct Address {
    pub city: String,
}

pub struct Billing {
    pub iban: String,
}

impl Billing {
    pub fn check(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Ok(())
    }
}

/// docrule:@generate
pub struct User {
    /// docrule:@nested
    pub address: Address,
    /// docrule:@nested(method=check)
    pub billing: Option<Billing>,
}
"#;

#[test]
fn nested_capability_must_exist() {
    let diagnostics = validate(NESTED);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::CapabilityNotFound]);
    assert!(diagnostics[0].message.contains("crate::models::Address"));

    let selected = NESTED.replace("pub struct Address", "/// docrule:@generate\npub struct Address");
    assert!(validate(&selected).is_empty());
}

#[test]
fn nested_delegates_and_merges() {
    let selected = NESTED.replace("pub struct Address", "/// docrule:@generate\npub struct Address");
    let lines = generate(&selected);
    position_of(&lines, "if let Err(nested) = self.address.validate() {");
    position_of(&lines, "errors.merge(\"address\", nested);");
    let open = position_of(&lines, "if let Some(value) = &self.billing {");
    assert_eq!(lines[open + 1], "if let Err(nested) = value.check() {");
}

#[test]
fn missing_capability_emits_no_delegation() {
    let lines = generate(NESTED);
    assert!(!lines.iter().any(|line| line.contains("self.address")), "{lines:#?}");
    position_of(&lines, "if let Err(nested) = value.check() {");

    let lines = generate(
        r#"
pub struct Address {
    pub city: String,
}

/// docrule:@generate
pub struct Book {
    /// docrule:@dive
    pub addresses: Vec<Address>,
    /// docrule:@dive
    pub previous: Vec<Option<Address>>,
}
"#
    );
    assert!(!lines.iter().any(|line| line.starts_with("for ")), "{lines:#?}");
    assert_eq!(lines[2], "Ok(())");
}

#[test]
fn each_pattern_source_gets_its_own_static() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct User {
    /// docrule:@pattern(re="^[a-z]+$")
    /// docrule:@pattern(re="^.{3}$")
    pub name: String,
}
"#
    );
    let letters = position_of(&lines, "if !USER_NAME_PATTERN.is_match(&self.name) {");
    assert_eq!(
        lines[letters + 1],
        "errors.add(\"name\", \"must match pattern ^[a-z]+$\");"
    );
    let three = position_of(&lines, "if !USER_NAME_PATTERN_2.is_match(&self.name) {");
    assert_eq!(lines[three + 1], "errors.add(\"name\", \"must match pattern ^.{3}$\");");

    let lines = generate(
        r#"
/// docrule:@generate
pub struct UserName {
    /// docrule:@pattern(re="^b+$")
    pub x: String,
}

/// docrule:@generate
pub struct User {
    /// docrule:@pattern(re="^a+$")
    pub name_x: String,
}
"#
    );
    position_of(&lines, "if !USER_NAME_X_PATTERN.is_match(&self.x) {");
    position_of(&lines, "if !USER_NAME_X_PATTERN_2.is_match(&self.name_x) {");
}

#[test]
fn integer_arguments_must_fit_the_member_type() {
    let source = r#"
/// docrule:@generate
pub struct Plan {
    /// docrule:@min(-1)
    pub seats: u32,
    /// docrule:@max(300)
    pub level: u8,
    /// docrule:@ne(128)
    pub offset: i8,
    /// docrule:@one_of(1, 70000)
    pub port: u16,
}
"#;
    let diagnostics = validate(source);
    assert_eq!(
        codes(&diagnostics),
        [
            DiagnosticCode::ParameterMismatch,
            DiagnosticCode::ParameterMismatch,
            DiagnosticCode::ParameterMismatch,
            DiagnosticCode::ParameterMismatch,
        ]
    );
    assert!(diagnostics[0].message.contains("fits in u32, got `-1`"));
    assert!(diagnostics[1].message.contains("fits in u8, got `300`"));
    assert!(diagnostics[2].message.contains("`128` is not a valid i8 literal"));
    assert!(diagnostics[3].message.contains("`70000` is not a valid u16 literal"));

    let lines = generate(source);
    assert_eq!(lines[2], "Ok(())", "{lines:#?}");
}

#[test]
fn integer_arguments_at_type_limits() {
    let source = r#"
/// docrule:@generate
pub struct Plan {
    /// docrule:@min(0)
    pub seats: u32,
    /// docrule:@max(255)
    pub level: u8,
    /// docrule:@ne(-128)
    pub offset: i8,
}
"#;
    assert!(validate(source).is_empty());

    let lines = generate(source);
    position_of(&lines, "if self.seats < 0 {");
    position_of(&lines, "if self.level > 255 {");
    position_of(&lines, "if self.offset == -128 {");
}

#[test]
fn dive_applies_element_directives() {
    let lines = generate(
        r#"
/// docrule:@generate
pub struct Contacts {
    /// docrule:@dive(min_len=2, email=)
    pub emails: Vec<String>,
}
"#
    );
    let open = position_of(&lines, "for (index, item) in self.emails.iter().enumerate() {");
    assert_eq!(lines[open + 1], "let field = format!(\"emails[{index}]\");");
    assert_eq!(lines[open + 2], "if item.chars().count() < 2 {");
    assert_eq!(
        lines[open + 3],
        "errors.add(field.as_str(), \"length must be at least 2\");"
    );
    position_of(&lines, "if !EMAIL_PATTERN.is_match(item) {");
}

#[test]
fn dive_over_map_values_and_custom_elements() {
    let lines = generate(
        r#"
use std::collections::HashMap;

/// docrule:@generate
pub struct Address {
    pub city: String,
}

/// docrule:@generate
pub struct Book {
    /// docrule:@dive
    pub addresses: HashMap<String, Address>,
}
"#
    );
    position_of(&lines, "for (key, item) in self.addresses.iter() {");
    position_of(&lines, "let field = format!(\"addresses[{key}]\");");
    position_of(&lines, "if let Err(nested) = item.validate() {");
    position_of(&lines, "errors.merge(field.as_str(), nested);");
}

#[test]
fn dive_validates_elements() {
    let diagnostics = validate(
        r#"
/// docrule:@generate
pub struct Tags {
    /// docrule:@dive(min=3)
    pub names: Vec<String>,
    /// docrule:@dive
    pub counts: Vec<u32>,
    /// docrule:@dive(wobble=1)
    pub labels: Vec<String>,
}
"#
    );
    assert_eq!(
        codes(&diagnostics),
        [
            DiagnosticCode::InapplicableDirective,
            DiagnosticCode::MissingParameter,
            DiagnosticCode::UnknownDirective,
        ]
    );
}

const ENUMS: &str = r#"
pub struct Status(pub &'static str);

pub const PENDING: Status = Status("pending");
pub const ACTIVE: Status = Status("active");

/// docrule:@generate
pub struct Order {
    /// docrule:@enum
    pub status: Status,
    /// docrule:@one_of(pending, active, completed)
    pub state: String,
}
"#;

#[test]
fn enum_checks_constant_group() {
    assert!(validate(ENUMS).is_empty());

    let lines = generate(ENUMS);
    let check = position_of(&lines, "if ![PENDING, ACTIVE].contains(&self.status) {");
    assert_eq!(
        lines[check + 1],
        "errors.add(\"status\", \"must be one of: PENDING, ACTIVE\");"
    );
}

#[test]
fn one_of_names_the_allowed_set() {
    let lines = generate(ENUMS);
    let check = position_of(
        &lines,
        "if !docrule_runtime::one_of(&self.state, &[\"pending\", \"active\", \"completed\"]) {"
    );
    assert_eq!(
        lines[check + 1],
        "errors.add(\"state\", \"must be one of: pending, active, completed\");"
    );
}

#[test]
fn enum_without_constants_is_not_found() {
    let diagnostics = validate(&ENUMS.replace("docrule:@enum", "docrule:@enum(type=Level)"));
    assert_eq!(codes(&diagnostics), [DiagnosticCode::CapabilityNotFound]);
}
