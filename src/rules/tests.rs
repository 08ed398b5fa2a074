// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for the rule registry.

use super::*;

struct Marker;

impl Rule for Marker {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "marker",
            applies_to: &["string"],
            parameters: Vec::new()
        }
    }

    fn validate(&self, _ctx: &RuleContext<'_>) -> Diagnostics {
        Diagnostics::new()
    }

    fn generate(&self, _ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        out.line("// marker");
    }
}

#[test]
fn builtin_registry_has_every_directive() {
    let registry = RuleRegistry::builtin();
    assert_eq!(registry.len(), 23);
    assert!(!registry.is_empty());
    for name in [
        "required", "min_len", "max_len", "len", "min", "max", "eq", "ne", "one_of", "enum",
        "email", "url", "uuid", "pattern", "duration", "duration_min", "duration_max",
        "contains", "excludes", "prefix", "suffix", "nested", "dive"
    ] {
        assert!(registry.contains(name), "{name} is not registered");
    }
    assert!(!registry.contains("generate"));
}

#[test]
fn names_are_sorted() {
    let registry = RuleRegistry::builtin();
    let names: Vec<&str> = registry.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn priorities_follow_bands() {
    let registry = RuleRegistry::builtin();
    assert_eq!(registry.priority("required"), Some(Priority::Required));
    assert_eq!(registry.priority("max_len"), Some(Priority::Range));
    assert_eq!(registry.priority("one_of"), Some(Priority::Equality));
    assert_eq!(registry.priority("duration_min"), Some(Priority::Format));
    assert_eq!(registry.priority("suffix"), Some(Priority::Content));
    assert_eq!(registry.priority("dive"), Some(Priority::Nested));
    assert_eq!(registry.priority("frobnicate"), None);
    assert!(Priority::Required < Priority::Range);
    assert!(Priority::Content < Priority::Nested);
}

#[test]
fn later_registration_replaces_earlier() {
    let registry = RuleRegistry::builder()
        .with_builtin_rules()
        .register("email", Priority::Content, || Box::new(Marker))
        .register("slug", Priority::Format, || Box::new(Marker))
        .build();
    assert_eq!(registry.len(), 24);
    assert_eq!(registry.priority("email"), Some(Priority::Content));

    let (priority, rule) = registry.resolve("slug").unwrap();
    assert_eq!(priority, Priority::Format);
    assert_eq!(rule.describe().summary, "marker");
    assert!(rule.unwraps_optional());
}

#[test]
fn resolve_unknown_is_none() {
    assert!(RuleRegistry::builder().build().is_empty());
    assert!(RuleRegistry::builtin().resolve("nope").is_none());
}

#[test]
fn metadata_is_sorted_by_band() {
    let metadata = RuleRegistry::builtin().metadata();
    assert_eq!(metadata.len(), 23);
    assert!(metadata.windows(2).all(|pair| pair[0].priority <= pair[1].priority));
    assert_eq!(metadata[0].name, "required");
    assert_eq!(metadata[22].priority, Priority::Nested);

    let pattern = metadata.iter().find(|m| m.name == "pattern").unwrap();
    assert_eq!(pattern.parameters, [ParamMeta::required("re", "regex")]);
}

#[test]
fn metadata_serializes() {
    let metadata = RuleRegistry::builtin().metadata();
    let json = serde_json::to_value(&metadata).unwrap();
    let min_len = json
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "min_len")
        .unwrap();
    assert_eq!(min_len["priority"], "range");
    assert_eq!(min_len["parameters"][0]["name"], "n");
    assert_eq!(min_len["parameters"][0]["required"], true);
    assert_eq!(min_len["applies_to"][0], "string");
}

#[test]
fn registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RuleRegistry>();

    let debug = format!("{:?}", RuleRegistry::builtin());
    assert!(debug.contains("\"dive\": Nested"));
}

#[test]
fn priority_display() {
    assert_eq!(Priority::Equality.to_string(), "equality");
    assert_eq!(Priority::Format.as_str(), "format");
}
