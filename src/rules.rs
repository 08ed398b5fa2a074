// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule registry and built-in rules.
//!
//! A [`Rule`] validates one directive against the member it is attached to
//! and emits the matching check into a [`GeneratedUnit`]. Rules are
//! stateless: everything they need arrives in a [`RuleContext`].
//!
//! # Built-in Directives
//!
//! | Directive | Band | Applies to |
//! |-----------|------|------------|
//! | `required` | Required | string, bytes, list, map, pointer |
//! | `min_len`, `max_len`, `len` | Range | string, bytes, list, map |
//! | `min`, `max` | Range | numeric |
//! | `eq`, `ne`, `one_of` | Equality | string, numeric (`eq`/`ne` also boolean) |
//! | `enum` | Equality | types with a constant group |
//! | `email`, `url`, `uuid`, `pattern` | Format | string |
//! | `duration`, `duration_min`, `duration_max` | Format | string |
//! | `contains`, `excludes`, `prefix`, `suffix` | Content | string |
//! | `nested` | Nested | custom |
//! | `dive` | Nested | list, map |
//!
//! # Registry
//!
//! ```rust,ignore
//! let registry = RuleRegistry::builder()
//!     .with_builtin_rules()
//!     .register("slug", Priority::Format, || Box::new(SlugRule))
//!     .build();
//! ```
//!
//! The registry is immutable after [`RuleRegistryBuilder::build`] and can be
//! shared between threads.

mod content;
mod duration;
mod equality;
mod format;
mod length;
mod nested;
mod range;
mod required;
pub(crate) mod support;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use serde::Serialize;

pub use self::support::{Access, Subject};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Position};
use crate::directive::Directive;
use crate::dispatch::Dispatcher;
use crate::emit::{AuxiliaryPattern, GeneratedUnit};
use crate::introspect::SourceModel;
use crate::model::{Classification, Declaration, Member};

/// Dispatch band. Rules run in band order; ties keep encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Presence checks.
    Required,
    /// Length and numeric bounds.
    Range,
    /// Equality and value sets.
    Equality,
    /// Textual formats.
    Format,
    /// Substring checks.
    Content,
    /// Delegation to nested values.
    Nested
}

impl Priority {
    /// Lowercase band name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Range => "range",
            Self::Equality => "equality",
            Self::Format => "format",
            Self::Content => "content",
            Self::Nested => "nested"
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter accepted by a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamMeta {
    /// Key name; positional use reads the same parameter.
    pub name:     &'static str,
    /// Expected value kind.
    pub kind:     &'static str,
    /// Whether the directive is invalid without it.
    pub required: bool
}

impl ParamMeta {
    /// Required parameter.
    #[must_use]
    pub const fn required(name: &'static str, kind: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true
        }
    }

    /// Optional parameter.
    #[must_use]
    pub const fn optional(name: &'static str, kind: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false
        }
    }
}

/// What a rule reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescription {
    /// One-line summary.
    pub summary:    &'static str,
    /// Classification kinds the rule applies to.
    pub applies_to: &'static [&'static str],
    /// Accepted parameters.
    pub parameters: Vec<ParamMeta>
}

/// Registered directive, serializable for editor integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveMeta {
    /// Directive name.
    pub name:       String,
    /// Dispatch band.
    pub priority:   Priority,
    /// One-line summary.
    pub summary:    &'static str,
    /// Classification kinds the rule applies to.
    pub applies_to: &'static [&'static str],
    /// Accepted parameters.
    pub parameters: Vec<ParamMeta>
}

/// Everything a rule sees for one invocation.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Dispatcher running the rule.
    pub dispatcher:  &'a Dispatcher<'a>,
    /// Declaration being processed.
    pub declaration: &'a Declaration,
    /// Member carrying the directive.
    pub member:      &'a Member,
    /// Value the rule checks: the member, its unwrapped value, or an element.
    pub subject:     &'a Subject,
    /// Directive being handled.
    pub directive:   &'a Directive,
    /// Every directive targeting the same subject, in encounter order.
    pub siblings:    &'a [Directive]
}

impl<'a> RuleContext<'a> {
    /// Source model.
    #[must_use]
    pub fn model(&self) -> &'a SourceModel {
        self.dispatcher.model()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.dispatcher.config()
    }

    /// Classification of the subject.
    #[must_use]
    pub fn classification(&self) -> &'a Classification {
        &self.subject.classification
    }

    /// Position diagnostics point at.
    #[must_use]
    pub fn position(&self) -> &'a Position {
        &self.member.position
    }

    /// Module of the declaration.
    #[must_use]
    pub fn module(&self) -> &'a str {
        self.model().module_path(self.declaration.unit)
    }

    /// Sibling directive named `name`.
    #[must_use]
    pub fn sibling(&self, name: &str) -> Option<&'a Directive> {
        self.siblings.iter().find(|d| d.name == name)
    }

    /// `"namespace:@name"` for messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:@{}", self.directive.namespace, self.directive.name)
    }
}

/// Output handle for the statements of one subject.
///
/// Dereferences to the [`GeneratedUnit`] and tracks fused directive groups
/// so a group is emitted once per subject.
pub struct MemberEmitter<'u> {
    unit:    &'u mut GeneratedUnit,
    claimed: BTreeSet<&'static str>
}

impl<'u> MemberEmitter<'u> {
    /// Emitter writing into `unit`.
    pub fn new(unit: &'u mut GeneratedUnit) -> Self {
        Self {
            unit,
            claimed: BTreeSet::new()
        }
    }

    /// Claim fused group `group`. Returns `false` if already claimed.
    pub fn claim(&mut self, group: &'static str) -> bool {
        self.claimed.insert(group)
    }

    /// Fresh emitter over the same unit, for element scopes.
    pub fn scope(&mut self) -> MemberEmitter<'_> {
        MemberEmitter::new(&mut *self.unit)
    }
}

impl Deref for MemberEmitter<'_> {
    type Target = GeneratedUnit;

    fn deref(&self) -> &GeneratedUnit {
        &*self.unit
    }
}

impl DerefMut for MemberEmitter<'_> {
    fn deref_mut(&mut self) -> &mut GeneratedUnit {
        &mut *self.unit
    }
}

/// A directive implementation.
pub trait Rule {
    /// Summary, applicable kinds and parameters.
    fn describe(&self) -> RuleDescription;

    /// Check the directive against the subject. Never panics.
    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics;

    /// Emit the check. Emits nothing for pairings `validate` rejects.
    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>);

    /// Regular expressions the generated check needs as statics.
    fn required_auxiliary_patterns(&self, _ctx: &RuleContext<'_>) -> Vec<AuxiliaryPattern> {
        Vec::new()
    }

    /// Whether optional members are unwrapped before `generate` runs.
    fn unwraps_optional(&self) -> bool {
        true
    }
}

/// Creates rule instances.
pub type RuleFactory = Arc<dyn Fn() -> Box<dyn Rule> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    priority: Priority,
    factory:  RuleFactory
}

/// Directive name to rule mapping.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Registration>
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|(name, r)| (name, r.priority)))
            .finish()
    }
}

impl RuleRegistry {
    /// Start an empty registry.
    #[must_use]
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::default()
    }

    /// Registry with every built-in directive.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder().with_builtin_rules().build()
    }

    /// Band and a fresh rule instance for `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(Priority, Box<dyn Rule>)> {
        self.rules
            .get(name)
            .map(|registration| (registration.priority, (registration.factory)()))
    }

    /// Band of `name`.
    #[must_use]
    pub fn priority(&self, name: &str) -> Option<Priority> {
        self.rules.get(name).map(|r| r.priority)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of registered directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Metadata for every registered directive, sorted by band then name.
    #[must_use]
    pub fn metadata(&self) -> Vec<DirectiveMeta> {
        let mut metadata: Vec<DirectiveMeta> = self
            .rules
            .iter()
            .map(|(name, registration)| {
                let description = (registration.factory)().describe();
                DirectiveMeta {
                    name:       name.clone(),
                    priority:   registration.priority,
                    summary:    description.summary,
                    applies_to: description.applies_to,
                    parameters: description.parameters
                }
            })
            .collect();
        metadata.sort_by_key(|m| m.priority);
        metadata
    }
}

/// Builder for [`RuleRegistry`].
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: BTreeMap<String, Registration>
}

impl RuleRegistryBuilder {
    /// Register `name`; a second registration of the same name replaces the
    /// first.
    #[must_use]
    pub fn register<F>(mut self, name: impl Into<String>, priority: Priority, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Rule> + Send + Sync + 'static
    {
        self.rules.insert(
            name.into(),
            Registration {
                priority,
                factory: Arc::new(factory)
            }
        );
        self
    }

    /// Register every built-in directive.
    #[must_use]
    pub fn with_builtin_rules(self) -> Self {
        use self::content::{ContentCheck, ContentRule};
        use self::duration::{DurationPart, DurationRule};
        use self::equality::{EnumRule, EqualityCheck, EqualityRule, OneOfRule};
        use self::format::{FormatRule, KnownFormat};
        use self::length::{LengthBound, LengthRule};
        use self::nested::{DiveRule, NestedRule};
        use self::range::{RangeBound, RangeRule};
        use self::required::RequiredRule;

        self.register("required", Priority::Required, || Box::new(RequiredRule))
            .register("min_len", Priority::Range, || Box::new(LengthRule(LengthBound::Min)))
            .register("max_len", Priority::Range, || Box::new(LengthRule(LengthBound::Max)))
            .register("len", Priority::Range, || Box::new(LengthRule(LengthBound::Exact)))
            .register("min", Priority::Range, || Box::new(RangeRule(RangeBound::Min)))
            .register("max", Priority::Range, || Box::new(RangeRule(RangeBound::Max)))
            .register("eq", Priority::Equality, || Box::new(EqualityRule(EqualityCheck::Eq)))
            .register("ne", Priority::Equality, || Box::new(EqualityRule(EqualityCheck::Ne)))
            .register("one_of", Priority::Equality, || Box::new(OneOfRule))
            .register("enum", Priority::Equality, || Box::new(EnumRule))
            .register("email", Priority::Format, || Box::new(FormatRule(KnownFormat::Email)))
            .register("url", Priority::Format, || Box::new(FormatRule(KnownFormat::Url)))
            .register("uuid", Priority::Format, || Box::new(FormatRule(KnownFormat::Uuid)))
            .register("pattern", Priority::Format, || Box::new(FormatRule(KnownFormat::Custom)))
            .register("duration", Priority::Format, || Box::new(DurationRule(DurationPart::Format)))
            .register("duration_min", Priority::Format, || {
                Box::new(DurationRule(DurationPart::Min))
            })
            .register("duration_max", Priority::Format, || {
                Box::new(DurationRule(DurationPart::Max))
            })
            .register("contains", Priority::Content, || {
                Box::new(ContentRule(ContentCheck::Contains))
            })
            .register("excludes", Priority::Content, || {
                Box::new(ContentRule(ContentCheck::Excludes))
            })
            .register("prefix", Priority::Content, || Box::new(ContentRule(ContentCheck::Prefix)))
            .register("suffix", Priority::Content, || Box::new(ContentRule(ContentCheck::Suffix)))
            .register("nested", Priority::Nested, || Box::new(NestedRule))
            .register("dive", Priority::Nested, || Box::new(DiveRule))
    }

    /// Finish the registry.
    #[must_use]
    pub fn build(self) -> RuleRegistry {
        RuleRegistry {
            rules: self.rules
        }
    }
}

#[cfg(test)]
mod tests;
