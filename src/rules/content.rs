// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `contains`, `excludes`, `prefix`, `suffix`.

use super::support::{check, inapplicable, missing};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::Diagnostics;
use crate::model::Classification;

/// Substring check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCheck {
    /// Must contain the argument.
    Contains,
    /// Must not contain the argument.
    Excludes,
    /// Must start with the argument.
    Prefix,
    /// Must end with the argument.
    Suffix
}

/// Content rule.
pub struct ContentRule(pub ContentCheck);

impl Rule for ContentRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    match self.0 {
                ContentCheck::Contains => "value must contain the text",
                ContentCheck::Excludes => "value must not contain the text",
                ContentCheck::Prefix => "value must start with the text",
                ContentCheck::Suffix => "value must end with the text"
            },
            applies_to: &["string"],
            parameters: vec![ParamMeta::required("value", "string")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        if *ctx.classification() != Classification::String {
            return inapplicable(ctx);
        }
        if ctx.directive.value("value").is_none() {
            return missing(ctx, "value");
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        if subject.classification != Classification::String {
            return;
        }
        let Some(text) = ctx.directive.value("value") else {
            return;
        };

        let receiver = subject.receiver();
        let (condition, message) = match self.0 {
            ContentCheck::Contains => (format!("!{receiver}.contains({text:?})"), format!("must contain {text:?}")),
            ContentCheck::Excludes => (format!("{receiver}.contains({text:?})"), format!("must not contain {text:?}")),
            ContentCheck::Prefix => (format!("!{receiver}.starts_with({text:?})"), format!("must start with {text:?}")),
            ContentCheck::Suffix => (format!("!{receiver}.ends_with({text:?})"), format!("must end with {text:?}"))
        };
        check(out, subject, &condition, &message);
    }
}
