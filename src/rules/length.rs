// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `min_len`, `max_len`, `len`.
//!
//! Strings are measured in characters, everything else in elements.

use super::support::{check, conflicting, count, inapplicable, mismatch, missing};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::Diagnostics;
use crate::model::Classification;

/// Which length bound a directive sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    /// `min_len(n)`.
    Min,
    /// `max_len(n)`.
    Max,
    /// `len(n)`.
    Exact
}

/// Length rule.
pub struct LengthRule(pub LengthBound);

impl Rule for LengthRule {
    fn describe(&self) -> RuleDescription {
        let summary = match self.0 {
            LengthBound::Min => "length must be at least n",
            LengthBound::Max => "length must be at most n",
            LengthBound::Exact => "length must be exactly n"
        };
        RuleDescription {
            summary,
            applies_to: &["string", "bytes", "list", "map"],
            parameters: vec![ParamMeta::required("n", "integer")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        if !ctx.classification().has_length() {
            return inapplicable(ctx);
        }
        let Some(raw) = ctx.directive.value("n") else {
            return missing(ctx, "n");
        };
        let Some(n) = count(raw) else {
            return mismatch(ctx, &format!("expected a non-negative integer, got `{raw}`"));
        };

        if self.0 == LengthBound::Min
            && let Some(max) = ctx
                .sibling("max_len")
                .and_then(|d| d.value("n"))
                .and_then(count)
            && n > max
        {
            return conflicting(ctx, &n.to_string(), &max.to_string());
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        if !subject.classification.has_length() {
            return;
        }
        let Some(n) = ctx.directive.value("n").and_then(count) else {
            return;
        };

        let measure = match subject.classification {
            Classification::String => format!("{}.chars().count()", subject.receiver()),
            _ => format!("{}.len()", subject.receiver())
        };
        let (condition, message) = match self.0 {
            LengthBound::Min if n == 0 => return,
            LengthBound::Min => (format!("{measure} < {n}"), format!("length must be at least {n}")),
            LengthBound::Max => (format!("{measure} > {n}"), format!("length must be at most {n}")),
            LengthBound::Exact => (format!("{measure} != {n}"), format!("length must be exactly {n}"))
        };
        check(out, subject, &condition, &message);
    }
}
