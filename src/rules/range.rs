// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `min`, `max` for numeric members.

use super::support::{check, conflicting, inapplicable, magnitude, mismatch, missing, number};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::Diagnostics;
use crate::model::{Classification, NumericKind};

/// Which numeric bound a directive sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// `min(x)`.
    Min,
    /// `max(x)`.
    Max
}

/// Numeric range rule.
pub struct RangeRule(pub RangeBound);

fn kind(classification: &Classification) -> Option<NumericKind> {
    match classification {
        Classification::Numeric(kind) => Some(*kind),
        _ => None
    }
}

impl Rule for RangeRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    match self.0 {
                RangeBound::Min => "value must be at least x",
                RangeBound::Max => "value must be at most x"
            },
            applies_to: &["integer", "float"],
            parameters: vec![ParamMeta::required("value", "number")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        let Some(kind) = kind(ctx.classification()) else {
            return inapplicable(ctx);
        };
        let Some(raw) = ctx.directive.value("value") else {
            return missing(ctx, "value");
        };
        if number(raw, kind).is_none() {
            let expected = match kind {
                NumericKind::Integer { .. } => format!("an integer that fits in {kind}"),
                NumericKind::Float => "a number".to_string()
            };
            return mismatch(ctx, &format!("expected {expected}, got `{}`", raw.trim()));
        }

        if self.0 == RangeBound::Min
            && let Some(upper) = ctx.sibling("max").and_then(|d| d.value("value"))
            && let (Some(low), Some(high)) = (magnitude(raw), magnitude(upper))
            && low > high
        {
            return conflicting(ctx, raw.trim(), upper.trim());
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        let Some(kind) = kind(&subject.classification) else {
            return;
        };
        let Some(literal) = ctx.directive.value("value").and_then(|raw| number(raw, kind)) else {
            return;
        };

        let place = subject.place();
        let (condition, message) = match self.0 {
            RangeBound::Min => (format!("{place} < {literal}"), format!("must be at least {literal}")),
            RangeBound::Max => (format!("{place} > {literal}"), format!("must be at most {literal}"))
        };
        check(out, subject, &condition, &message);
    }
}
