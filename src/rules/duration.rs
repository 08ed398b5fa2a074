// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `duration`, `duration_min`, `duration_max`.
//!
//! The three directives form one fused group. Whichever is dispatched first
//! emits a single block that parses the value once and compares the parsed
//! duration against both bounds; the others emit nothing:
//!
//! ```rust,ignore
//! match docrule_runtime::parse_duration(&self.timeout) {
//!     Ok(parsed) => {
//!         if parsed < time::Duration::new(1, 0) { ... }
//!         if parsed > time::Duration::new(3600, 0) { ... }
//!     }
//!     Err(_) => { ... }
//! }
//! ```
//!
//! Bounds use `humantime` syntax (`1s`, `500ms`, `1h 30m`).

use std::time::Duration;

use super::support::{conflicting, inapplicable, mismatch, missing, report};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::Diagnostics;
use crate::model::Classification;

const GROUP: &str = "duration";

/// Member of the fused duration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationPart {
    /// `duration`: format only.
    Format,
    /// `duration_min(d)`.
    Min,
    /// `duration_max(d)`.
    Max
}

/// Duration rule.
pub struct DurationRule(pub DurationPart);

fn bound(ctx: &RuleContext<'_>, name: &str) -> Option<(Duration, String)> {
    let raw = ctx.sibling(name)?.value("value")?.trim();
    humantime::parse_duration(raw)
        .ok()
        .map(|parsed| (parsed, raw.to_string()))
}

impl Rule for DurationRule {
    fn describe(&self) -> RuleDescription {
        let (summary, parameters) = match self.0 {
            DurationPart::Format => ("value must be a duration such as `1h 30m`", Vec::new()),
            DurationPart::Min => (
                "duration must be at least the bound",
                vec![ParamMeta::required("value", "duration")]
            ),
            DurationPart::Max => (
                "duration must be at most the bound",
                vec![ParamMeta::required("value", "duration")]
            )
        };
        RuleDescription {
            summary,
            applies_to: &["string"],
            parameters
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        if *ctx.classification() != Classification::String {
            return inapplicable(ctx);
        }
        if self.0 == DurationPart::Format {
            return Diagnostics::new();
        }

        let Some(raw) = ctx.directive.value("value") else {
            return missing(ctx, "value");
        };
        if let Err(err) = humantime::parse_duration(raw.trim()) {
            return mismatch(ctx, &format!("`{}` is not a duration: {err}", raw.trim()));
        }

        if self.0 == DurationPart::Min
            && let (Some((low, low_raw)), Some((high, high_raw))) =
                (bound(ctx, "duration_min"), bound(ctx, "duration_max"))
            && low > high
        {
            return conflicting(ctx, &low_raw, &high_raw);
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        if subject.classification != Classification::String || !out.claim(GROUP) {
            return;
        }

        let parse = out.qualify(&ctx.config().runtime_crate, "parse_duration");
        let min = bound(ctx, "duration_min");
        let max = bound(ctx, "duration_max");

        if min.is_none() && max.is_none() {
            out.line(format!("if {parse}({}).is_err() {{", subject.by_ref()));
            report(out, subject, "must be a valid duration");
            out.line("}");
            return;
        }

        let duration = out.qualify("std::time", "Duration");
        out.line(format!("match {parse}({}) {{", subject.by_ref()));
        out.line("Ok(parsed) => {");
        for (bound, op, word) in [(min, "<", "least"), (max, ">", "most")] {
            let Some((limit, raw)) = bound else {
                continue;
            };
            out.line(format!(
                "if parsed {op} {duration}::new({}, {}) {{",
                limit.as_secs(),
                limit.subsec_nanos()
            ));
            report(out, subject, &format!("duration must be at {word} {raw}"));
            out.line("}");
        }
        out.line("}");
        out.line("Err(_) => {");
        report(out, subject, "must be a valid duration");
        out.line("}");
        out.line("}");
    }
}
