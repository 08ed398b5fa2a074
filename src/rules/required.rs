// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `required`: the value must be present and non-empty.
//!
//! | Classification | Check |
//! |----------------|-------|
//! | pointer | `is_none()` |
//! | string, bytes, list, map | `is_empty()` |

use super::support::{check, inapplicable, mismatch};
use super::{MemberEmitter, Rule, RuleContext, RuleDescription};
use crate::diagnostics::Diagnostics;
use crate::model::Classification;

/// `required` rule. Sees optional members as they are.
pub struct RequiredRule;

impl Rule for RequiredRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "value must be present and not empty",
            applies_to: &["string", "bytes", "list", "map", "pointer"],
            parameters: Vec::new()
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        match ctx.classification() {
            Classification::Pointer(_)
            | Classification::String
            | Classification::Bytes
            | Classification::List(_)
            | Classification::Map(..) => {}
            _ => return inapplicable(ctx)
        }
        if ctx.directive.has_args() {
            return mismatch(ctx, "takes no arguments");
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        let (condition, message) = match &subject.classification {
            Classification::Pointer(_) => (format!("{}.is_none()", subject.receiver()), "is required"),
            Classification::String
            | Classification::Bytes
            | Classification::List(_)
            | Classification::Map(..) => {
                (format!("{}.is_empty()", subject.receiver()), "must not be empty")
            }
            _ => return
        };
        check(out, subject, &condition, message);
    }

    fn unwraps_optional(&self) -> bool {
        false
    }
}
