// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `email`, `url`, `uuid`, `pattern`.
//!
//! Each check matches against a `static` regex that the artifact declares
//! once, however many members use it. Distinct `pattern` sources never
//! share a static, even when their derived names collide.

use regex::Regex;

use super::support::{check, error, inapplicable, missing};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::emit::AuxiliaryPattern;
use crate::model::Classification;

const EMAIL: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const URL: &str = r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+[^\s]*$";
const UUID: &str =
    r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$";

/// Format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFormat {
    /// `email`.
    Email,
    /// `url`.
    Url,
    /// `uuid`.
    Uuid,
    /// `pattern(re)`.
    Custom
}

/// Regex format rule.
pub struct FormatRule(pub KnownFormat);

impl FormatRule {
    fn pattern(&self, ctx: &RuleContext<'_>) -> Option<AuxiliaryPattern> {
        let (name, source) = match self.0 {
            KnownFormat::Email => ("EMAIL_PATTERN".to_string(), EMAIL),
            KnownFormat::Url => ("URL_PATTERN".to_string(), URL),
            KnownFormat::Uuid => ("UUID_PATTERN".to_string(), UUID),
            KnownFormat::Custom => {
                let source = ctx.directive.value("re")?;
                Regex::new(source).ok()?;
                (ctx.subject.item_name("pattern"), source)
            }
        };
        Some(AuxiliaryPattern::new(name, source))
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        match self.0 {
            KnownFormat::Email => "must be a valid email address".to_string(),
            KnownFormat::Url => "must be a valid URL".to_string(),
            KnownFormat::Uuid => "must be a valid UUID".to_string(),
            KnownFormat::Custom => format!(
                "must match pattern {}",
                ctx.directive.value("re").unwrap_or_default()
            )
        }
    }
}

impl Rule for FormatRule {
    fn describe(&self) -> RuleDescription {
        let (summary, parameters) = match self.0 {
            KnownFormat::Email => ("value must be an email address", Vec::new()),
            KnownFormat::Url => ("value must be an absolute URL", Vec::new()),
            KnownFormat::Uuid => ("value must be a hyphenated UUID", Vec::new()),
            KnownFormat::Custom => (
                "value must match the regular expression",
                vec![ParamMeta::required("re", "regex")]
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
        if self.0 != KnownFormat::Custom {
            return Diagnostics::new();
        }
        let Some(source) = ctx.directive.value("re") else {
            return missing(ctx, "re");
        };
        match Regex::new(source) {
            Ok(_) => Diagnostics::new(),
            Err(err) => error(
                ctx,
                DiagnosticCode::MalformedPattern,
                format!("`{}` on `{}`: {err}", ctx.label(), ctx.member.name)
            )
        }
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        if subject.classification != Classification::String {
            return;
        }
        let Some(pattern) = self.pattern(ctx) else {
            return;
        };
        let name = out.require_pattern(&pattern, &ctx.config().runtime_crate);
        check(
            out,
            subject,
            &format!("!{name}.is_match({})", subject.by_ref()),
            &self.message(ctx)
        );
    }

    fn required_auxiliary_patterns(&self, ctx: &RuleContext<'_>) -> Vec<AuxiliaryPattern> {
        if ctx.subject.classification != Classification::String {
            return Vec::new();
        }
        self.pattern(ctx).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns() {
        let email = Regex::new(EMAIL).unwrap();
        assert!(email.is_match("ada@example.com"));
        assert!(!email.is_match("ada@example"));
        assert!(!email.is_match("not an email"));

        let url = Regex::new(URL).unwrap();
        assert!(url.is_match("https://example.com/path?q=1"));
        assert!(!url.is_match("example.com"));

        let uuid = Regex::new(UUID).unwrap();
        assert!(uuid.is_match("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!uuid.is_match("67e55044"));
    }
}
