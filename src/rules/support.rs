// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared pieces of the built-in rules.

use convert_case::{Case, Casing};

use super::RuleContext;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::emit::GeneratedUnit;
use crate::model::{Classification, Declaration, Member, NumericKind};

/// Local holding the `ValidationErrors` in generated methods.
pub(crate) const ERRORS: &str = "errors";

/// How generated code reaches a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Field of `self`.
    Field(String),
    /// Local binding holding a reference, e.g. `value` or `item`.
    Binding(String)
}

/// The value a rule checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Access path.
    pub access:         Access,
    /// Rust expression evaluating to the field label.
    pub label:          String,
    /// Words naming the subject, used for generated item names.
    pub slug:           String,
    /// Classification of the value reached through `access`.
    pub classification: Classification
}

impl Subject {
    /// Subject for a member of `declaration`.
    #[must_use]
    pub fn field(declaration: &Declaration, member: &Member) -> Self {
        Self {
            access:         Access::Field(member.name.clone()),
            label:          format!("{:?}", member.name.trim_start_matches("r#")),
            slug:           format!("{} {}", declaration.name, member.name.trim_start_matches("r#")),
            classification: member.classification.clone()
        }
    }

    /// Same label, reached through binding `name`.
    #[must_use]
    pub fn rebind(&self, name: &str, classification: Classification) -> Self {
        Self {
            access: Access::Binding(name.to_string()),
            classification,
            ..self.clone()
        }
    }

    /// Element subject bound to `name` with a dynamic label.
    #[must_use]
    pub fn element(&self, name: &str, label: &str, classification: Classification) -> Self {
        Self {
            access: Access::Binding(name.to_string()),
            label: label.to_string(),
            slug: format!("{} item", self.slug),
            classification
        }
    }

    /// Expression usable in comparisons (`self.age`, `*value`).
    #[must_use]
    pub fn place(&self) -> String {
        match &self.access {
            Access::Field(name) => format!("self.{name}"),
            Access::Binding(name) => format!("*{name}")
        }
    }

    /// Expression borrowing the value (`&self.age`, `value`).
    #[must_use]
    pub fn by_ref(&self) -> String {
        match &self.access {
            Access::Field(name) => format!("&self.{name}"),
            Access::Binding(name) => name.clone()
        }
    }

    /// Receiver for method calls (`self.name`, `value`).
    #[must_use]
    pub fn receiver(&self) -> String {
        match &self.access {
            Access::Field(name) => format!("self.{name}"),
            Access::Binding(name) => name.clone()
        }
    }

    /// `SCREAMING_SNAKE` item name for this subject.
    #[must_use]
    pub fn item_name(&self, suffix: &str) -> String {
        format!("{} {suffix}", self.slug).to_case(Case::Constant)
    }
}

/// Print `errors.add(<label>, "<message>");`.
pub(crate) fn report(out: &mut GeneratedUnit, subject: &Subject, message: &str) {
    out.line(format!("{ERRORS}.add({}, {message:?});", subject.label));
}

/// Print `if <condition> { errors.add(..) }`.
pub(crate) fn check(out: &mut GeneratedUnit, subject: &Subject, condition: &str, message: &str) {
    out.line(format!("if {condition} {{"));
    report(out, subject, message);
    out.line("}");
}

/// Single error diagnostic at the member.
pub(crate) fn error(ctx: &RuleContext<'_>, code: DiagnosticCode, message: String) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.error(code, ctx.position(), message);
    diagnostics
}

/// The directive does not apply to the subject.
pub(crate) fn inapplicable(ctx: &RuleContext<'_>) -> Diagnostics {
    error(
        ctx,
        DiagnosticCode::InapplicableDirective,
        format!(
            "`{}` does not apply to `{}` of type {}",
            ctx.label(),
            ctx.member.name,
            ctx.classification()
        )
    )
}

/// A required parameter is absent.
pub(crate) fn missing(ctx: &RuleContext<'_>, parameter: &str) -> Diagnostics {
    error(
        ctx,
        DiagnosticCode::MissingParameter,
        format!("`{}` on `{}` needs a `{parameter}` argument", ctx.label(), ctx.member.name)
    )
}

/// A parameter has the wrong shape.
pub(crate) fn mismatch(ctx: &RuleContext<'_>, detail: &str) -> Diagnostics {
    error(
        ctx,
        DiagnosticCode::ParameterMismatch,
        format!("`{}` on `{}`: {detail}", ctx.label(), ctx.member.name)
    )
}

/// Warn that a lower bound exceeds the matching upper bound.
pub(crate) fn conflicting(ctx: &RuleContext<'_>, lower: &str, upper: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warning_fmt(
        DiagnosticCode::ConflictingBounds,
        ctx.position(),
        format_args!(
            "`{}` bounds on `{}` can never hold: {lower} is greater than {upper}",
            ctx.label(),
            ctx.member.name
        )
    );
    diagnostics
}

/// Parse a non-negative count.
pub(crate) fn count(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

/// Rust literal for `raw` as a number of `kind`.
///
/// Integers outside the range of the member's type are rejected.
pub(crate) fn number(raw: &str, kind: NumericKind) -> Option<String> {
    let raw = raw.trim();
    match kind {
        NumericKind::Integer {
            signed: true,
            bits
        } => {
            let shift = 128u32.checked_sub(u32::from(bits))?;
            let n = raw.parse::<i128>().ok()?;
            let min = i128::MIN.checked_shr(shift)?;
            let max = i128::MAX.checked_shr(shift)?;
            (min..=max).contains(&n).then(|| n.to_string())
        }
        NumericKind::Integer {
            signed: false,
            bits
        } => {
            let shift = 128u32.checked_sub(u32::from(bits))?;
            let n = raw.parse::<u128>().ok()?;
            (n <= u128::MAX.checked_shr(shift)?).then(|| n.to_string())
        }
        NumericKind::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| format!("{n:?}"))
    }
}

/// Numeric value used to compare bounds.
pub(crate) fn magnitude(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
