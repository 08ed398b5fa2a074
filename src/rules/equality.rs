// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `eq`, `ne`, `one_of` and `enum`.
//!
//! `enum` checks the value against the constant group declared for the
//! member's type:
//!
//! ```rust,ignore
//! pub struct Status(&'static str);
//! pub const PENDING: Status = Status("pending");
//! pub const ACTIVE: Status = Status("active");
//!
//! pub struct Order {
//!     /// docrule:@enum
//!     pub status: Status,
//! }
//! ```

use super::support::{check, error, inapplicable, mismatch, missing, number};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription};
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::model::{Classification, EnumDeclaration};

/// `eq` or `ne`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityCheck {
    /// Value must equal the argument.
    Eq,
    /// Value must differ from the argument.
    Ne
}

/// Equality rule.
pub struct EqualityRule(pub EqualityCheck);

/// Type named in literal mismatch messages.
fn literal_type(classification: &Classification) -> String {
    match classification {
        Classification::Numeric(kind) => kind.to_string(),
        other => other.kind().to_string()
    }
}

/// Literal for `raw` matching `classification`.
fn literal(raw: &str, classification: &Classification) -> Option<String> {
    match classification {
        Classification::String => Some(format!("{raw:?}")),
        Classification::Numeric(kind) => number(raw, *kind),
        Classification::Boolean => match raw.trim() {
            "true" | "false" => Some(raw.trim().to_string()),
            _ => None
        },
        _ => None
    }
}

impl Rule for EqualityRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    match self.0 {
                EqualityCheck::Eq => "value must equal the argument",
                EqualityCheck::Ne => "value must differ from the argument"
            },
            applies_to: &["string", "integer", "float", "boolean"],
            parameters: vec![ParamMeta::required("value", "literal")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        if !matches!(
            ctx.classification(),
            Classification::String | Classification::Numeric(_) | Classification::Boolean
        ) {
            return inapplicable(ctx);
        }
        let Some(raw) = ctx.directive.value("value") else {
            return missing(ctx, "value");
        };
        if literal(raw, ctx.classification()).is_none() {
            return mismatch(
                ctx,
                &format!("`{raw}` is not a valid {} literal", literal_type(ctx.classification()))
            );
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        let Some(raw) = ctx.directive.value("value") else {
            return;
        };
        let Some(literal) = literal(raw, &subject.classification) else {
            return;
        };

        let place = subject.place();
        let condition = match (&subject.classification, self.0, literal.as_str()) {
            (Classification::Boolean, EqualityCheck::Eq, "true")
            | (Classification::Boolean, EqualityCheck::Ne, "false") => format!("!{place}"),
            (Classification::Boolean, ..) => place,
            (_, EqualityCheck::Eq, _) => format!("{place} != {literal}"),
            (_, EqualityCheck::Ne, _) => format!("{place} == {literal}")
        };
        let message = match self.0 {
            EqualityCheck::Eq => format!("must equal {}", raw.trim()),
            EqualityCheck::Ne => format!("must not equal {}", raw.trim())
        };
        check(out, subject, &condition, &message);
    }
}

/// `one_of(a, b, c)`.
pub struct OneOfRule;

impl Rule for OneOfRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "value must be one of the listed values",
            applies_to: &["string", "integer", "float"],
            parameters: vec![ParamMeta::required("values", "literal list")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        let classification = ctx.classification();
        if !matches!(classification, Classification::String | Classification::Numeric(_)) {
            return inapplicable(ctx);
        }
        if ctx.directive.positional.is_empty() {
            return error(
                ctx,
                DiagnosticCode::EmptyValueSet,
                format!("`{}` on `{}` lists no values", ctx.label(), ctx.member.name)
            );
        }
        if let Some(bad) = ctx
            .directive
            .positional
            .iter()
            .find(|raw| literal(raw, classification).is_none())
        {
            return mismatch(
                ctx,
                &format!("`{bad}` is not a valid {} literal", literal_type(classification))
            );
        }
        Diagnostics::new()
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let subject = ctx.subject;
        let values = &ctx.directive.positional;
        let literals: Option<Vec<String>> = values
            .iter()
            .map(|raw| literal(raw, &subject.classification))
            .collect();
        let Some(literals) = literals.filter(|l| !l.is_empty()) else {
            return;
        };

        let condition = match subject.classification {
            Classification::String => {
                let one_of = out.qualify(&ctx.config().runtime_crate, "one_of");
                format!("!{one_of}({}, &[{}])", subject.by_ref(), literals.join(", "))
            }
            Classification::Numeric(_) => {
                format!("![{}].contains({})", literals.join(", "), subject.by_ref())
            }
            _ => return
        };
        let allowed: Vec<&str> = values.iter().map(|v| v.trim()).collect();
        check(out, subject, &condition, &format!("must be one of: {}", allowed.join(", ")));
    }
}

/// `enum` or `enum(type=Name)`.
pub struct EnumRule;

enum Lookup<'a> {
    Found(&'a EnumDeclaration),
    Missing {
        name:   String,
        module: String
    },
    Unresolved
}

/// Innermost named type of a signature: `Option<Status>` gives `Status`.
fn innermost_name(signature: &str) -> Option<&str> {
    let inner = signature.trim_end_matches(['>', ' ']);
    let inner = inner.rsplit(['<', ',', ' ', '&']).next()?;
    let name = inner.rsplit("::").next()?;
    (!name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')).then_some(name)
}

impl EnumRule {
    fn lookup<'a>(ctx: &RuleContext<'a>) -> Option<Lookup<'a>> {
        let model = ctx.model();
        let explicit = ctx.directive.value("type").map(str::trim);

        let (name, module) = match (explicit, ctx.classification()) {
            (Some(path), _) => {
                let segments: Vec<String> = path.split("::").map(str::to_string).collect();
                match model.resolve_type_path(ctx.declaration.unit, &segments) {
                    Some((module, name)) => (name, Some(module)),
                    None if segments.len() == 1 => (path.to_string(), Some(ctx.module().to_string())),
                    None => (segments.last().cloned().unwrap_or_default(), None)
                }
            }
            (None, Classification::Custom(custom)) => (custom.name.clone(), custom.module.clone()),
            (None, Classification::String) => {
                let name = innermost_name(&ctx.member.type_signature)?;
                (name.to_string(), Some(ctx.module().to_string()))
            }
            _ => return None
        };

        let Some(module) = module else {
            return Some(Lookup::Unresolved);
        };
        Some(match model.enum_for(&module, &name) {
            Some(found) => Lookup::Found(found),
            None => Lookup::Missing {
                name,
                module
            }
        })
    }
}

impl Rule for EnumRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "value must be one of the constants declared for its type",
            applies_to: &["custom", "string"],
            parameters: vec![ParamMeta::optional("type", "type path")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        match Self::lookup(ctx) {
            None => inapplicable(ctx),
            Some(Lookup::Unresolved) => Diagnostics::new(),
            Some(Lookup::Missing {
                name,
                module
            }) => error(
                ctx,
                DiagnosticCode::CapabilityNotFound,
                format!(
                    "`{}` on `{}`: no constants of type `{name}` in `{module}`",
                    ctx.label(),
                    ctx.member.name
                )
            ),
            Some(Lookup::Found(group)) if group.values.is_empty() => error(
                ctx,
                DiagnosticCode::EmptyValueSet,
                format!("constant group `{}` is empty", group.name)
            ),
            Some(Lookup::Found(_)) => Diagnostics::new()
        }
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let Some(Lookup::Found(group)) = Self::lookup(ctx) else {
            return;
        };
        if group.values.is_empty() {
            return;
        }

        let module = ctx.model().module_path(group.unit);
        let constants: Vec<String> = group
            .values
            .iter()
            .map(|value| out.qualify(module, &value.name))
            .collect();
        let names: Vec<&str> = group.values.iter().map(|v| v.name.as_str()).collect();

        let subject = ctx.subject;
        check(
            out,
            subject,
            &format!("![{}].contains({})", constants.join(", "), subject.by_ref()),
            &format!("must be one of: {}", names.join(", "))
        );
    }
}
