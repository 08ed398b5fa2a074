// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `nested` and `dive`.
//!
//! `nested` delegates to the member type's own validation method and merges
//! its errors under the member name. `dive` walks a list or map and applies
//! element directives to every element:
//!
//! ```rust,ignore
//! /// docrule:@dive(min_len=3, email=)
//! pub contacts: Vec<String>,
//! ```
//!
//! Keyed arguments become element directives with the value as their only
//! argument (an empty value means no argument); bare tokens become element
//! directives without arguments. A `dive` without arguments over custom
//! elements delegates to each element's method.

use super::support::{ERRORS, error, inapplicable, missing};
use super::{MemberEmitter, ParamMeta, Rule, RuleContext, RuleDescription, Subject};
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::directive::Directive;
use crate::model::{Classification, CustomType};

/// Method `custom` must provide, or why it cannot be found.
fn capability(ctx: &RuleContext<'_>, custom: &CustomType, method: &str) -> Diagnostics {
    let Some(module) = &custom.module else {
        return Diagnostics::new();
    };

    let dispatcher = ctx.dispatcher;
    let generated = method == ctx.config().method_name
        && ctx
            .model()
            .declaration(module, &custom.name)
            .is_some_and(|declaration| dispatcher.is_selected(declaration));
    if generated || ctx.model().has_method(module, &custom.name, method) {
        return Diagnostics::new();
    }

    error(
        ctx,
        DiagnosticCode::CapabilityNotFound,
        format!(
            "`{}` on `{}`: `{module}::{}` has no `{method}` method and is not generated",
            ctx.label(),
            ctx.member.name,
            custom.name
        )
    )
}

/// Print the delegation call for `subject`.
fn delegate(out: &mut MemberEmitter<'_>, subject: &Subject, method: &str) {
    out.line(format!("if let Err(nested) = {}.{method}() {{", subject.receiver()));
    out.line(format!("{ERRORS}.merge({}, nested);", subject.label));
    out.line("}");
}

/// `nested` or `nested(method=name)`.
pub struct NestedRule;

impl NestedRule {
    fn method<'a>(ctx: &RuleContext<'a>) -> &'a str {
        ctx.directive
            .value("method")
            .map(str::trim)
            .unwrap_or(&ctx.config().method_name)
    }
}

impl Rule for NestedRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "delegate to the member type's validation method",
            applies_to: &["custom"],
            parameters: vec![ParamMeta::optional("method", "identifier")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        let Classification::Custom(custom) = ctx.classification() else {
            return inapplicable(ctx);
        };
        capability(ctx, custom, Self::method(ctx))
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let Classification::Custom(custom) = &ctx.subject.classification else {
            return;
        };
        let method = Self::method(ctx);
        if capability(ctx, custom, method).has_errors() {
            return;
        }
        delegate(out, ctx.subject, method);
    }
}

/// `dive(element directives)`.
pub struct DiveRule;

impl DiveRule {
    /// Element directives carried by the `dive` arguments.
    fn elements(directive: &Directive) -> Vec<Directive> {
        let flags = directive
            .positional
            .iter()
            .map(|name| Directive::new(&directive.namespace, name.trim()));
        let keyed = directive.keyed.iter().map(|(name, value)| {
            let element = Directive::new(&directive.namespace, name.as_str());
            if value.is_empty() {
                element
            } else {
                element.with_arg(value.as_str())
            }
        });
        flags.chain(keyed).collect()
    }

    fn element_subject(ctx: &RuleContext<'_>, element: &Classification) -> Subject {
        ctx.subject.element("item", "field.as_str()", element.clone())
    }
}

impl Rule for DiveRule {
    fn describe(&self) -> RuleDescription {
        RuleDescription {
            summary:    "apply element directives to every list element or map value",
            applies_to: &["list", "map"],
            parameters: vec![ParamMeta::optional("<directive>", "element directive")]
        }
    }

    fn validate(&self, ctx: &RuleContext<'_>) -> Diagnostics {
        let Some(element) = ctx.classification().element() else {
            return inapplicable(ctx);
        };
        let directives = Self::elements(ctx.directive);

        if directives.is_empty() {
            return match element.pointee() {
                Classification::Custom(custom) => {
                    capability(ctx, custom, &ctx.config().method_name)
                }
                _ => missing(ctx, "element directive")
            };
        }

        let subject = Self::element_subject(ctx, element);
        ctx.dispatcher
            .validate_subject(ctx.declaration, ctx.member, &subject, &directives)
    }

    fn generate(&self, ctx: &RuleContext<'_>, out: &mut MemberEmitter<'_>) {
        let classification = &ctx.subject.classification;
        let Some(element) = classification.element() else {
            return;
        };
        let directives = Self::elements(ctx.directive);
        if directives.is_empty()
            && let Classification::Custom(custom) = element.pointee()
            && capability(ctx, custom, &ctx.config().method_name).has_errors()
        {
            return;
        }
        let name = ctx.member.name.trim_start_matches("r#");
        let receiver = ctx.subject.receiver();

        let start = out.statements().len();
        match classification {
            Classification::Map(key, _) => {
                let key = match **key {
                    Classification::String | Classification::Numeric(_) | Classification::Boolean => "{key}",
                    _ => "{key:?}"
                };
                out.line(format!("for (key, item) in {receiver}.iter() {{"));
                out.line(format!("let field = format!(\"{name}[{key}]\");"));
            }
            _ => {
                out.line(format!("for (index, item) in {receiver}.iter().enumerate() {{"));
                out.line(format!("let field = format!(\"{name}[{{index}}]\");"));
            }
        }
        let body = out.statements().len();

        let subject = Self::element_subject(ctx, element);
        if directives.is_empty() {
            if matches!(element, Classification::Custom(_)) {
                delegate(out, &subject, &ctx.config().method_name);
            } else if let Classification::Pointer(inner) = element
                && matches!(**inner, Classification::Custom(_))
            {
                out.line("if let Some(value) = item {");
                delegate(out, &subject.rebind("value", (**inner).clone()), &ctx.config().method_name);
                out.line("}");
            }
        } else {
            ctx.dispatcher.generate_subject(
                ctx.declaration,
                ctx.member,
                &subject,
                &directives,
                &mut out.scope()
            );
        }

        if out.statements().len() == body {
            out.truncate(start);
        } else {
            out.line("}");
        }
    }
}
