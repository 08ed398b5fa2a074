// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Directive dispatch.
//!
//! For every member of a selected declaration the dispatcher collects the
//! directives of the configured namespace (doc text first, then comment
//! text), resolves each one in the [`RuleRegistry`], stable-sorts them by
//! [`Priority`] and runs either `validate` or `generate` in that order.
//!
//! # Generated Shape
//!
//! ```rust,ignore
//! impl User {
//!     pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
//!         let mut errors = docrule_runtime::ValidationErrors::new();
//!         if self.name.is_empty() {
//!             errors.add("name", "must not be empty");
//!         }
//!         if let Some(value) = &self.nick {
//!             if value.chars().count() < 3 {
//!                 errors.add("nick", "length must be at least 3");
//!             }
//!         }
//!         errors.into_result()
//!     }
//! }
//!
//! impl docrule_runtime::Validate for User {
//!     fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
//!         User::validate(self)
//!     }
//! }
//! ```
//!
//! Optional members are unwrapped once per run of consecutive rules that
//! want the inner value; `required` sees the `Option` itself.

use tracing::debug;

use crate::config::Config;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::directive::{Directive, parse_namespace};
use crate::emit::GeneratedUnit;
use crate::introspect::SourceModel;
use crate::model::{Classification, Declaration, Member};
use crate::rules::support::ERRORS;
use crate::rules::{MemberEmitter, Priority, Rule, RuleContext, RuleRegistry, Subject};

/// Type-level directive selecting a declaration for generation.
pub const GENERATE: &str = "generate";

/// Runs rules over declarations.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    model:    &'a SourceModel,
    registry: &'a RuleRegistry,
    config:   &'a Config
}

impl<'a> Dispatcher<'a> {
    /// Dispatcher over `model` using `registry`.
    #[must_use]
    pub fn new(model: &'a SourceModel, registry: &'a RuleRegistry, config: &'a Config) -> Self {
        Self {
            model,
            registry,
            config
        }
    }

    /// Source model.
    #[must_use]
    pub fn model(&self) -> &'a SourceModel {
        self.model
    }

    /// Rule registry.
    #[must_use]
    pub fn registry(&self) -> &'a RuleRegistry {
        self.registry
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Directives on a member: doc text, then comment text.
    #[must_use]
    pub fn member_directives(&self, member: &Member) -> Vec<Directive> {
        let mut directives = parse_namespace(&member.doc, &self.config.namespace);
        directives.extend(parse_namespace(&member.comment, &self.config.namespace));
        directives
    }

    /// Directives on the declaration itself.
    #[must_use]
    pub fn type_directives(&self, declaration: &Declaration) -> Vec<Directive> {
        parse_namespace(&declaration.doc, &self.config.namespace)
    }

    /// Whether `declaration` gets a generated method.
    #[must_use]
    pub fn is_selected(&self, declaration: &Declaration) -> bool {
        if self
            .type_directives(declaration)
            .iter()
            .any(|d| d.name == GENERATE)
        {
            return true;
        }
        self.config.select_annotated
            && declaration
                .members
                .iter()
                .any(|member| !self.member_directives(member).is_empty())
    }

    /// Selected declarations in load order.
    pub fn selected(&self) -> impl Iterator<Item = &'a Declaration> + '_ {
        self.model
            .declarations()
            .iter()
            .filter(move |d| self.is_selected(d))
    }

    /// Known directives with fresh rules, stable-sorted by band.
    fn order<'d>(&self, directives: &'d [Directive]) -> Vec<(Priority, &'d Directive, Box<dyn Rule>)> {
        let mut ordered: Vec<_> = directives
            .iter()
            .filter_map(|directive| {
                self.registry
                    .resolve(&directive.name)
                    .map(|(priority, rule)| (priority, directive, rule))
            })
            .collect();
        ordered.sort_by_key(|(priority, ..)| *priority);
        ordered
    }

    /// Validate every directive of `declaration`.
    #[must_use]
    pub fn validate_declaration(&self, declaration: &Declaration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for directive in self.type_directives(declaration) {
            if directive.name == GENERATE {
                continue;
            }
            if self.registry.contains(&directive.name) {
                diagnostics.warning(
                    DiagnosticCode::InapplicableDirective,
                    &declaration.position,
                    format!(
                        "`{}:@{}` applies to members, not to type `{}`",
                        directive.namespace, directive.name, declaration.name
                    )
                );
            } else {
                diagnostics.info(
                    DiagnosticCode::UnknownDirective,
                    &declaration.position,
                    format!("unknown directive `{}:@{}`", directive.namespace, directive.name)
                );
            }
        }

        for member in &declaration.members {
            let directives = self.member_directives(member);
            if directives.is_empty() {
                continue;
            }
            let subject = Subject::field(declaration, member);
            diagnostics.extend(self.validate_subject(declaration, member, &subject, &directives));
        }
        diagnostics
    }

    /// Validate `directives` against one subject.
    #[must_use]
    pub fn validate_subject(
        &self,
        declaration: &Declaration,
        member: &Member,
        subject: &Subject,
        directives: &[Directive]
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for directive in directives {
            if !self.registry.contains(&directive.name) {
                diagnostics.info(
                    DiagnosticCode::UnknownDirective,
                    &member.position,
                    format!(
                        "unknown directive `{}:@{}` on `{}`",
                        directive.namespace, directive.name, member.name
                    )
                );
            }
        }

        for (_, directive, rule) in self.order(directives) {
            let unwrapped = unwrap(subject, rule.as_ref());
            let ctx = RuleContext {
                dispatcher: self,
                declaration,
                member,
                subject: unwrapped.as_ref().unwrap_or(subject),
                directive,
                siblings: directives
            };
            diagnostics.extend(rule.validate(&ctx));
        }
        diagnostics
    }

    /// Print the generated method for `declaration` into `unit`.
    pub fn generate_declaration(&self, declaration: &Declaration, unit: &mut GeneratedUnit) {
        let runtime = &self.config.runtime_crate;
        let method = &self.config.method_name;
        let name = &declaration.name;
        debug!(declaration = %name, "generating");

        let errors_type = unit.qualify(runtime, "ValidationErrors");
        unit.line(format!("impl {name} {{"));
        unit.line(format!("pub fn {method}(&self) -> Result<(), {errors_type}> {{"));
        let body = unit.statements().len();

        for member in &declaration.members {
            let directives = self.member_directives(member);
            if directives.is_empty() {
                continue;
            }
            let subject = Subject::field(declaration, member);
            self.generate_subject(
                declaration,
                member,
                &subject,
                &directives,
                &mut MemberEmitter::new(unit)
            );
        }

        if unit.statements().len() == body {
            unit.line("Ok(())");
        } else {
            unit.insert_line(body, format!("let mut {ERRORS} = {errors_type}::new();"));
            unit.line(format!("{ERRORS}.into_result()"));
        }
        unit.line("}");
        unit.line("}");

        let validate = unit.qualify(runtime, "Validate");
        unit.line(format!("impl {validate} for {name} {{"));
        unit.line(format!("fn validate(&self) -> Result<(), {errors_type}> {{"));
        unit.line(format!("{name}::{method}(self)"));
        unit.line("}");
        unit.line("}");
    }

    /// Generate `directives` for one subject in band order.
    ///
    /// Unknown directives are skipped.
    pub fn generate_subject(
        &self,
        declaration: &Declaration,
        member: &Member,
        subject: &Subject,
        directives: &[Directive],
        out: &mut MemberEmitter<'_>
    ) {
        let runtime = &self.config.runtime_crate;
        let mut open: Option<usize> = None;

        for (_, directive, rule) in self.order(directives) {
            let unwrapped = unwrap(subject, rule.as_ref());
            match (&unwrapped, open) {
                (Some(_), None) => {
                    open = Some(out.statements().len());
                    out.line(format!("if let Some(value) = {} {{", subject.by_ref()));
                }
                (None, Some(start)) => {
                    close(out, start);
                    open = None;
                }
                _ => {}
            }

            let ctx = RuleContext {
                dispatcher: self,
                declaration,
                member,
                subject: unwrapped.as_ref().unwrap_or(subject),
                directive,
                siblings: directives
            };
            for pattern in rule.required_auxiliary_patterns(&ctx) {
                out.require_pattern(&pattern, runtime);
            }
            rule.generate(&ctx, out);
        }

        if let Some(start) = open {
            close(out, start);
        }
    }
}

/// Subject seen through `if let Some(value)`, when `rule` wants it.
fn unwrap(subject: &Subject, rule: &dyn Rule) -> Option<Subject> {
    match &subject.classification {
        Classification::Pointer(inner) if rule.unwraps_optional() => {
            Some(subject.rebind("value", (**inner).clone()))
        }
        _ => None
    }
}

/// Close an `if let` block opened at `start`, dropping it if empty.
fn close(out: &mut MemberEmitter<'_>, start: usize) {
    if out.statements().len() == start + 1 {
        out.truncate(start);
    } else {
        out.line("}");
    }
}

#[cfg(test)]
mod tests;
