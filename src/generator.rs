// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generators.
//!
//! A [`Generator`] turns a [`SourceModel`] into artifacts and diagnostics.
//! [`ValidateGenerator`] is the built-in one: it validates every selected
//! declaration, then writes one artifact per compilation unit that has
//! selected declarations.
//!
//! # Example
//!
//! ```rust,ignore
//! let output = ValidateGenerator::new(Config::default())
//!     .generate_sources(&SynProvider::new().with_file("crate::models", "src/models.rs"), &[])?;
//!
//! for artifact in &output.artifacts {
//!     std::fs::write(&artifact.path, &artifact.contents)?;
//! }
//! if !output.is_success() {
//!     for diagnostic in &output.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//! }
//! ```
//!
//! Artifacts are meant to be `include!`d into the module they were generated
//! for, so statics and own-module symbols resolve without paths.

use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};

use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Position};
use crate::dispatch::Dispatcher;
use crate::emit::GeneratedUnit;
use crate::error::SourceError;
use crate::introspect::{IntrospectOptions, Introspector, SourceModel};
use crate::provider::SourceModelProvider;
use crate::rules::{DirectiveMeta, RuleRegistry};

/// Code generator over a source model.
pub trait Generator {
    /// Generator name, used in logs.
    fn name(&self) -> &str;

    /// Validate and generate every artifact.
    fn run(&self, model: &SourceModel) -> RunOutput;

    /// Every directive the generator understands.
    fn directive_metadata(&self) -> Vec<DirectiveMeta>;

    /// Validate directives without generating.
    fn validate(&self, model: &SourceModel) -> Vec<Diagnostic>;
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Module the artifact belongs to.
    pub module_path:  String,
    /// Destination next to the source file.
    pub path:         PathBuf,
    /// Rendered contents, starting with the generated marker.
    pub contents:     String,
    /// Formatter error when `contents` is unformatted.
    pub format_error: Option<String>
}

/// Result of a generator run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Generated artifacts in unit order.
    pub artifacts:   Vec<Artifact>,
    /// Diagnostics in traversal order.
    pub diagnostics: Vec<Diagnostic>
}

impl RunOutput {
    /// Whether no error-severity diagnostic was reported.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Artifact for `module_path`.
    #[must_use]
    pub fn artifact(&self, module_path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.module_path == module_path)
    }
}

/// Generates `validate` methods from directives.
#[derive(Debug, Clone)]
pub struct ValidateGenerator {
    registry: RuleRegistry,
    config:   Config
}

impl Default for ValidateGenerator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ValidateGenerator {
    /// Generator with the built-in rules.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            registry: RuleRegistry::builtin(),
            config
        }
    }

    /// Replace the rule registry.
    #[must_use]
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rule registry in use.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Load units from `provider`, introspect them and run.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when a unit cannot be loaded; nothing is
    /// generated in that case.
    pub fn generate_sources<P>(&self, provider: &P, patterns: &[&str]) -> Result<RunOutput, SourceError>
    where
        P: SourceModelProvider + ?Sized
    {
        let units = provider.load(patterns)?;
        let model = Introspector::new(IntrospectOptions {
            exclude_generated: self.config.exclude_generated
        })
        .build(units);
        Ok(self.run(&model))
    }

    fn dispatcher<'a>(&'a self, model: &'a SourceModel) -> Dispatcher<'a> {
        Dispatcher::new(model, &self.registry, &self.config)
    }

    fn artifact_path(&self, source: &Path, module_path: &str) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_else(|| module_path.rsplit("::").next().unwrap_or(module_path));
        source.with_file_name(format!("{stem}{}.rs", self.config.output_suffix))
    }
}

impl Generator for ValidateGenerator {
    fn name(&self) -> &str {
        "validate"
    }

    fn run(&self, model: &SourceModel) -> RunOutput {
        let span = info_span!("generate", generator = self.name());
        let _entered = span.enter();

        let dispatcher = self.dispatcher(model);
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(self.validate(model));

        let mut artifacts = Vec::new();
        for (id, unit) in model.units().iter().enumerate() {
            let mut out = GeneratedUnit::new(&unit.module_path);
            let mut selected = 0;
            for declaration in model
                .declarations_in(id)
                .filter(|d| dispatcher.is_selected(d))
            {
                dispatcher.generate_declaration(declaration, &mut out);
                selected += 1;
            }
            out.set_skip(selected == 0);

            let Some(rendered) = out.render() else {
                debug!(module = %unit.module_path, "no selected declarations");
                continue;
            };
            if let Some(error) = &rendered.format_error {
                diagnostics.warning_fmt(
                    DiagnosticCode::FormatFailure,
                    &Position::new(&unit.path, 0, 0),
                    format_args!(
                        "generated code for `{}` could not be formatted: {error}",
                        unit.module_path
                    )
                );
            }
            debug!(module = %unit.module_path, declarations = selected, "rendered");
            artifacts.push(Artifact {
                module_path:  unit.module_path.clone(),
                path:         self.artifact_path(&unit.path, &unit.module_path),
                contents:     rendered.text,
                format_error: rendered.format_error
            });
        }

        let output = RunOutput {
            artifacts,
            diagnostics: diagnostics.collect()
        };
        info!(
            artifacts = output.artifacts.len(),
            diagnostics = output.diagnostics.len(),
            success = output.is_success(),
            "generation finished"
        );
        output
    }

    fn directive_metadata(&self) -> Vec<DirectiveMeta> {
        self.registry.metadata()
    }

    fn validate(&self, model: &SourceModel) -> Vec<Diagnostic> {
        let dispatcher = self.dispatcher(model);
        let mut diagnostics = Diagnostics::new();
        for declaration in dispatcher.selected() {
            diagnostics.extend(dispatcher.validate_declaration(declaration));
        }
        diagnostics.collect()
    }
}
