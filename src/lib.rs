// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # docrule
//!
//! Generate validation code from directives written in doc comments.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! /// docrule:@generate
//! pub struct User {
//!     /// docrule:@required
//!     /// docrule:@min_len(3)
//!     pub name: String,
//!
//!     pub nick: Option<String>, // docrule:@max_len(16)
//!
//!     /// docrule:@duration
//!     /// docrule:@duration_min(1s)
//!     /// docrule:@duration_max(1h)
//!     pub session_ttl: String,
//!
//!     /// docrule:@nested
//!     pub address: Address,
//! }
//! ```
//!
//! ```rust,ignore
//! use docrule::{Generator, SynProvider, ValidateGenerator, Config};
//!
//! let provider = SynProvider::new().with_file("crate::models", "src/models.rs");
//! let output = ValidateGenerator::new(Config::default()).generate_sources(&provider, &[])?;
//! ```
//!
//! Produces `src/models_docrule.rs` with `impl User { pub fn validate(&self) }`
//! and a `docrule_runtime::Validate` impl, to be pulled in with
//! `include!("models_docrule.rs");`.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | load source units | [`provider`] |
//! | build the source model | [`introspect`] |
//! | parse directives | [`directive`] |
//! | order and run rules | [`dispatch`], [`rules`] |
//! | print and render artifacts | [`emit`] |
//! | report problems | [`diagnostics`] |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod directive;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod generator;
pub mod introspect;
pub mod model;
pub mod provider;
pub mod rules;
pub mod utils;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Position, Severity};
pub use directive::{Directive, parse, parse_namespace};
pub use dispatch::Dispatcher;
pub use emit::{AuxiliaryPattern, GeneratedUnit, Rendered, Token};
pub use error::SourceError;
pub use generator::{Artifact, Generator, RunOutput, ValidateGenerator};
pub use introspect::{IntrospectOptions, Introspector, SourceModel};
pub use model::{Classification, CompilationUnit, CustomType, Declaration, EnumDeclaration, Member, NumericKind};
pub use provider::{SourceModelProvider, SynProvider};
pub use rules::{DirectiveMeta, Priority, Rule, RuleContext, RuleRegistry, RuleRegistryBuilder};
pub use utils::marker::{GENERATED_MARKER, is_generated};
