// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! Every field has a default, so hosts can deserialize a partial document
//! (from `Cargo.toml` metadata, a JSON file, environment) and override only
//! what they need. Loading the document is left to the host.
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `namespace` | `docrule` | directive prefix before `:@` |
//! | `method_name` | `validate` | generated and delegated method name |
//! | `runtime_crate` | `docrule_runtime` | crate path used by generated code |
//! | `select_annotated` | `false` | generate for any type with member directives |
//! | `output_suffix` | `_docrule` | artifact file stem suffix |
//! | `exclude_generated` | `true` | skip units carrying the generated marker |

use serde::{Deserialize, Serialize};

/// Configuration shared by the introspector, dispatcher and generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directive namespace.
    pub namespace:         String,
    /// Name of the generated method and the default delegate for `nested`.
    pub method_name:       String,
    /// Path of the runtime crate in generated code.
    pub runtime_crate:     String,
    /// Select declarations with member directives even without `generate`.
    pub select_annotated:  bool,
    /// Suffix appended to the source file stem for artifacts.
    pub output_suffix:     String,
    /// Skip units that start with the generated marker.
    pub exclude_generated: bool
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace:         "docrule".to_string(),
            method_name:       "validate".to_string(),
            runtime_crate:     "docrule_runtime".to_string(),
            select_annotated:  false,
            output_suffix:     "_docrule".to_string(),
            exclude_generated: true
        }
    }
}

impl Config {
    /// Set the directive namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the generated method name.
    #[must_use]
    pub fn with_method_name(mut self, name: impl Into<String>) -> Self {
        self.method_name = name.into();
        self
    }

    /// Set the runtime crate path.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Select every declaration that carries member directives.
    #[must_use]
    pub fn with_select_annotated(mut self, enabled: bool) -> Self {
        self.select_annotated = enabled;
        self
    }

    /// Set the artifact suffix.
    #[must_use]
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Include or skip previously generated units.
    #[must_use]
    pub fn with_exclude_generated(mut self, enabled: bool) -> Self {
        self.exclude_generated = enabled;
        self
    }
}
