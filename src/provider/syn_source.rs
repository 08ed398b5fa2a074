// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust source provider backed by `syn`.
//!
//! # Lowering
//!
//! | Rust item | Raw item |
//! |-----------|----------|
//! | `struct S { a: T }` | [`RawItem::Record`] |
//! | `struct S(T);`, `struct S;`, `enum E {}` | [`RawItem::Opaque`] |
//! | `type A = T;` | [`RawItem::Alias`] |
//! | consecutive `const` items | one [`RawItem::Constants`] run |
//! | `impl S { fn m() }`, `impl T for S { fn m() }` | [`RawItem::Methods`] |
//! | `use a::b as c;` | [`ModuleBinding`] |
//!
//! Inline `mod` blocks are not descended into; register them as separate
//! sources instead.

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Fields, GenericArgument, ImplItem, Item, PathArguments, Type, UseTree};
use tracing::debug;

use super::{RawAlias, RawConst, RawField, RawItem, RawRecord, RawType, RawUnit, SourceModelProvider, matches_any};
use crate::diagnostics::Position;
use crate::error::SourceError;
use crate::model::{ModuleBinding, TypeExpr};
use crate::utils::docs::{extract_doc_comments, leading_comment, trailing_comment};
use crate::utils::marker::is_generated;
use crate::utils::tokens::tidy;

#[derive(Debug, Clone)]
enum Origin {
    Memory(String),
    Disk
}

#[derive(Debug, Clone)]
struct Source {
    module_path: String,
    path:        PathBuf,
    origin:      Origin
}

/// Provider reading Rust source files.
///
/// # Example
///
/// ```rust,ignore
/// let provider = SynProvider::new()
///     .with_file("crate::models", "src/models.rs")
///     .with_source("crate::api", "src/api.rs", API_SOURCE);
/// let units = provider.load(&["crate::*"])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SynProvider {
    sources: Vec<Source>
}

impl SynProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register in-memory source text for `module_path`.
    #[must_use]
    pub fn with_source(
        mut self,
        module_path: impl Into<String>,
        path: impl Into<PathBuf>,
        text: impl Into<String>
    ) -> Self {
        self.sources.push(Source {
            module_path: module_path.into(),
            path:        path.into(),
            origin:      Origin::Memory(text.into())
        });
        self
    }

    /// Register a file read from disk when loading.
    #[must_use]
    pub fn with_file(mut self, module_path: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source {
            module_path: module_path.into(),
            path:        path.into(),
            origin:      Origin::Disk
        });
        self
    }
}

impl SourceModelProvider for SynProvider {
    fn load(&self, patterns: &[&str]) -> Result<Vec<RawUnit>, SourceError> {
        let mut units = Vec::new();

        for source in &self.sources {
            if !matches_any(patterns, &source.module_path) {
                continue;
            }

            let text = match &source.origin {
                Origin::Memory(text) => text.clone(),
                Origin::Disk => fs::read_to_string(&source.path).map_err(|err| SourceError::Io {
                    path:   source.path.clone(),
                    source: err
                })?
            };

            debug!(module = %source.module_path, path = %source.path.display(), "parsing unit");
            units.push(parse_unit(&source.module_path, &source.path, &text)?);
        }

        Ok(units)
    }
}

/// Parse one Rust source file into a raw unit.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] when `text` is not valid Rust.
pub fn parse_unit(module_path: &str, path: &Path, text: &str) -> Result<RawUnit, SourceError> {
    let file = syn::parse_file(text).map_err(|err| SourceError::Parse {
        path:   path.to_path_buf(),
        source: err
    })?;
    let lines: Vec<&str> = text.lines().collect();

    let mut unit = RawUnit {
        module_path: module_path.to_string(),
        path:        path.to_path_buf(),
        bindings:    Vec::new(),
        items:       Vec::new(),
        generated:   is_generated(text)
    };

    let mut run = Vec::new();
    for item in &file.items {
        if let Item::Const(constant) = item {
            run.push(RawConst {
                name:    constant.ident.to_string(),
                ty:      Some(tidy(&constant.ty)),
                literal: tidy(&constant.expr),
                doc:     extract_doc_comments(&constant.attrs)
            });
            continue;
        }
        if !run.is_empty() {
            unit.items.push(RawItem::Constants(std::mem::take(&mut run)));
        }

        match item {
            Item::Use(item_use) => collect_bindings(&item_use.tree, "", &mut unit.bindings),
            Item::Struct(item) => {
                let doc = extract_doc_comments(&item.attrs);
                match &item.fields {
                    Fields::Named(named) => unit.items.push(RawItem::Record(RawRecord {
                        name:     item.ident.to_string(),
                        doc,
                        position: position(path, item.ident.span()),
                        fields:   named
                            .named
                            .iter()
                            .filter_map(|field| lower_field(path, &lines, field))
                            .collect()
                    })),
                    _ => unit.items.push(RawItem::Opaque(RawType {
                        name: item.ident.to_string(),
                        doc
                    }))
                }
            }
            Item::Enum(item) => unit.items.push(RawItem::Opaque(RawType {
                name: item.ident.to_string(),
                doc:  extract_doc_comments(&item.attrs)
            })),
            Item::Type(item) => unit.items.push(RawItem::Alias(RawAlias {
                name:   item.ident.to_string(),
                doc:    extract_doc_comments(&item.attrs),
                target: lower_type(&item.ty)
            })),
            Item::Impl(item) => {
                if let Some(type_name) = lower_type(&item.self_ty).last_segment() {
                    let names = item
                        .items
                        .iter()
                        .filter_map(|impl_item| match impl_item {
                            ImplItem::Fn(method) => Some(method.sig.ident.to_string()),
                            _ => None
                        })
                        .collect();
                    unit.items.push(RawItem::Methods {
                        type_name: type_name.to_string(),
                        names
                    });
                }
            }
            _ => {}
        }
    }
    if !run.is_empty() {
        unit.items.push(RawItem::Constants(run));
    }

    Ok(unit)
}

fn position(path: &Path, span: Span) -> Position {
    let start = span.start();
    Position::new(path, start.line, start.column + 1)
}

fn lower_field(path: &Path, lines: &[&str], field: &syn::Field) -> Option<RawField> {
    let ident = field.ident.as_ref()?;
    let ident_line = ident.span().start().line;
    let end_line = field.ty.span().end().line.max(ident_line);

    let mut comment = leading_comment(lines, ident_line);
    let trailing = trailing_comment(lines, end_line);
    if !trailing.is_empty() {
        if !comment.is_empty() {
            comment.push('\n');
        }
        comment.push_str(&trailing);
    }

    Some(RawField {
        name: ident.to_string(),
        ty: lower_type(&field.ty),
        signature: tidy(&field.ty),
        doc: extract_doc_comments(&field.attrs),
        comment,
        position: position(path, ident.span())
    })
}

/// Lower a syn type into the neutral type tree.
pub(crate) fn lower_type(ty: &Type) -> TypeExpr {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segments = type_path
                .path
                .segments
                .iter()
                .map(|s| s.ident.to_string())
                .collect();
            let args = type_path
                .path
                .segments
                .last()
                .map(|segment| match &segment.arguments {
                    PathArguments::AngleBracketed(generic) => generic
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Type(ty) => Some(lower_type(ty)),
                            _ => None
                        })
                        .collect(),
                    _ => Vec::new()
                })
                .unwrap_or_default();
            TypeExpr::Path {
                segments,
                args
            }
        }
        Type::Reference(reference) => TypeExpr::Reference(Box::new(lower_type(&reference.elem))),
        Type::Slice(slice) => TypeExpr::Slice(Box::new(lower_type(&slice.elem))),
        Type::Array(array) => TypeExpr::Array(Box::new(lower_type(&array.elem))),
        Type::Tuple(tuple) => TypeExpr::Tuple(tuple.elems.iter().map(lower_type).collect()),
        Type::Paren(paren) => lower_type(&paren.elem),
        Type::Group(group) => lower_type(&group.elem),
        other => TypeExpr::Other(tidy(other))
    }
}

fn collect_bindings(tree: &UseTree, prefix: &str, out: &mut Vec<ModuleBinding>) {
    let join = |ident: &syn::Ident| {
        if prefix.is_empty() {
            ident.to_string()
        } else {
            format!("{prefix}::{ident}")
        }
    };

    match tree {
        UseTree::Path(path) => collect_bindings(&path.tree, &join(&path.ident), out),
        UseTree::Name(name) if name.ident == "self" => {
            if !prefix.is_empty() {
                out.push(ModuleBinding::new(prefix));
            }
        }
        UseTree::Name(name) => out.push(ModuleBinding::new(join(&name.ident))),
        UseTree::Rename(rename) => {
            let path = if rename.ident == "self" {
                prefix.to_string()
            } else {
                join(&rename.ident)
            };
            if rename.rename != "_" && !path.is_empty() {
                out.push(ModuleBinding::aliased(path, rename.rename.to_string()));
            }
        }
        UseTree::Group(group) => {
            for tree in &group.items {
                collect_bindings(tree, prefix, out);
            }
        }
        UseTree::Glob(_) => {}
    }
}
