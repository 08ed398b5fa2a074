// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration introspection.
//!
//! Builds the [`SourceModel`] from raw units in two passes:
//!
//! 1. Every named type lands in the type index (records, aliases, opaque
//!    types), then every record becomes a [`Declaration`] whose members are
//!    classified once. The index is complete before the first member is
//!    classified, so aliases declared further down a file resolve.
//! 2. Constant runs are grouped by explicit or carried-forward type into
//!    [`EnumDeclaration`]s.
//!
//! # Classification
//!
//! | Rust type | Classification |
//! |-----------|----------------|
//! | `String`, `str`, `Cow<str>` | `String` |
//! | `bool` | `Boolean` |
//! | integer primitives | `Numeric(Integer)` |
//! | `f32`, `f64` | `Numeric(Float)` |
//! | `Vec<u8>`, `[u8]`, `[u8; N]`, `Bytes` | `Bytes` |
//! | `Vec<T>`, `VecDeque<T>`, sets, `[T]`, `[T; N]` | `List(T)` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>` | `Map(K, V)` |
//! | `Option<T>` | `Pointer(T)` |
//! | `Box<T>`, `Rc<T>`, `Arc<T>`, `&T` | `T` |
//! | alias | its target |
//! | anything else | `Custom` |

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::model::{
    Classification, CompilationUnit, CustomType, Declaration, EnumDeclaration, EnumValue, Member,
    NumericKind, TypeExpr, UnitId
};
use crate::provider::{RawConst, RawItem, RawUnit};

/// Maximum alias chain followed before giving up.
const MAX_ALIAS_DEPTH: usize = 16;

/// Introspection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrospectOptions {
    /// Drop units that start with the generated-artifact marker.
    pub exclude_generated: bool
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            exclude_generated: true
        }
    }
}

#[derive(Debug, Clone)]
enum TypeEntry {
    Named,
    Alias(TypeExpr)
}

#[derive(Debug, Clone)]
struct IndexedType {
    doc:   String,
    entry: TypeEntry
}

/// Introspected declarations with their semantic index.
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    units:        Vec<CompilationUnit>,
    declarations: Vec<Declaration>,
    enums:        Vec<EnumDeclaration>,
    types:        HashMap<(UnitId, String), IndexedType>
}

impl SourceModel {
    /// All compilation units in load order.
    #[must_use]
    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    /// Unit by id, `None` if `id` does not come from this model.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&CompilationUnit> {
        self.units.get(id)
    }

    /// Module path of unit `id`, empty if `id` does not come from this model.
    #[must_use]
    pub fn module_path(&self, id: UnitId) -> &str {
        self.unit(id).map_or("", |unit| unit.module_path.as_str())
    }

    /// All record declarations in load order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Declarations of one unit.
    pub fn declarations_in(&self, unit: UnitId) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(move |d| d.unit == unit)
    }

    /// All constant groups in load order.
    #[must_use]
    pub fn enums(&self) -> &[EnumDeclaration] {
        &self.enums
    }

    /// Declaration named `name` in module `module`.
    #[must_use]
    pub fn declaration(&self, module: &str, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.name == name && self.module_path(d.unit) == module)
    }

    /// Constant group for type `name` in module `module`.
    #[must_use]
    pub fn enum_for(&self, module: &str, name: &str) -> Option<&EnumDeclaration> {
        self.enums
            .iter()
            .find(|e| e.name == name && self.module_path(e.unit) == module)
    }

    /// Whether any unit of `module` declares `method` on `type_name`.
    #[must_use]
    pub fn has_method(&self, module: &str, type_name: &str, method: &str) -> bool {
        self.units
            .iter()
            .any(|u| u.module_path == module && u.has_method(type_name, method))
    }

    /// Module path bound to `token` in `unit`.
    ///
    /// Searches the unit's bindings for one whose explicit alias or last path
    /// segment equals `token`; the first match wins. Paths relative to
    /// `self` or `super` are made absolute against the unit's module.
    #[must_use]
    pub fn resolve_module(&self, unit: UnitId, token: &str) -> Option<String> {
        let unit = self.units.get(unit)?;
        unit.bindings
            .iter()
            .find(|b| b.matches(token))
            .map(|b| absolute(&unit.module_path, &b.path))
    }

    /// Classify `ty` as written in `unit`.
    #[must_use]
    pub fn classify(&self, unit: UnitId, ty: &TypeExpr) -> Classification {
        self.classify_at(unit, ty, 0)
    }

    fn classify_at(&self, unit: UnitId, ty: &TypeExpr, depth: usize) -> Classification {
        match ty {
            TypeExpr::Reference(inner) => self.classify_at(unit, inner, depth),
            TypeExpr::Slice(inner) | TypeExpr::Array(inner) => {
                if is_byte(inner) {
                    Classification::Bytes
                } else {
                    Classification::List(Box::new(self.classify_at(unit, inner, depth)))
                }
            }
            TypeExpr::Path {
                segments,
                args
            } => self.classify_path(unit, segments, args, depth),
            TypeExpr::Tuple(_) | TypeExpr::Other(_) => unresolved(ty.to_string())
        }
    }

    fn classify_path(
        &self,
        unit: UnitId,
        segments: &[String],
        args: &[TypeExpr],
        depth: usize
    ) -> Classification {
        let Some(last) = segments.last() else {
            return unresolved(String::new());
        };

        if segments.len() == 1
            && let Some(indexed) = self.types.get(&(unit, last.clone()))
        {
            return self.classify_indexed(unit, last, indexed, depth);
        }

        if let Some(builtin) = self.builtin(unit, last, args, depth) {
            return builtin;
        }

        let Some((module, name)) = self.resolve_type_path(unit, segments) else {
            return unresolved(last.clone());
        };

        let target = self
            .units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.module_path == module)
            .find_map(|(id, _)| self.types.get(&(id, name.clone())).map(|t| (id, t)));

        match target {
            Some((id, indexed)) => self.classify_indexed(id, &name, indexed, depth),
            None => Classification::Custom(CustomType {
                name,
                module: Some(module)
            })
        }
    }

    fn classify_indexed(
        &self,
        unit: UnitId,
        name: &str,
        indexed: &IndexedType,
        depth: usize
    ) -> Classification {
        match &indexed.entry {
            TypeEntry::Named => Classification::Custom(CustomType {
                name:   name.to_string(),
                module: Some(self.module_path(unit).to_string())
            }),
            TypeEntry::Alias(_) if depth >= MAX_ALIAS_DEPTH => unresolved(name.to_string()),
            TypeEntry::Alias(target) => self.classify_at(unit, target, depth + 1)
        }
    }

    fn builtin(
        &self,
        unit: UnitId,
        last: &str,
        args: &[TypeExpr],
        depth: usize
    ) -> Option<Classification> {
        let arg = |index: usize| {
            args.get(index)
                .map_or_else(|| unresolved("_".into()), |ty| self.classify_at(unit, ty, depth))
        };

        if let Some(kind) = NumericKind::from_primitive(last) {
            return Some(Classification::Numeric(kind));
        }

        let classification = match last {
            "String" | "str" => Classification::String,
            "Cow" => match args.first() {
                Some(TypeExpr::Path {
                    segments, ..
                }) if segments.last().is_some_and(|s| s == "str") => Classification::String,
                _ => arg(0)
            },
            "bool" => Classification::Boolean,
            "Bytes" | "BytesMut" => Classification::Bytes,
            "Vec" | "VecDeque" if args.first().is_some_and(is_byte) => Classification::Bytes,
            "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "IndexSet" => {
                Classification::List(Box::new(arg(0)))
            }
            "HashMap" | "BTreeMap" | "IndexMap" => {
                Classification::Map(Box::new(arg(0)), Box::new(arg(1)))
            }
            "Option" => Classification::Pointer(Box::new(arg(0))),
            "Box" | "Rc" | "Arc" => arg(0),
            _ => return None
        };
        Some(classification)
    }

    /// Module path and name of a user type path, if its module resolves.
    pub(crate) fn resolve_type_path(&self, unit: UnitId, segments: &[String]) -> Option<(String, String)> {
        let source = self.units.get(unit)?;
        let own = &source.module_path;
        let (name, parents) = segments.split_last()?;

        if parents.is_empty() {
            let binding = source.bindings.iter().find(|b| b.matches(name))?;
            let full = absolute(own, &binding.path);
            let (module, imported) = full.rsplit_once("::")?;
            return Some((module.to_string(), imported.to_string()));
        }

        let head = parents[0].as_str();
        let base = match head {
            "crate" | "self" | "super" => absolute(own, head),
            _ => self.resolve_module(unit, head)?
        };
        let module = std::iter::once(base.as_str())
            .chain(parents[1..].iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("::");
        Some((absolute(own, &module), name.clone()))
    }
}

/// Make `path` absolute against module `own`.
fn absolute(own: &str, path: &str) -> String {
    let mut base: Vec<&str> = own.split("::").collect();
    let mut rest = path.split("::").peekable();

    match rest.peek().copied() {
        Some("self") => {
            rest.next();
        }
        Some("super") => {
            while rest.peek() == Some(&"super") {
                rest.next();
                if base.len() > 1 {
                    base.pop();
                }
            }
        }
        _ => return path.to_string()
    }

    base.extend(rest);
    base.join("::")
}

fn is_byte(ty: &TypeExpr) -> bool {
    matches!(ty, TypeExpr::Path { segments, args } if args.is_empty() && segments.len() == 1 && segments[0] == "u8")
}

fn unresolved(name: String) -> Classification {
    Classification::Custom(CustomType {
        name,
        module: None
    })
}

/// Constant type name usable as a value set, `None` for builtins.
fn value_set_type(signature: &str) -> Option<&str> {
    let signature = signature.trim();
    if signature.is_empty() || signature.contains(['&', '[', '(', '<']) {
        return None;
    }
    let name = signature.rsplit("::").next()?;
    let builtin = matches!(
        name,
        "bool"
            | "char"
            | "str"
            | "String"
            | "i8"
            | "i16"
            | "i32"
            | "i64"
            | "i128"
            | "isize"
            | "u8"
            | "u16"
            | "u32"
            | "u64"
            | "u128"
            | "usize"
            | "f32"
            | "f64"
    );
    (!builtin).then_some(name)
}

/// Builds a [`SourceModel`] from raw units.
#[derive(Debug, Clone, Default)]
pub struct Introspector {
    options: IntrospectOptions
}

impl Introspector {
    /// Create an introspector.
    #[must_use]
    pub fn new(options: IntrospectOptions) -> Self {
        Self {
            options
        }
    }

    /// Run both passes over `raw`.
    #[must_use]
    pub fn build(&self, raw: Vec<RawUnit>) -> SourceModel {
        let raw: Vec<RawUnit> = raw
            .into_iter()
            .filter(|unit| {
                let keep = !(self.options.exclude_generated && unit.generated);
                if !keep {
                    debug!(module = %unit.module_path, "skipping generated unit");
                }
                keep
            })
            .collect();

        let mut model = SourceModel::default();
        for (id, unit) in raw.iter().enumerate() {
            let mut methods: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for item in &unit.items {
                match item {
                    RawItem::Record(record) => index(&mut model, id, &record.name, &record.doc, TypeEntry::Named),
                    RawItem::Opaque(ty) => index(&mut model, id, &ty.name, &ty.doc, TypeEntry::Named),
                    RawItem::Alias(alias) => index(
                        &mut model,
                        id,
                        &alias.name,
                        &alias.doc,
                        TypeEntry::Alias(alias.target.clone())
                    ),
                    RawItem::Methods {
                        type_name,
                        names
                    } => methods
                        .entry(type_name.clone())
                        .or_default()
                        .extend(names.iter().cloned()),
                    RawItem::Constants(_) => {}
                }
            }
            model.units.push(CompilationUnit {
                module_path: unit.module_path.clone(),
                path:        unit.path.clone(),
                bindings:    unit.bindings.clone(),
                methods
            });
        }

        for (id, unit) in raw.iter().enumerate() {
            for item in &unit.items {
                let RawItem::Record(record) = item else {
                    continue;
                };
                let members = record
                    .fields
                    .iter()
                    .map(|field| Member {
                        name:           field.name.clone(),
                        type_signature: field.signature.clone(),
                        classification: model.classify(id, &field.ty),
                        doc:            field.doc.clone(),
                        comment:        field.comment.clone(),
                        position:       field.position.clone()
                    })
                    .collect::<Vec<_>>();
                debug!(
                    module = %unit.module_path,
                    declaration = %record.name,
                    members = members.len(),
                    "introspected declaration"
                );
                model.declarations.push(Declaration {
                    name:     record.name.clone(),
                    doc:      record.doc.clone(),
                    members,
                    unit:     id,
                    position: record.position.clone()
                });
            }
        }

        for (id, unit) in raw.iter().enumerate() {
            for item in &unit.items {
                if let RawItem::Constants(run) = item {
                    group_constants(&mut model, id, run);
                }
            }
        }

        model
    }
}

fn index(model: &mut SourceModel, unit: UnitId, name: &str, doc: &str, entry: TypeEntry) {
    model.types.insert(
        (unit, name.to_string()),
        IndexedType {
            doc: doc.to_string(),
            entry
        }
    );
}

fn group_constants(model: &mut SourceModel, unit: UnitId, run: &[RawConst]) {
    let mut carried: Option<&str> = None;

    for constant in run {
        if let Some(ty) = constant.ty.as_deref() {
            carried = Some(ty);
        }
        let Some(name) = carried.and_then(value_set_type) else {
            continue;
        };

        let value = EnumValue {
            name:    constant.name.clone(),
            literal: constant.literal.clone(),
            doc:     constant.doc.clone()
        };

        match model
            .enums
            .iter_mut()
            .find(|e| e.unit == unit && e.name == name)
        {
            Some(group) => group.values.push(value),
            None => {
                let doc = model
                    .types
                    .get(&(unit, name.to_string()))
                    .map(|t| t.doc.clone())
                    .unwrap_or_default();
                model.enums.push(EnumDeclaration {
                    name: name.to_string(),
                    doc,
                    values: vec![value],
                    unit
                });
            }
        }
    }
}
