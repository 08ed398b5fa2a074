// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration model.
//!
//! Language-neutral description of the record types, members and constant
//! groups the introspector builds from a [`SourceModelProvider`].
//!
//! # Architecture
//!
//! ```text
//! SourceModel
//! ├── CompilationUnit   module path, file, `use` bindings, method names
//! ├── Declaration       one per record type
//! │   └── Member        field with cached Classification
//! └── EnumDeclaration   constants grouped by type
//!     └── EnumValue
//! ```
//!
//! [`SourceModelProvider`]: crate::provider::SourceModelProvider

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::diagnostics::Position;

/// Index of a compilation unit inside a [`SourceModel`](crate::SourceModel).
pub type UnitId = usize;

/// Minimal type expression, as written in source.
///
/// Providers lower their language's type syntax into this tree so the
/// introspector can classify members without knowing the source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Named type, e.g. `std::collections::HashMap<K, V>`.
    ///
    /// `args` are the generic arguments of the last segment.
    Path {
        /// Path segments.
        segments: Vec<String>,
        /// Generic type arguments.
        args:     Vec<TypeExpr>
    },
    /// Borrowed type (`&T`, `&mut T`).
    Reference(Box<TypeExpr>),
    /// Unsized slice `[T]`.
    Slice(Box<TypeExpr>),
    /// Fixed array `[T; N]`.
    Array(Box<TypeExpr>),
    /// Tuple type.
    Tuple(Vec<TypeExpr>),
    /// Anything the provider could not lower.
    Other(String)
}

impl TypeExpr {
    /// Named type without generic arguments, from `a::b::C` notation.
    #[must_use]
    pub fn path(path: &str) -> Self {
        Self::Path {
            segments: path.split("::").map(str::to_string).collect(),
            args:     Vec::new()
        }
    }

    /// Named type with generic arguments.
    #[must_use]
    pub fn generic(path: &str, args: Vec<TypeExpr>) -> Self {
        Self::Path {
            segments: path.split("::").map(str::to_string).collect(),
            args
        }
    }

    /// Last path segment for named types.
    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        match self {
            Self::Path {
                segments, ..
            } => segments.last().map(String::as_str),
            _ => None
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path {
                segments,
                args
            } => {
                f.write_str(&segments.join("::"))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Reference(inner) => write!(f, "&{inner}"),
            Self::Slice(inner) => write!(f, "[{inner}]"),
            Self::Array(inner) => write!(f, "[{inner}; _]"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Other(text) => f.write_str(text)
        }
    }
}

/// Numeric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Fixed-width integer. `isize` and `usize` count as 64 bits.
    Integer {
        /// Whether negative values are representable.
        signed: bool,
        /// Width in bits.
        bits:   u8
    },
    /// Floating point.
    Float
}

impl NumericKind {
    /// Kind of a primitive numeric type name such as `u8` or `f64`.
    #[must_use]
    pub fn from_primitive(name: &str) -> Option<Self> {
        let integer = |signed, bits| Some(Self::Integer {
            signed,
            bits
        });
        match name {
            "i8" => integer(true, 8),
            "i16" => integer(true, 16),
            "i32" => integer(true, 32),
            "i64" | "isize" => integer(true, 64),
            "i128" => integer(true, 128),
            "u8" => integer(false, 8),
            "u16" => integer(false, 16),
            "u32" => integer(false, 32),
            "u64" | "usize" => integer(false, 64),
            "u128" => integer(false, 128),
            "f32" | "f64" => Some(Self::Float),
            _ => None
        }
    }

    /// Whether this is an integer kind.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer { .. })
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer {
                signed: true,
                bits
            } => write!(f, "i{bits}"),
            Self::Integer {
                signed: false,
                bits
            } => write!(f, "u{bits}"),
            Self::Float => f.write_str("float")
        }
    }
}

/// Named type the classifier could not reduce to a builtin shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomType {
    /// Type name.
    pub name:   String,
    /// Module declaring the type, `None` when it could not be resolved.
    pub module: Option<String>
}

/// Resolved structural category of a member type.
///
/// Rules consult this to decide whether they apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Text.
    String,
    /// Boolean.
    Boolean,
    /// Integer or float.
    Numeric(NumericKind),
    /// Byte sequence.
    Bytes,
    /// Ordered collection with its element classification.
    List(Box<Classification>),
    /// Associative collection with key and value classifications.
    Map(Box<Classification>, Box<Classification>),
    /// Nullable indirection (`Option<T>`).
    Pointer(Box<Classification>),
    /// Opaque named type.
    Custom(CustomType)
}

impl Classification {
    /// Short name used in diagnostics and metadata.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Numeric(NumericKind::Integer { .. }) => "integer",
            Self::Numeric(NumericKind::Float) => "float",
            Self::Bytes => "bytes",
            Self::List(_) => "list",
            Self::Map(..) => "map",
            Self::Pointer(_) => "pointer",
            Self::Custom(_) => "custom"
        }
    }

    /// Classification behind an optional pointer, or `self`.
    #[must_use]
    pub fn pointee(&self) -> &Classification {
        match self {
            Self::Pointer(inner) => inner,
            other => other
        }
    }

    /// Element classification for lists, value classification for maps.
    #[must_use]
    pub fn element(&self) -> Option<&Classification> {
        match self {
            Self::List(element) => Some(element),
            Self::Map(_, value) => Some(value),
            _ => None
        }
    }

    /// Whether the value has a length.
    #[must_use]
    pub fn has_length(&self) -> bool {
        matches!(self, Self::String | Self::Bytes | Self::List(_) | Self::Map(..))
    }

    /// Whether this is a numeric classification.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// The custom type, if any.
    #[must_use]
    pub fn as_custom(&self) -> Option<&CustomType> {
        match self {
            Self::Custom(custom) => Some(custom),
            _ => None
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Pointer(inner) => write!(f, "pointer<{inner}>"),
            Self::Custom(custom) => match &custom.module {
                Some(module) => write!(f, "{module}::{}", custom.name),
                None => write!(f, "{} (unresolved)", custom.name)
            },
            other => f.write_str(other.kind())
        }
    }
}

/// A `use`-style binding recorded for a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBinding {
    /// Full path that is brought into scope.
    pub path:  String,
    /// Explicit local alias (`as name`).
    pub alias: Option<String>
}

impl ModuleBinding {
    /// Binding without alias.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path:  path.into(),
            alias: None
        }
    }

    /// Binding with explicit alias.
    #[must_use]
    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path:  path.into(),
            alias: Some(alias.into())
        }
    }

    /// Name derived from the last path segment.
    #[must_use]
    pub fn default_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// Whether `token` refers to this binding.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.alias.as_deref() == Some(token) || self.default_name() == token
    }
}

/// One source file or module handed over by the provider.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    /// Module path of the unit, e.g. `crate::models`.
    pub module_path: String,
    /// Source file.
    pub path:        PathBuf,
    /// Module bindings in source order.
    pub bindings:    Vec<ModuleBinding>,
    /// Method names per type name.
    pub methods:     BTreeMap<String, Vec<String>>
}

impl CompilationUnit {
    /// Whether `type_name` has a method named `method` in this unit.
    #[must_use]
    pub fn has_method(&self, type_name: &str, method: &str) -> bool {
        self.methods
            .get(type_name)
            .is_some_and(|names| names.iter().any(|n| n == method))
    }
}

/// Introspected record type.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Type name.
    pub name:     String,
    /// Documentation text.
    pub doc:      String,
    /// Members in declaration order.
    pub members:  Vec<Member>,
    /// Unit declaring the type.
    pub unit:     UnitId,
    /// Where the type is declared.
    pub position: Position
}

impl Declaration {
    /// Member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// One field of a [`Declaration`].
#[derive(Debug, Clone)]
pub struct Member {
    /// Field name.
    pub name:           String,
    /// Declared type as written.
    pub type_signature: String,
    /// Classification, computed once before any rule runs.
    pub classification: Classification,
    /// Documentation text.
    pub doc:            String,
    /// Plain comment text attached to the field.
    pub comment:        String,
    /// Field position.
    pub position:       Position
}

/// Constants of one type, gathered into a value set.
#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    /// Type name the constants share.
    pub name:   String,
    /// Documentation borrowed from the same-named type, if any.
    pub doc:    String,
    /// Values in source order.
    pub values: Vec<EnumValue>,
    /// Unit declaring the constants.
    pub unit:   UnitId
}

/// One constant of an [`EnumDeclaration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Constant name.
    pub name:    String,
    /// Initializer expression as written.
    pub literal: String,
    /// Documentation text.
    pub doc:     String
}
