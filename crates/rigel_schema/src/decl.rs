//! Declaration model for callables and structured types.
//!
//! Rust has no runtime reflection, so the introspection capability is a
//! data model: callers describe a callable as a [`FunctionDecl`] — an
//! ordered parameter list of name, [`TypeExpr`], and optional default —
//! and structured types as [`StructDef`]/[`EnumDef`]. The schema compiler
//! consumes only this model.

use crate::docs::FunctionDocs;
use serde_json::Value;
use std::sync::Arc;

/// A declared type, classified once into a closed set of shapes.
///
/// Classification happens here, at declaration time, rather than being
/// re-discovered at every recursion level during validation or coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// JSON boolean.
    Boolean,
    /// JSON integer (`i64` range).
    Integer,
    /// JSON number.
    Number,
    /// JSON string.
    String,
    /// Homogeneous sequence of the item type.
    Array(Box<TypeExpr>),
    /// String-keyed mapping with a single wildcard value type.
    Map(Box<TypeExpr>),
    /// The inner type, or JSON `null`, or field absence.
    Optional(Box<TypeExpr>),
    /// A structured type reference, expanded recursively at compile time.
    Struct(Arc<StructDef>),
    /// An enumeration reference with a fixed literal value set.
    Enum(Arc<EnumDef>),
}

impl TypeExpr {
    /// Creates an array type with the given item type.
    #[must_use]
    pub fn array(item: TypeExpr) -> Self {
        Self::Array(Box::new(item))
    }

    /// Creates a string-keyed map type with the given value type.
    #[must_use]
    pub fn map(value: TypeExpr) -> Self {
        Self::Map(Box::new(value))
    }

    /// Creates an optional wrapper around the given type.
    #[must_use]
    pub fn optional(inner: TypeExpr) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Creates a structured type reference.
    ///
    /// Accepts an owned [`StructDef`] or an `Arc<StructDef>` shared across
    /// declarations.
    pub fn structure(def: impl Into<Arc<StructDef>>) -> Self {
        Self::Struct(def.into())
    }

    /// Creates an enumeration type reference.
    pub fn enumeration(def: impl Into<Arc<EnumDef>>) -> Self {
        Self::Enum(def.into())
    }

    /// Returns whether this type accepts `null` or absence.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

/// A structured type: a named, ordered field list.
///
/// The name is the type's identity: expansion is memoized per name, and a
/// name must denote a single shape within any one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// Type name, unique within a declaration.
    pub name: String,
    /// Human-readable description of the type.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl StructDef {
    /// Creates a structured type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the type description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// A single field of a [`StructDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Declared field type.
    pub ty: TypeExpr,
    /// Default used when the field is absent from a payload.
    pub default: Option<Value>,
    /// Human-readable description of the field.
    pub description: Option<String>,
}

impl FieldSpec {
    /// Creates a required field of the given type.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            description: None,
        }
    }

    /// Sets the field default, making the field optional.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the field description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An enumeration type: a named, ordered set of literal members.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// Type name.
    pub name: String,
    /// Members in declaration order. Must be non-empty, and every member
    /// value must share one primitive JSON kind.
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    /// Creates an enumeration with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member with its literal wire value.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns the member whose literal value equals `value`.
    #[must_use]
    pub fn member_for_value(&self, value: &Value) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == *value)
    }
}

/// A single member of an [`EnumDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    /// Native member identifier (e.g. `Red`).
    pub name: String,
    /// Literal JSON value carried on the wire (e.g. `"red"`).
    pub value: Value,
}

/// A single declared parameter of a [`FunctionDecl`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Declared parameter type.
    pub ty: TypeExpr,
    /// Default used when the parameter is absent from a payload.
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Creates a required parameter of the given type.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Sets the parameter default, making the parameter optional.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// A callable declaration: the unit the schema compiler consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Callable name, unique within a registry.
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<ParamSpec>,
    /// Declared return type, if any.
    pub returns: Option<TypeExpr>,
    /// Documentation extracted upstream, if any.
    pub docs: Option<FunctionDocs>,
}

impl FunctionDecl {
    /// Creates a declaration with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            docs: None,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn parameter(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the declared return type.
    #[must_use]
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Attaches documentation.
    #[must_use]
    pub fn with_docs(mut self, docs: FunctionDocs) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}
