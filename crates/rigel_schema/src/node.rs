//! The Schema IR: the canonical in-memory representation of a compiled
//! parameter/field type graph.
//!
//! IR nodes are built once per declaration by [`compile`](crate::compile),
//! never mutated afterwards, and shared freely across concurrent lookups.
//! The renderer and the invocation validator both walk this tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of the compiled type graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// The node's shape. Fully determines which payload data is present.
    pub kind: SchemaKind,
    /// Human-readable description attached by the description merger.
    pub description: Option<String>,
    /// Informational copy of the declaration default. Never applied during
    /// coercion; coercion reads defaults from the declaration itself.
    pub default: Option<Value>,
}

impl SchemaNode {
    /// Creates a bare node of the given kind.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
        }
    }

    /// Returns whether this node accepts `null` or absence.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, SchemaKind::Nullable(_))
    }

    /// The object payload, when this is an `object` node.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// The closed set of node shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaKind {
    /// JSON boolean.
    Boolean,
    /// JSON integer.
    Integer,
    /// JSON number.
    Number,
    /// JSON string.
    String,
    /// Homogeneous array with the given item schema.
    Array(Box<SchemaNode>),
    /// Object with fixed properties or a wildcard value schema.
    Object(ObjectSchema),
    /// Fixed literal value set, in declaration order. Non-empty, single
    /// primitive kind.
    Enum(Vec<Value>),
    /// Exactly one child; `null` or absence accepted in addition to the
    /// child's shape.
    Nullable(Box<SchemaNode>),
}

impl SchemaKind {
    /// The JSON Schema type name for this shape, used in rendered output
    /// and in validation messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Enum(_) => "enum",
            Self::Nullable(_) => "nullable",
        }
    }
}

/// Payload of an `object` node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Property schemas in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Names of properties without defaults, in declaration order.
    /// Always a subset of `properties` keys. The renderer emits this
    /// sorted; validation walks it in declaration order.
    pub required: Vec<String>,
    /// Wildcard value schema for string-keyed mappings. Mutually exclusive
    /// with non-empty `properties`.
    pub additional: Option<Box<SchemaNode>>,
    /// Set when this object expands a declared structured type; coercion
    /// uses it to reconstruct an instance of that type.
    pub struct_name: Option<String>,
}
