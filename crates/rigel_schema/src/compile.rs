//! The type introspector: walks a declaration's parameter and field types
//! and produces Schema IR.
//!
//! Structured types are expanded recursively, memoized per type name so
//! shared substructures compile once. Self-referential types are rejected
//! with an explicit error instead of recursing forever. Compiling the same
//! declaration twice yields deep-equal IR.

use crate::config::SchemaConfig;
use crate::decl::{EnumDef, FunctionDecl, StructDef, TypeExpr};
use crate::docs;
use crate::error::SchemaError;
use crate::node::{ObjectSchema, SchemaKind, SchemaNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A fully compiled callable schema: the output of [`compile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledSchema {
    /// Callable name.
    pub name: String,
    /// Callable description; empty when none was attached.
    pub description: String,
    /// Parameter schema. Always an `object` node whose properties are the
    /// callable's parameters.
    pub parameters: SchemaNode,
    /// Response descriptor for the return type, if any.
    pub response: Option<ResponseSchema>,
}

/// Compiled return-type descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema of the response body, when a return type was declared.
    pub schema: Option<SchemaNode>,
    /// Description of the return value, when documented.
    pub description: Option<String>,
}

/// Compiles a declaration into a [`CompiledSchema`].
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedType`] when a parameter or field type
/// cannot be resolved (notably self-referential structured types and
/// malformed enumerations), and [`SchemaError::InvalidDeclaration`] when
/// the declaration itself is structurally invalid. Nothing is compiled
/// partially: the first failure aborts the whole compilation.
pub fn compile(decl: &FunctionDecl, config: &SchemaConfig) -> Result<CompiledSchema, SchemaError> {
    if decl.name.is_empty() {
        return Err(SchemaError::invalid(&decl.name, "callable name is empty"));
    }

    let mut introspector = Introspector::new(config);
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for param in &decl.params {
        if properties.contains_key(&param.name) {
            return Err(SchemaError::invalid(
                &decl.name,
                format!("duplicate parameter '{}'", param.name),
            ));
        }

        let mut node = introspector.resolve(&param.name, &param.ty)?;
        if let Some(default) = &param.default {
            node.default = Some(default.clone());
        } else if !param.ty.is_optional() {
            required.push(param.name.clone());
        }
        properties.insert(param.name.clone(), node);
    }

    let parameters = SchemaNode::new(SchemaKind::Object(ObjectSchema {
        properties,
        required,
        additional: None,
        struct_name: None,
    }));

    let response = build_response(decl, config, &mut introspector)?;

    let mut compiled = CompiledSchema {
        name: decl.name.clone(),
        description: String::new(),
        parameters,
        response,
    };

    if config.descriptions && let Some(function_docs) = &decl.docs {
        docs::merge(&mut compiled, function_docs, config.full_docs);
    }

    tracing::debug!(function = %compiled.name, "compiled function schema");
    Ok(compiled)
}

fn build_response(
    decl: &FunctionDecl,
    config: &SchemaConfig,
    introspector: &mut Introspector<'_>,
) -> Result<Option<ResponseSchema>, SchemaError> {
    if !config.responses {
        return Ok(None);
    }

    let schema = match &decl.returns {
        Some(ty) => Some(introspector.resolve("return", ty)?),
        None => None,
    };

    let documented = config.descriptions
        && decl
            .docs
            .as_ref()
            .is_some_and(|docs| docs.returns.is_some());

    if schema.is_none() && !documented {
        return Ok(None);
    }

    // The merger fills in the description text.
    Ok(Some(ResponseSchema {
        schema,
        description: None,
    }))
}

/// Recursive type resolver with per-name memoization of struct expansions
/// and an in-progress stack for cycle detection.
struct Introspector<'a> {
    config: &'a SchemaConfig,
    expanded: HashMap<String, SchemaNode>,
    in_progress: Vec<String>,
}

impl<'a> Introspector<'a> {
    fn new(config: &'a SchemaConfig) -> Self {
        Self {
            config,
            expanded: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    fn resolve(&mut self, path: &str, ty: &TypeExpr) -> Result<SchemaNode, SchemaError> {
        let kind = match ty {
            TypeExpr::Boolean => SchemaKind::Boolean,
            TypeExpr::Integer => SchemaKind::Integer,
            TypeExpr::Number => SchemaKind::Number,
            TypeExpr::String => SchemaKind::String,
            TypeExpr::Array(item) => {
                SchemaKind::Array(Box::new(self.resolve(path, item)?))
            }
            TypeExpr::Map(value) => SchemaKind::Object(ObjectSchema {
                additional: Some(Box::new(self.resolve(path, value)?)),
                ..ObjectSchema::default()
            }),
            TypeExpr::Optional(inner) => {
                SchemaKind::Nullable(Box::new(self.resolve(path, inner)?))
            }
            TypeExpr::Struct(def) => return self.expand_struct(path, def),
            TypeExpr::Enum(def) => SchemaKind::Enum(enum_values(path, def)?),
        };
        Ok(SchemaNode::new(kind))
    }

    fn expand_struct(&mut self, path: &str, def: &StructDef) -> Result<SchemaNode, SchemaError> {
        if self.in_progress.iter().any(|name| name == &def.name) {
            return Err(SchemaError::unsupported(
                path,
                format!("self-referential type '{}'", def.name),
            ));
        }
        if let Some(node) = self.expanded.get(&def.name) {
            return Ok(node.clone());
        }

        self.in_progress.push(def.name.clone());
        let result = self.expand_struct_fields(path, def);
        self.in_progress.pop();

        let node = result?;
        self.expanded.insert(def.name.clone(), node.clone());
        Ok(node)
    }

    fn expand_struct_fields(
        &mut self,
        path: &str,
        def: &StructDef,
    ) -> Result<SchemaNode, SchemaError> {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for field in &def.fields {
            let field_path = format!("{path}.{}", field.name);
            if properties.contains_key(&field.name) {
                return Err(SchemaError::unsupported(
                    field_path,
                    format!("duplicate field in type '{}'", def.name),
                ));
            }

            let mut node = self.resolve(&field_path, &field.ty)?;
            if let Some(default) = &field.default {
                node.default = Some(default.clone());
            } else if !field.ty.is_optional() {
                required.push(field.name.clone());
            }
            if self.config.descriptions && let Some(description) = &field.description {
                node.description = Some(description.clone());
            }
            properties.insert(field.name.clone(), node);
        }

        let mut node = SchemaNode::new(SchemaKind::Object(ObjectSchema {
            properties,
            required,
            additional: None,
            struct_name: Some(def.name.clone()),
        }));
        if self.config.descriptions {
            node.description = def.description.clone();
        }
        Ok(node)
    }
}

fn enum_values(path: &str, def: &EnumDef) -> Result<Vec<Value>, SchemaError> {
    if def.members.is_empty() {
        return Err(SchemaError::unsupported(
            path,
            format!("enumeration '{}' has no members", def.name),
        ));
    }

    let kind_of = |value: &Value| match value {
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some("integer"),
        Value::Number(_) => Some("number"),
        Value::String(_) => Some("string"),
        _ => None,
    };

    let first = kind_of(&def.members[0].value).ok_or_else(|| {
        SchemaError::unsupported(
            path,
            format!("enumeration '{}' has a non-primitive member value", def.name),
        )
    })?;

    for member in &def.members {
        if kind_of(&member.value) != Some(first) {
            return Err(SchemaError::unsupported(
                path,
                format!(
                    "enumeration '{}' mixes member value kinds (member '{}' is not {first})",
                    def.name, member.name
                ),
            ));
        }
    }

    Ok(def.members.iter().map(|m| m.value.clone()).collect())
}
