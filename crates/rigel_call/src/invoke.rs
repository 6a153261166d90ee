//! The invocation validator: a single-pass state machine taking a raw JSON
//! argument payload through `PARSE → VALIDATE → COERCE → INVOKE → ENCODE`.
//!
//! Each invocation is one pass with no retry; the first stage to detect a
//! problem fails the whole call with its own error kind. Validation
//! re-walks the same Schema IR the renderer publishes, so a payload that
//! satisfies the published schema always reaches the target.

use crate::descriptor::CallableDescriptor;
use crate::error::{CallError, ValidationError};
use crate::registry::FunctionRegistry;
use crate::value::{Arguments, EnumValue, NativeValue, StructValue};
use indexmap::IndexMap;
use rigel_schema::{FieldSpec, FunctionDecl, ParamSpec, SchemaKind, SchemaNode, TypeExpr};
use serde_json::{Map, Value};

/// Invokes a registered callable with a raw JSON argument payload and
/// encodes the result as JSON.
///
/// # Errors
///
/// Fails with one of the [`CallError`] kinds: `NotFound` (checked before
/// parsing), `ArgumentParse`, `Validation`, `Coercion`, or a pass-through
/// `Target` error.
pub fn invoke(registry: &FunctionRegistry, name: &str, raw: &str) -> Result<Value, CallError> {
    invoke_native(registry, name, raw).map(|value| value.to_json())
}

/// Invokes a registered callable with a raw JSON argument payload and
/// returns the native result without re-encoding.
///
/// For callers that keep using the result natively, e.g. when chaining
/// calls in the same process.
///
/// # Errors
///
/// Same as [`invoke`].
pub fn invoke_native(
    registry: &FunctionRegistry,
    name: &str,
    raw: &str,
) -> Result<NativeValue, CallError> {
    let descriptor = registry.lookup(name)?;
    let payload = parse_arguments(raw)?;
    run(descriptor, &payload)
}

/// Invokes a registered callable with an already-parsed JSON argument
/// value, skipping the PARSE stage, and encodes the result as JSON.
///
/// # Errors
///
/// Same as [`invoke`], minus `ArgumentParse`.
pub fn invoke_value(
    registry: &FunctionRegistry,
    name: &str,
    payload: &Value,
) -> Result<Value, CallError> {
    let descriptor = registry.lookup(name)?;
    run(descriptor, payload).map(|value| value.to_json())
}

fn run(descriptor: &CallableDescriptor, payload: &Value) -> Result<NativeValue, CallError> {
    validate(&descriptor.schema.parameters, payload)?;

    let Value::Object(map) = payload else {
        // validate() already rejected non-object payloads.
        return Err(CallError::coercion("$", "arguments are not an object"));
    };
    let arguments = coerce_arguments(&descriptor.decl, map)?;

    tracing::debug!(function = %descriptor.name(), "invoking function");
    (descriptor.target())(arguments).map_err(CallError::Target)
}

// ─────────────────────────────────────────────────────────────────────
// PARSE
// ─────────────────────────────────────────────────────────────────────

fn parse_arguments(raw: &str) -> Result<Value, CallError> {
    serde_json::from_str(raw).map_err(|err| CallError::ArgumentParse {
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────
// VALIDATE
// ─────────────────────────────────────────────────────────────────────

/// Validates a JSON value against a Schema IR node.
///
/// Fail-fast: returns the first violation found, walking each object level
/// in a fixed order — payload shape, required presence in declaration
/// order, unknown-field rejection in payload order, then per-property
/// checks in declaration order.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(node: &SchemaNode, payload: &Value) -> Result<(), ValidationError> {
    validate_node("$", node, payload)
}

fn validate_node(path: &str, node: &SchemaNode, value: &Value) -> Result<(), ValidationError> {
    match &node.kind {
        SchemaKind::Boolean | SchemaKind::Integer | SchemaKind::Number | SchemaKind::String => {
            if primitive_matches(&node.kind, value) {
                Ok(())
            } else {
                Err(mismatch(path, node.kind.name(), value))
            }
        }
        SchemaKind::Enum(allowed) => {
            if allowed.contains(value) {
                Ok(())
            } else {
                Err(ValidationError::NotInEnum {
                    path: path.to_string(),
                    actual: value.to_string(),
                })
            }
        }
        SchemaKind::Array(item) => {
            let Some(items) = value.as_array() else {
                return Err(mismatch(path, "array", value));
            };
            for (index, element) in items.iter().enumerate() {
                validate_node(&format!("{path}[{index}]"), item, element)?;
            }
            Ok(())
        }
        SchemaKind::Nullable(inner) => {
            if value.is_null() {
                Ok(())
            } else {
                validate_node(path, inner, value)
            }
        }
        SchemaKind::Object(obj) => {
            let Some(map) = value.as_object() else {
                return Err(mismatch(path, "object", value));
            };

            if let Some(additional) = &obj.additional {
                for (key, entry) in map {
                    validate_node(&child_path(path, key), additional, entry)?;
                }
                return Ok(());
            }

            for name in &obj.required {
                let absent_ok = obj
                    .properties
                    .get(name)
                    .is_some_and(SchemaNode::is_nullable);
                if !map.contains_key(name) && !absent_ok {
                    return Err(ValidationError::MissingField {
                        path: child_path(path, name),
                    });
                }
            }

            for key in map.keys() {
                if !obj.properties.contains_key(key) {
                    return Err(ValidationError::UnknownField {
                        path: child_path(path, key),
                    });
                }
            }

            for (name, child) in &obj.properties {
                if let Some(entry) = map.get(name) {
                    validate_node(&child_path(path, name), child, entry)?;
                }
            }
            Ok(())
        }
    }
}

fn primitive_matches(kind: &SchemaKind, value: &Value) -> bool {
    match kind {
        SchemaKind::Boolean => value.is_boolean(),
        SchemaKind::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
        SchemaKind::Number => value.is_number(),
        SchemaKind::String => value.is_string(),
        _ => false,
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: json_type_name(value).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path == "$" {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

// ─────────────────────────────────────────────────────────────────────
// COERCE
// ─────────────────────────────────────────────────────────────────────

/// Coerces a validated payload into native arguments by walking the
/// declaration's types.
///
/// Defaults come from the declaration itself; the informational copies on
/// the IR are never applied here. Absent nullable parameters coerce to
/// [`NativeValue::Null`].
///
/// # Errors
///
/// Returns [`CallError::Coercion`] when a validated value cannot be mapped
/// to a native value (e.g. an enum literal with no declared member).
pub fn coerce_arguments(
    decl: &FunctionDecl,
    payload: &Map<String, Value>,
) -> Result<Arguments, CallError> {
    let mut values = IndexMap::new();
    for param in &decl.params {
        let value = coerce_binding(param, payload.get(&param.name))?;
        values.insert(param.name.clone(), value);
    }
    Ok(Arguments::new(values))
}

fn coerce_binding(param: &ParamSpec, value: Option<&Value>) -> Result<NativeValue, CallError> {
    match value {
        Some(present) => coerce_value(&param.name, &param.ty, present),
        None => match &param.default {
            Some(default) => coerce_value(&param.name, &param.ty, default),
            None if param.ty.is_optional() => Ok(NativeValue::Null),
            None => Err(CallError::coercion(
                &param.name,
                "required argument absent after validation",
            )),
        },
    }
}

fn coerce_value(path: &str, ty: &TypeExpr, value: &Value) -> Result<NativeValue, CallError> {
    match ty {
        TypeExpr::Boolean => value
            .as_bool()
            .map(NativeValue::Bool)
            .ok_or_else(|| CallError::coercion(path, "expected a boolean")),
        TypeExpr::Integer => {
            if let Some(n) = value.as_i64() {
                Ok(NativeValue::Int(n))
            } else if value.as_u64().is_some() {
                Err(CallError::coercion(path, "integer out of i64 range"))
            } else {
                Err(CallError::coercion(path, "expected an integer"))
            }
        }
        TypeExpr::Number => value
            .as_f64()
            .map(NativeValue::Float)
            .ok_or_else(|| CallError::coercion(path, "expected a number")),
        TypeExpr::String => value
            .as_str()
            .map(NativeValue::from)
            .ok_or_else(|| CallError::coercion(path, "expected a string")),
        TypeExpr::Array(item) => {
            let items = value
                .as_array()
                .ok_or_else(|| CallError::coercion(path, "expected an array"))?;
            items
                .iter()
                .enumerate()
                .map(|(index, element)| coerce_value(&format!("{path}[{index}]"), item, element))
                .collect::<Result<Vec<_>, _>>()
                .map(NativeValue::Array)
        }
        TypeExpr::Map(value_ty) => {
            let entries = value
                .as_object()
                .ok_or_else(|| CallError::coercion(path, "expected an object"))?;
            let mut map = IndexMap::new();
            for (key, entry) in entries {
                map.insert(
                    key.clone(),
                    coerce_value(&child_path(path, key), value_ty, entry)?,
                );
            }
            Ok(NativeValue::Map(map))
        }
        TypeExpr::Optional(inner) => {
            if value.is_null() {
                Ok(NativeValue::Null)
            } else {
                coerce_value(path, inner, value)
            }
        }
        TypeExpr::Struct(def) => {
            let entries = value
                .as_object()
                .ok_or_else(|| CallError::coercion(path, "expected an object"))?;
            let mut fields = IndexMap::new();
            for field in &def.fields {
                let field_path = child_path(path, &field.name);
                let coerced = coerce_field(&field_path, field, entries.get(&field.name))?;
                fields.insert(field.name.clone(), coerced);
            }
            Ok(NativeValue::Struct(StructValue {
                type_name: def.name.clone(),
                fields,
            }))
        }
        TypeExpr::Enum(def) => match def.member_for_value(value) {
            Some(member) => Ok(NativeValue::Enum(EnumValue {
                type_name: def.name.clone(),
                member: member.name.clone(),
                value: value.clone(),
            })),
            None => Err(CallError::coercion(
                path,
                format!("no member of '{}' has value {value}", def.name),
            )),
        },
    }
}

fn coerce_field(
    path: &str,
    field: &FieldSpec,
    value: Option<&Value>,
) -> Result<NativeValue, CallError> {
    match value {
        Some(present) => coerce_value(path, &field.ty, present),
        // The type's own declared default, not the schema's copy.
        None => match &field.default {
            Some(default) => coerce_value(path, &field.ty, default),
            None if field.ty.is_optional() => Ok(NativeValue::Null),
            None => Err(CallError::coercion(
                path,
                "required field absent after validation",
            )),
        },
    }
}
