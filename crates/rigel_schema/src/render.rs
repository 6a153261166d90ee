//! The schema renderer: serializes Schema IR into JSON Schema values.
//!
//! Rendering is pure and referentially transparent. Key order is fixed, so
//! the same IR always renders to byte-identical output — schema text is
//! diff-friendly and cacheable.

use crate::compile::CompiledSchema;
use crate::node::{ObjectSchema, SchemaKind, SchemaNode};
use serde_json::{Map, Value};

/// Renders a single IR node into a JSON Schema value.
#[must_use]
pub fn render(node: &SchemaNode) -> Value {
    Value::Object(render_map(node))
}

fn render_map(node: &SchemaNode) -> Map<String, Value> {
    let mut out = match &node.kind {
        SchemaKind::Boolean | SchemaKind::Integer | SchemaKind::Number | SchemaKind::String => {
            let mut map = Map::new();
            map.insert(
                "type".to_string(),
                Value::String(node.kind.name().to_string()),
            );
            map
        }
        SchemaKind::Array(item) => {
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String("array".to_string()));
            map.insert("items".to_string(), render(item));
            map
        }
        SchemaKind::Object(obj) => render_object(obj),
        SchemaKind::Enum(values) => {
            // No "type" key: the value list alone constrains the payload.
            let mut map = Map::new();
            map.insert("enum".to_string(), Value::Array(values.clone()));
            map
        }
        SchemaKind::Nullable(child) => {
            let mut map = render_map(child);
            map.insert("nullable".to_string(), Value::Bool(true));
            map
        }
    };

    if let Some(description) = &node.description {
        out.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }
    if let Some(default) = &node.default {
        out.insert("default".to_string(), default.clone());
    }

    out
}

fn render_object(obj: &ObjectSchema) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String("object".to_string()));

    if let Some(additional) = &obj.additional {
        map.insert("additionalProperties".to_string(), render(additional));
        return map;
    }

    let mut properties = Map::new();
    for (name, child) in &obj.properties {
        properties.insert(name.clone(), render(child));
    }
    map.insert("properties".to_string(), Value::Object(properties));

    if !obj.required.is_empty() {
        let mut required: Vec<&str> = obj.required.iter().map(String::as_str).collect();
        required.sort_unstable();
        map.insert(
            "required".to_string(),
            Value::Array(
                required
                    .into_iter()
                    .map(|name| Value::String(name.to_string()))
                    .collect(),
            ),
        );
    }

    map
}

/// Renders a compiled callable into its published descriptor JSON.
///
/// The shape is fixed for compatibility with tool-calling consumers:
/// `name`, `description` (omitted when empty), `parameters`, and — when a
/// response schema exists — `responses` keyed by the literal status code
/// `"200"` wrapping the return schema as a JSON-typed response body.
#[must_use]
pub fn render_descriptor(schema: &CompiledSchema) -> Value {
    let mut out = Map::new();
    out.insert("name".to_string(), Value::String(schema.name.clone()));
    if !schema.description.is_empty() {
        out.insert(
            "description".to_string(),
            Value::String(schema.description.clone()),
        );
    }
    out.insert("parameters".to_string(), render(&schema.parameters));

    if let Some(response) = &schema.response {
        let mut body = Map::new();
        let description = match (&response.description, &response.schema) {
            (Some(text), _) => Some(text.clone()),
            // A body schema needs at least a minimal description of OK.
            (None, Some(_)) => Some("OK".to_string()),
            (None, None) => None,
        };
        if let Some(description) = description {
            body.insert("description".to_string(), Value::String(description));
        }
        if let Some(return_schema) = &response.schema {
            let mut media = Map::new();
            media.insert("schema".to_string(), render(return_schema));
            let mut content = Map::new();
            content.insert("application/json".to_string(), Value::Object(media));
            body.insert("content".to_string(), Value::Object(content));
        }

        let mut responses = Map::new();
        responses.insert("200".to_string(), Value::Object(body));
        out.insert("responses".to_string(), Value::Object(responses));
    }

    Value::Object(out)
}
