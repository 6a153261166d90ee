//! Integration tests for JSON Schema rendering.

use rigel_schema::{
    EnumDef, FieldSpec, FunctionDecl, FunctionDocs, ParamSpec, SchemaConfig, StructDef, TypeExpr,
    compile, render, render_descriptor,
};
use serde_json::json;

fn config() -> SchemaConfig {
    SchemaConfig::default()
}

// ─────────────────────────────────────────────────────────────────────
// 1. Node rendering rules
// ─────────────────────────────────────────────────────────────────────

#[test]
fn primitives_render_as_type_objects() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("flag", TypeExpr::Boolean))
        .parameter(ParamSpec::new("count", TypeExpr::Integer))
        .parameter(ParamSpec::new("ratio", TypeExpr::Number))
        .parameter(ParamSpec::new("name", TypeExpr::String));

    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);

    assert_eq!(schema["properties"]["flag"], json!({"type": "boolean"}));
    assert_eq!(schema["properties"]["count"], json!({"type": "integer"}));
    assert_eq!(schema["properties"]["ratio"], json!({"type": "number"}));
    assert_eq!(schema["properties"]["name"], json!({"type": "string"}));
}

#[test]
fn required_is_sorted_and_omitted_when_empty() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("zeta", TypeExpr::String))
        .parameter(ParamSpec::new("alpha", TypeExpr::String));
    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    // Sorted, not declaration order.
    assert_eq!(schema["required"], json!(["alpha", "zeta"]));

    let all_defaulted = FunctionDecl::new("g")
        .parameter(ParamSpec::new("a", TypeExpr::Integer).with_default(json!(0)));
    let compiled = compile(&all_defaulted, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert!(schema.get("required").is_none());
}

#[test]
fn defaulted_struct_field_renders_without_required() {
    // A structured type {a: integer = 0}: no required key since `a` has a
    // default.
    let point = StructDef::new("Counter")
        .field(FieldSpec::new("a", TypeExpr::Integer).with_default(json!(0)));
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("counter", TypeExpr::structure(point)));

    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(
        schema["properties"]["counter"],
        json!({
            "type": "object",
            "properties": {"a": {"type": "integer", "default": 0}}
        })
    );
}

#[test]
fn array_renders_items() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("tags", TypeExpr::array(TypeExpr::String)));
    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(
        schema["properties"]["tags"],
        json!({"type": "array", "items": {"type": "string"}})
    );
}

#[test]
fn map_renders_additional_properties() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("scores", TypeExpr::map(TypeExpr::Number)));
    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(
        schema["properties"]["scores"],
        json!({"type": "object", "additionalProperties": {"type": "number"}})
    );
}

#[test]
fn enum_renders_value_list_without_type_key() {
    let color = EnumDef::new("Color")
        .member("Red", json!("red"))
        .member("Blue", json!("blue"));
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("color", TypeExpr::enumeration(color)));

    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(schema["properties"]["color"], json!({"enum": ["red", "blue"]}));
}

#[test]
fn nullable_adds_marker_to_child_schema() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("filter", TypeExpr::optional(TypeExpr::String)));
    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(
        schema["properties"]["filter"],
        json!({"type": "string", "nullable": true})
    );
}

#[test]
fn descriptions_and_defaults_appear_on_nodes() {
    let decl = FunctionDecl::new("f")
        .parameter(ParamSpec::new("limit", TypeExpr::Integer).with_default(json!(10)))
        .with_docs(FunctionDocs::new("Doc.").param("limit", "Maximum results."));

    let compiled = compile(&decl, &config()).unwrap();
    let schema = render(&compiled.parameters);
    assert_eq!(
        schema["properties"]["limit"],
        json!({"type": "integer", "description": "Maximum results.", "default": 10})
    );
}

// ─────────────────────────────────────────────────────────────────────
// 2. Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn rendering_is_byte_identical_across_compiles() {
    let decl = FunctionDecl::new("plan")
        .parameter(ParamSpec::new("title", TypeExpr::String))
        .parameter(ParamSpec::new("tags", TypeExpr::array(TypeExpr::String)).with_default(json!([])))
        .returns(TypeExpr::String)
        .with_docs(FunctionDocs::new("Plan work.").with_returns("Confirmation."));

    let first = serde_json::to_string(&render_descriptor(&compile(&decl, &config()).unwrap()))
        .unwrap();
    let second = serde_json::to_string(&render_descriptor(&compile(&decl, &config()).unwrap()))
        .unwrap();
    assert_eq!(first, second);
}

// ─────────────────────────────────────────────────────────────────────
// 3. Descriptor shape
// ─────────────────────────────────────────────────────────────────────

#[test]
fn descriptor_has_name_description_parameters() {
    let decl = FunctionDecl::new("greet")
        .parameter(ParamSpec::new("name", TypeExpr::String))
        .with_docs(FunctionDocs::new("Greet someone.").param("name", "The person's name."));

    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert_eq!(
        descriptor,
        json!({
            "name": "greet",
            "description": "Greet someone.",
            "parameters": {
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "The person's name."}
                },
                "required": ["name"]
            }
        })
    );
}

#[test]
fn empty_description_is_omitted() {
    let decl = FunctionDecl::new("f").parameter(ParamSpec::new("x", TypeExpr::Number));
    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert!(descriptor.get("description").is_none());
}

// ─────────────────────────────────────────────────────────────────────
// 4. Responses block
// ─────────────────────────────────────────────────────────────────────

#[test]
fn return_type_without_doc_renders_ok_description() {
    let decl = FunctionDecl::new("f").returns(TypeExpr::array(TypeExpr::String));
    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert_eq!(
        descriptor["responses"],
        json!({
            "200": {
                "description": "OK",
                "content": {
                    "application/json": {
                        "schema": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        })
    );
}

#[test]
fn return_type_with_doc_renders_doc_description() {
    let decl = FunctionDecl::new("f")
        .returns(TypeExpr::Integer)
        .with_docs(FunctionDocs::new("Doc.").with_returns("The count."));
    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert_eq!(
        descriptor["responses"]["200"],
        json!({
            "description": "The count.",
            "content": {"application/json": {"schema": {"type": "integer"}}}
        })
    );
}

#[test]
fn returns_doc_without_type_renders_description_only() {
    let decl = FunctionDecl::new("f")
        .with_docs(FunctionDocs::new("Doc.").with_returns("An unknown payload."));
    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert_eq!(
        descriptor["responses"],
        json!({"200": {"description": "An unknown payload."}})
    );
}

#[test]
fn descriptions_disabled_falls_back_to_ok() {
    let decl = FunctionDecl::new("f")
        .returns(TypeExpr::Integer)
        .with_docs(FunctionDocs::new("Doc.").with_returns("The count."));
    let descriptor = render_descriptor(
        &compile(&decl, &config().with_descriptions(false)).unwrap(),
    );
    assert_eq!(descriptor["responses"]["200"]["description"], json!("OK"));
}

#[test]
fn no_response_means_no_responses_key() {
    let decl = FunctionDecl::new("f").parameter(ParamSpec::new("x", TypeExpr::Number));
    let descriptor = render_descriptor(&compile(&decl, &config()).unwrap());
    assert!(descriptor.get("responses").is_none());
}
