//! Integration tests for the function registry.

use rigel_call::{CallError, CollectFilter, FunctionRegistry, FunctionScope, NativeValue, ScopeEntry};
use rigel_schema::{FieldSpec, FunctionDecl, ParamSpec, SchemaConfig, StructDef, TypeExpr};
use serde_json::json;

fn config() -> SchemaConfig {
    SchemaConfig::default()
}

fn noop(name: &str) -> FunctionDecl {
    FunctionDecl::new(name).parameter(ParamSpec::new("x", TypeExpr::Number))
}

// ─────────────────────────────────────────────────────────────────────
// 1. Register / lookup / enumerate
// ─────────────────────────────────────────────────────────────────────

#[test]
fn register_lookup_has_names() {
    let mut registry = FunctionRegistry::new();
    registry
        .register(noop("first"), |_| Ok(NativeValue::Null), &config())
        .unwrap();
    registry
        .register(noop("second"), |_| Ok(NativeValue::Null), &config())
        .unwrap();

    assert!(registry.has("first"));
    assert!(!registry.has("third"));
    assert_eq!(registry.names(), ["first", "second"]);
    assert_eq!(registry.len(), 2);
    assert!(registry.lookup("first").is_ok());
    assert!(matches!(
        registry.lookup("third"),
        Err(CallError::NotFound(name)) if name == "third"
    ));
}

#[test]
fn list_preserves_registration_order() {
    let mut registry = FunctionRegistry::new();
    for name in ["zeta", "alpha", "mid"] {
        registry
            .register(noop(name), |_| Ok(NativeValue::Null), &config())
            .unwrap();
    }
    let list = registry.list();
    let names: Vec<&str> = list.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn schemas_render_in_registration_order() {
    let mut registry = FunctionRegistry::new();
    registry
        .register(noop("one"), |_| Ok(NativeValue::Null), &config())
        .unwrap();
    registry
        .register(noop("two"), |_| Ok(NativeValue::Null), &config())
        .unwrap();

    let schemas = registry.schemas();
    assert_eq!(schemas[0]["name"], json!("one"));
    assert_eq!(schemas[1]["name"], json!("two"));
}

// ─────────────────────────────────────────────────────────────────────
// 2. Replacement semantics
// ─────────────────────────────────────────────────────────────────────

#[test]
fn re_registration_replaces_silently() {
    let mut registry = FunctionRegistry::new();
    registry
        .register(noop("calc"), |_| Ok(NativeValue::Int(1)), &config())
        .unwrap();
    registry
        .register(noop("calc"), |_| Ok(NativeValue::Int(2)), &config())
        .unwrap();

    assert_eq!(registry.len(), 1);
    let result = registry.invoke("calc", r#"{"x": 0.0}"#).unwrap();
    assert_eq!(result, json!(2));
}

// ─────────────────────────────────────────────────────────────────────
// 3. Failed compilation leaves the registry untouched
// ─────────────────────────────────────────────────────────────────────

#[test]
fn uncompilable_declaration_is_not_registered() {
    let placeholder = StructDef::new("Node");
    let node = StructDef::new("Node")
        .field(FieldSpec::new("next", TypeExpr::structure(placeholder)));
    let decl = FunctionDecl::new("walk")
        .parameter(ParamSpec::new("head", TypeExpr::structure(node)));

    let mut registry = FunctionRegistry::new();
    assert!(registry.register(decl, |_| Ok(NativeValue::Null), &config()).is_err());
    assert!(!registry.has("walk"));
    assert!(registry.list().is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// 4. Scope collection
// ─────────────────────────────────────────────────────────────────────

struct DemoScope {
    include_bad: bool,
}

impl FunctionScope for DemoScope {
    fn entries(&self) -> Vec<ScopeEntry> {
        let mut entries = vec![
            ScopeEntry::new(noop("visible"), |_| Ok(NativeValue::Null)),
            ScopeEntry::new(noop("also_visible"), |_| Ok(NativeValue::Null)),
            ScopeEntry::new(noop("_private"), |_| Ok(NativeValue::Null)).hidden(true),
        ];
        if self.include_bad {
            let placeholder = StructDef::new("Loop");
            let looped = StructDef::new("Loop")
                .field(FieldSpec::new("inner", TypeExpr::structure(placeholder)));
            entries.push(ScopeEntry::new(
                FunctionDecl::new("bad")
                    .parameter(ParamSpec::new("l", TypeExpr::structure(looped))),
                |_| Ok(NativeValue::Null),
            ));
        }
        entries
    }
}

#[test]
fn collect_registers_visible_entries_in_order() {
    let mut registry = FunctionRegistry::new();
    let registered = registry
        .collect(&DemoScope { include_bad: false }, &config())
        .unwrap();

    assert_eq!(registered, ["visible", "also_visible"]);
    assert!(!registry.has("_private"));
}

#[test]
fn collect_failure_registers_nothing() {
    let mut registry = FunctionRegistry::new();
    let result = registry.collect(&DemoScope { include_bad: true }, &config());

    assert!(result.is_err());
    assert!(registry.is_empty());
}

#[test]
fn deny_list_always_wins() {
    let mut registry = FunctionRegistry::new();
    let registered = registry
        .collect_filtered(
            &DemoScope { include_bad: false },
            &CollectFilter::new().deny("visible"),
            &config(),
        )
        .unwrap();
    assert_eq!(registered, ["also_visible"]);
}

#[test]
fn allow_list_admits_hidden_entries() {
    let mut registry = FunctionRegistry::new();
    let registered = registry
        .collect_filtered(
            &DemoScope { include_bad: false },
            &CollectFilter::new().allow("_private"),
            &config(),
        )
        .unwrap();
    assert_eq!(registered, ["_private"]);
}
