//! Example tool registry CLI.
//!
//! Registers a handful of callables, prints the discovery manifest a
//! tool-calling consumer would fetch, then runs a few invocations —
//! including ones that fail — and prints the structured error reports.
//!
//! # Usage
//!
//! ```bash
//! toolbox
//! ```

#![expect(
    clippy::print_stdout,
    reason = "demo binary output is the whole point"
)]

use example::toolbox_scope;
use rigel_call::FunctionRegistry;
use rigel_schema::SchemaConfig;

fn main() {
    tracing_subscriber::fmt::init();

    let mut registry = FunctionRegistry::new();
    let registered = registry
        .collect(&toolbox_scope(), &SchemaConfig::default())
        .expect("toolbox declarations compile");
    tracing::info!(functions = ?registered, "registry ready");

    // The manifest a discovery endpoint would publish.
    println!("── manifest ──");
    for schema in registry.schemas() {
        println!("{}", serde_json::to_string_pretty(&schema).expect("schema serializes"));
    }

    println!("\n── invocations ──");
    for (name, payload) in [
        ("addition", r#"{"x": 1.0, "y": 2.0}"#),
        ("create_task", r#"{"title": "write docs", "priority": "high"}"#),
        ("create_task", r#"{"title": "plan", "estimate": {"hours": 3}}"#),
        // A typo'd field name: rejected, not silently ignored.
        ("addition", r#"{"x": 1.0, "z": 2.0}"#),
        // Wrong type for "x".
        ("addition", r#"{"x": "one", "y": 2.0}"#),
        // Unknown function.
        ("subtraction", r#"{"x": 1.0, "y": 2.0}"#),
    ] {
        match registry.invoke(name, payload) {
            Ok(result) => println!("{name} {payload} => {result}"),
            Err(err) => println!("{name} {payload} !> {}", err.report()),
        }
    }
}
