//! Declarations and targets for the toolbox demo.

use rigel_call::{FunctionScope, NativeValue, ScopeEntry};
use rigel_schema::{
    EnumDef, FieldSpec, FunctionDecl, FunctionDocs, ParamSpec, StructDef, TypeExpr,
};
use serde::Deserialize;
use serde_json::json;

/// Estimated effort for a task.
#[derive(Debug, Deserialize)]
pub struct TaskEstimate {
    /// Whole hours of work.
    pub hours: i64,
    /// Confidence between 0 and 1.
    pub confidence: f64,
}

/// The demo scope: a static table of declarations and targets.
pub struct ToolboxScope;

impl FunctionScope for ToolboxScope {
    fn entries(&self) -> Vec<ScopeEntry> {
        vec![addition(), create_task(), internal_reset()]
    }
}

/// Builds the demo scope.
#[must_use]
pub fn toolbox_scope() -> ToolboxScope {
    ToolboxScope
}

fn addition() -> ScopeEntry {
    let decl = FunctionDecl::new("addition")
        .parameter(ParamSpec::new("x", TypeExpr::Number))
        .parameter(ParamSpec::new("y", TypeExpr::Number))
        .returns(TypeExpr::Number)
        .with_docs(
            FunctionDocs::new("Add two numbers.")
                .param("x", "First addend.")
                .param("y", "Second addend.")
                .with_returns("The sum."),
        );

    ScopeEntry::new(decl, |args| {
        let x: f64 = args.get_as("x")?;
        let y: f64 = args.get_as("y")?;
        Ok(NativeValue::Float(x + y))
    })
}

fn create_task() -> ScopeEntry {
    let estimate = StructDef::new("TaskEstimate")
        .with_description("Estimated effort for a task.")
        .field(FieldSpec::new("hours", TypeExpr::Integer).with_description("Whole hours of work."))
        .field(
            FieldSpec::new("confidence", TypeExpr::Number)
                .with_default(json!(0.5))
                .with_description("Confidence between 0 and 1."),
        );

    let priority = EnumDef::new("Priority")
        .member("Low", json!("low"))
        .member("Normal", json!("normal"))
        .member("High", json!("high"));

    let decl = FunctionDecl::new("create_task")
        .parameter(ParamSpec::new("title", TypeExpr::String))
        .parameter(ParamSpec::new("priority", TypeExpr::enumeration(priority)).with_default(json!("normal")))
        .parameter(ParamSpec::new("estimate", TypeExpr::optional(TypeExpr::structure(estimate))))
        .parameter(ParamSpec::new("tags", TypeExpr::array(TypeExpr::String)).with_default(json!([])))
        .returns(TypeExpr::String)
        .with_docs(
            FunctionDocs::new("Create a task in the demo tracker.")
                .param("title", "Short task title.")
                .param("priority", "Scheduling priority.")
                .param("estimate", "Optional effort estimate.")
                .param("tags", "Free-form labels.")
                .with_returns("A one-line confirmation."),
        );

    ScopeEntry::new(decl, |args| {
        let title: String = args.get_as("title")?;
        let priority: String = args.get_as("priority")?;
        let estimate: Option<TaskEstimate> = args.get_optional_as("estimate")?;
        let tags: Vec<String> = args.get_as("tags")?;

        let mut line = format!("created '{title}' [{priority}]");
        if let Some(estimate) = estimate {
            line.push_str(&format!(
                " ~{}h ({:.0}% confident)",
                estimate.hours,
                estimate.confidence * 100.0
            ));
        }
        if !tags.is_empty() {
            line.push_str(&format!(" tags: {}", tags.join(", ")));
        }
        Ok(NativeValue::from(line))
    })
}

// Hidden from collection: not part of the published surface.
fn internal_reset() -> ScopeEntry {
    let decl = FunctionDecl::new("internal_reset");
    ScopeEntry::new(decl, |_args| Ok(NativeValue::Null)).hidden(true)
}
