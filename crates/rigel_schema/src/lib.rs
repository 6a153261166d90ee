//! Declaration model, Schema IR, and JSON Schema compilation.
//!
//! This crate is the compile-time half of Rigel: it turns a declared
//! callable — an ordered parameter list of names, [`TypeExpr`]s, and
//! defaults — into an immutable Schema IR tree, merges documentation onto
//! it, and renders it as JSON Schema text for tool-calling consumers.
//!
//! # Quick Start
//!
//! ```
//! use rigel_schema::{FunctionDecl, ParamSpec, SchemaConfig, TypeExpr, compile, render_descriptor};
//!
//! let decl = FunctionDecl::new("addition")
//!     .parameter(ParamSpec::new("x", TypeExpr::Number))
//!     .parameter(ParamSpec::new("y", TypeExpr::Number))
//!     .returns(TypeExpr::Number);
//!
//! let compiled = compile(&decl, &SchemaConfig::default()).unwrap();
//! let schema = render_descriptor(&compiled);
//! assert_eq!(schema["parameters"]["type"], "object");
//! ```
//!
//! # Architecture
//!
//! - [`decl`] — declarations: [`FunctionDecl`], [`TypeExpr`], [`StructDef`], [`EnumDef`]
//! - [`node`] — the Schema IR: [`SchemaNode`] / [`SchemaKind`]
//! - [`compile`](mod@compile) — the type introspector
//! - [`docs`] — structured documentation and the description merger
//! - [`render`](mod@render) — IR to JSON Schema serialization

pub mod compile;
pub mod config;
pub mod decl;
pub mod docs;
pub mod error;
pub mod node;
pub mod render;

// Re-export core types at crate root.
pub use compile::{CompiledSchema, ResponseSchema, compile};
pub use config::SchemaConfig;
pub use decl::{EnumDef, EnumMember, FieldSpec, FunctionDecl, ParamSpec, StructDef, TypeExpr};
pub use docs::FunctionDocs;
pub use error::SchemaError;
pub use node::{ObjectSchema, SchemaKind, SchemaNode};
pub use render::{render, render_descriptor};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::compile::{CompiledSchema, ResponseSchema, compile};
    pub use crate::config::SchemaConfig;
    pub use crate::decl::{
        EnumDef, EnumMember, FieldSpec, FunctionDecl, ParamSpec, StructDef, TypeExpr,
    };
    pub use crate::docs::FunctionDocs;
    pub use crate::error::SchemaError;
    pub use crate::node::{ObjectSchema, SchemaKind, SchemaNode};
    pub use crate::render::{render, render_descriptor};
}
