//! Function registry and schema-driven invocation.
//!
//! This crate is the call-time half of Rigel: a [`FunctionRegistry`] maps
//! names to compiled [`CallableDescriptor`]s, and the invocation validator
//! takes an untrusted JSON payload through parse, validation, coercion,
//! and dispatch against a registered target.
//!
//! # Quick Start
//!
//! ```
//! use rigel_call::{FunctionRegistry, NativeValue};
//! use rigel_schema::{FunctionDecl, ParamSpec, SchemaConfig, TypeExpr};
//! use serde_json::json;
//!
//! let mut registry = FunctionRegistry::new();
//! registry
//!     .register(
//!         FunctionDecl::new("addition")
//!             .parameter(ParamSpec::new("x", TypeExpr::Number))
//!             .parameter(ParamSpec::new("y", TypeExpr::Number))
//!             .returns(TypeExpr::Number),
//!         |args| {
//!             let x: f64 = args.get_as("x")?;
//!             let y: f64 = args.get_as("y")?;
//!             Ok(NativeValue::Float(x + y))
//!         },
//!         &SchemaConfig::default(),
//!     )
//!     .unwrap();
//!
//! let result = registry.invoke("addition", r#"{"x": 1.0, "y": 2.0}"#).unwrap();
//! assert_eq!(result, json!(3.0));
//! ```
//!
//! # Architecture
//!
//! - [`value`] — [`NativeValue`] / [`Arguments`], the coercion output
//! - [`descriptor`] — [`CallableDescriptor`] pairing schema and target
//! - [`registry`] — [`FunctionRegistry`], [`FunctionScope`], collection
//! - [`invoke`](mod@invoke) — the PARSE → VALIDATE → COERCE → INVOKE →
//!   ENCODE state machine
//! - [`error`] — the [`CallError`] taxonomy

pub mod descriptor;
pub mod error;
pub mod invoke;
pub mod registry;
pub mod value;

// Re-export core types at crate root.
pub use descriptor::{CallableDescriptor, Handler, TargetError};
pub use error::{CallError, ValidationError};
pub use invoke::{invoke, invoke_native, invoke_value, validate};
pub use registry::{CollectFilter, FunctionRegistry, FunctionScope, ScopeEntry};
pub use value::{ArgumentError, Arguments, EnumValue, NativeValue, StructValue};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::descriptor::{CallableDescriptor, Handler, TargetError};
    pub use crate::error::{CallError, ValidationError};
    pub use crate::invoke::{invoke, invoke_native, invoke_value};
    pub use crate::registry::{CollectFilter, FunctionRegistry, FunctionScope, ScopeEntry};
    pub use crate::value::{ArgumentError, Arguments, EnumValue, NativeValue, StructValue};
}
