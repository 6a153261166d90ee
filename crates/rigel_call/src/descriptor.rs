//! The callable descriptor: a compiled schema paired with its target.

use crate::value::{Arguments, NativeValue};
use rigel_schema::{CompiledSchema, FunctionDecl, render_descriptor};
use serde_json::Value;
use std::sync::Arc;

/// Error type raised by invocation targets.
///
/// Target failures are opaque to the invocation validator: they propagate
/// to the caller unmodified and are never reinterpreted.
pub type TargetError = Box<dyn std::error::Error + Send + Sync>;

/// An invokable target. Receives the coerced arguments bound by parameter
/// name and returns a native result.
pub type Handler = Arc<dyn Fn(Arguments) -> Result<NativeValue, TargetError> + Send + Sync>;

/// A compiled callable: the unit of discovery and invocation.
///
/// Descriptors are immutable after creation; re-registering a name replaces
/// the descriptor wholesale, it never patches one in place.
#[derive(Clone)]
pub struct CallableDescriptor {
    /// The declaration this descriptor was compiled from. Retained because
    /// coercion walks the declaration's types and defaults, not the IR's
    /// informational copies.
    pub decl: FunctionDecl,
    /// The compiled schema.
    pub schema: CompiledSchema,
    target: Handler,
}

impl core::fmt::Debug for CallableDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallableDescriptor")
            .field("name", &self.schema.name)
            .finish_non_exhaustive()
    }
}

impl CallableDescriptor {
    /// Creates a descriptor from a compiled declaration and its target.
    pub fn new(
        decl: FunctionDecl,
        schema: CompiledSchema,
        target: impl Fn(Arguments) -> Result<NativeValue, TargetError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            decl,
            schema,
            target: Arc::new(target),
        }
    }

    /// Creates a descriptor from an already-shared handler.
    #[must_use]
    pub fn from_handler(decl: FunctionDecl, schema: CompiledSchema, target: Handler) -> Self {
        Self {
            decl,
            schema,
            target,
        }
    }

    /// The callable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// The target handler.
    #[must_use]
    pub fn target(&self) -> &Handler {
        &self.target
    }

    /// Renders the published descriptor JSON for this callable.
    #[must_use]
    pub fn render(&self) -> Value {
        render_descriptor(&self.schema)
    }
}
