//! # Rigel Internal Library
//!
//! Re-exports the core Rigel crates for convenience.

/// Layer 1: declarations, Schema IR, compilation, and rendering.
pub use rigel_schema;

/// Layer 2: registry, native values, and schema-driven invocation.
pub use rigel_call;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use rigel_call::prelude::*;
    pub use rigel_schema::prelude::*;
}
