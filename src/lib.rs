//! Schema-first function calling for Rust.
//!
//! Rigel compiles declared callables into JSON Schema descriptors that a
//! tool-calling consumer (typically an LLM) can discover, and validates,
//! coerces, and dispatches untrusted JSON payloads back into those same
//! callables.

pub use rigel_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use rigel_internal::prelude::*;
}
