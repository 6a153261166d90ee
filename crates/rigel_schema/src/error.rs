//! Compile-time error types.

use thiserror::Error;

/// Errors raised while compiling a declaration into Schema IR.
///
/// A declaration that fails to compile is simply not registered; there is
/// no silent fallback to an untyped schema, because a validator that
/// cannot type-check a field cannot safely coerce it either.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A parameter or field type outside the supported set, including
    /// self-referential structured types.
    #[error("unsupported type for parameter '{parameter}': {reason}")]
    UnsupportedType {
        /// Dotted path of the offending parameter or field.
        parameter: String,
        /// Why the type cannot be compiled.
        reason: String,
    },

    /// A declaration violating a structural invariant (empty name,
    /// duplicate parameter, malformed enum).
    #[error("invalid declaration '{function}': {reason}")]
    InvalidDeclaration {
        /// Name of the declaration, possibly empty.
        function: String,
        /// The violated invariant.
        reason: String,
    },
}

impl SchemaError {
    /// Creates an [`UnsupportedType`](Self::UnsupportedType).
    pub fn unsupported(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedType {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`InvalidDeclaration`](Self::InvalidDeclaration).
    pub fn invalid(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            function: function.into(),
            reason: reason.into(),
        }
    }
}
