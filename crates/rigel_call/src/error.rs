//! Invocation-time error types.
//!
//! Every failure from the PARSE, VALIDATE, and COERCE stages is a distinct,
//! machine-readable kind, so an LLM-driven caller can read the failure and
//! retry with corrected arguments. Target-raised failures pass through
//! untouched.

use crate::descriptor::TargetError;
use serde_json::{Value, json};
use thiserror::Error;

/// A single validation violation, carrying the dotted field path and the
/// expected vs. actual shape. Validation is fail-fast: the first violation
/// encountered fails the whole call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The payload value's JSON type does not match the schema node.
    #[error("type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Dotted field path (`$` for the payload root).
        path: String,
        /// Expected JSON Schema type name.
        expected: String,
        /// Actual JSON type name of the payload value.
        actual: String,
    },

    /// A required field is absent.
    #[error("missing required field '{path}'")]
    MissingField {
        /// Dotted path of the missing field.
        path: String,
    },

    /// A payload field does not exist in the schema. Extra fields are
    /// rejected rather than silently passed through, so caller typos
    /// surface instead of vanishing.
    #[error("unknown field '{path}'")]
    UnknownField {
        /// Dotted path of the unexpected field.
        path: String,
    },

    /// The value is not one of the allowed enumeration literals.
    #[error("value at '{path}' is not an allowed enum value: got {actual}")]
    NotInEnum {
        /// Dotted field path.
        path: String,
        /// Compact JSON rendering of the offending value.
        actual: String,
    },
}

impl ValidationError {
    /// The dotted field path the violation refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::MissingField { path }
            | Self::UnknownField { path }
            | Self::NotInEnum { path, .. } => path,
        }
    }
}

/// Errors raised while invoking a registered callable.
#[derive(Debug, Error)]
pub enum CallError {
    /// No callable with the given name is registered. Checked before any
    /// payload parsing.
    #[error("function '{0}' not found")]
    NotFound(String),

    /// The raw argument payload is not valid JSON text. Arguments are never
    /// partially applied.
    #[error("arguments are not valid JSON at line {line}, column {column}: {message}")]
    ArgumentParse {
        /// Decoder message.
        message: String,
        /// 1-based line of the decode failure.
        line: usize,
        /// 1-based column of the decode failure.
        column: usize,
    },

    /// The payload does not match the callable's parameter schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A validated value could not be converted to a native value.
    #[error("cannot coerce value at '{path}': {reason}")]
    Coercion {
        /// Dotted field path.
        path: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// The target itself failed. Passed through unmodified; this component
    /// owns validation and coercion errors only.
    #[error(transparent)]
    Target(#[from] TargetError),
}

impl CallError {
    /// Creates a [`Coercion`](Self::Coercion) error.
    pub fn coercion(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Coercion {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The stable machine-readable kind of this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::ArgumentParse { .. } => "argument_parse",
            Self::Validation(_) => "validation",
            Self::Coercion { .. } => "coercion",
            Self::Target(_) => "target",
        }
    }

    /// Renders this error as a structured JSON report:
    /// `{"error": kind, "message": text}` plus `"path"` where applicable.
    #[must_use]
    pub fn report(&self) -> Value {
        let mut report = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        let path = match self {
            Self::Validation(violation) => Some(violation.path()),
            Self::Coercion { path, .. } => Some(path.as_str()),
            _ => None,
        };
        if let (Some(path), Some(map)) = (path, report.as_object_mut()) {
            map.insert("path".to_string(), Value::String(path.to_string()));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_kind_and_path() {
        let err = CallError::from(ValidationError::TypeMismatch {
            path: "x".to_string(),
            expected: "number".to_string(),
            actual: "string".to_string(),
        });
        let report = err.report();
        assert_eq!(report["error"], "validation");
        assert_eq!(report["path"], "x");
        assert!(report["message"].as_str().unwrap().contains("expected number"));
    }

    #[test]
    fn not_found_report_has_no_path() {
        let report = CallError::NotFound("missing".to_string()).report();
        assert_eq!(report["error"], "not_found");
        assert!(report.get("path").is_none());
    }
}
