//! Structured documentation and the description merger.
//!
//! [`FunctionDocs`] holds prose already extracted upstream (from doc
//! comments or any other source); this module only attaches it to compiled
//! schemas. It is a metadata source, not a parsing engine.

use crate::compile::CompiledSchema;
use crate::node::SchemaKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Documentation for a callable: a summary line, an optional body, and
/// per-parameter descriptions keyed by exact parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDocs {
    /// One-line summary of the callable.
    pub summary: Option<String>,
    /// Extended prose after the summary.
    pub body: Option<String>,
    /// Parameter descriptions keyed by parameter name.
    pub params: IndexMap<String, String>,
    /// Description of the return value.
    pub returns: Option<String>,
}

impl FunctionDocs {
    /// Creates documentation with the given summary line.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    /// Sets the extended body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a parameter description.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.insert(name.into(), description.into());
        self
    }

    /// Sets the return value description.
    #[must_use]
    pub fn with_returns(mut self, description: impl Into<String>) -> Self {
        self.returns = Some(description.into());
        self
    }

    /// The callable-level description: the summary, extended by the body
    /// when `full` is set.
    #[must_use]
    pub fn description(&self, full: bool) -> String {
        let mut text = self.summary.clone().unwrap_or_default();
        if full && let Some(body) = &self.body {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(body);
        }
        text
    }
}

/// Attaches documentation onto a compiled schema.
///
/// Parameter descriptions are matched by exact name; entries that do not
/// correspond to a declared parameter are ignored, so documentation drift
/// never breaks schema compilation. Type semantics are untouched.
pub(crate) fn merge(schema: &mut CompiledSchema, docs: &FunctionDocs, full: bool) {
    schema.description = docs.description(full);

    if let SchemaKind::Object(obj) = &mut schema.parameters.kind {
        for (name, description) in &docs.params {
            if let Some(node) = obj.properties.get_mut(name) {
                node.description = Some(description.clone());
            } else {
                tracing::debug!(parameter = %name, "ignoring documentation for unknown parameter");
            }
        }
    }

    if let (Some(response), Some(returns)) = (&mut schema.response, &docs.returns) {
        response.description = Some(returns.clone());
    }
}
