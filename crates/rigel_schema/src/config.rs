//! Schema compilation configuration.

use serde::{Deserialize, Serialize};

/// Flags controlling what a compiled schema carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Whether to run the description merger. When `false` the compiled
    /// schema carries no human-readable text at all.
    pub descriptions: bool,
    /// Whether the callable description includes the documentation body in
    /// addition to the summary line.
    pub full_docs: bool,
    /// Whether to compile a response schema for the return type.
    pub responses: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            descriptions: true,
            full_docs: false,
            responses: true,
        }
    }
}

impl SchemaConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether descriptions are merged into the schema.
    #[must_use]
    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Sets whether the full documentation body is used.
    #[must_use]
    pub fn with_full_docs(mut self, full_docs: bool) -> Self {
        self.full_docs = full_docs;
        self
    }

    /// Sets whether a response schema is compiled.
    #[must_use]
    pub fn with_responses(mut self, responses: bool) -> Self {
        self.responses = responses;
        self
    }
}
