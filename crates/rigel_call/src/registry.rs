//! Function registry: the name-to-descriptor mapping exposed to outside
//! callers for discovery and invocation.
//!
//! The registry stores compiled descriptors by name and provides lookup,
//! enumeration, and invocation. Registration is append/replace only: a new
//! registration under an existing name silently replaces the old entry
//! (callers de-duplicate upstream if that is undesired), and a failed
//! compilation leaves the registry untouched.
//!
//! Descriptors and their Schema IR are immutable once stored, so any
//! number of concurrent `lookup`/`list`/`invoke` calls may proceed without
//! coordination; mutation takes `&mut self` and is thereby exclusive.

use crate::descriptor::{CallableDescriptor, Handler, TargetError};
use crate::error::CallError;
use crate::invoke;
use crate::value::{Arguments, NativeValue};
use indexmap::IndexMap;
use rigel_schema::{FunctionDecl, SchemaConfig, SchemaError};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Registry of compiled callables.
#[derive(Default)]
pub struct FunctionRegistry {
    entries: IndexMap<String, Arc<CallableDescriptor>>,
}

impl core::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Compiles a declaration and registers it under its declared name,
    /// replacing any previous entry of that name.
    ///
    /// # Errors
    ///
    /// Returns the compilation error unchanged; the registry is left
    /// untouched when compilation fails.
    pub fn register(
        &mut self,
        decl: FunctionDecl,
        target: impl Fn(Arguments) -> Result<NativeValue, TargetError> + Send + Sync + 'static,
        config: &SchemaConfig,
    ) -> Result<(), SchemaError> {
        let schema = rigel_schema::compile(&decl, config)?;
        self.insert(Arc::new(CallableDescriptor::new(decl, schema, target)));
        Ok(())
    }

    /// Registers every visible entry of a scope under its own declared
    /// name.
    ///
    /// Entries marked hidden are skipped. All eligible entries are
    /// compiled first and inserted only if every compilation succeeds, so
    /// a failure never leaves the registry partially updated.
    ///
    /// # Errors
    ///
    /// Returns the first compilation error; nothing is registered.
    pub fn collect(
        &mut self,
        scope: &dyn FunctionScope,
        config: &SchemaConfig,
    ) -> Result<Vec<String>, SchemaError> {
        self.collect_filtered(scope, &CollectFilter::default(), config)
    }

    /// Registers scope entries admitted by the filter.
    ///
    /// Denied names are always skipped; when an allow-list is present it
    /// admits exactly its members, bypassing the hidden flag.
    ///
    /// # Errors
    ///
    /// Returns the first compilation error; nothing is registered.
    pub fn collect_filtered(
        &mut self,
        scope: &dyn FunctionScope,
        filter: &CollectFilter,
        config: &SchemaConfig,
    ) -> Result<Vec<String>, SchemaError> {
        let mut compiled = Vec::new();
        for entry in scope.entries() {
            if !filter.admits(&entry.decl.name, entry.hidden) {
                continue;
            }
            let schema = rigel_schema::compile(&entry.decl, config)?;
            compiled.push(Arc::new(CallableDescriptor::from_handler(
                entry.decl,
                schema,
                entry.target,
            )));
        }

        let mut registered = Vec::with_capacity(compiled.len());
        for descriptor in compiled {
            registered.push(descriptor.name().to_string());
            self.insert(descriptor);
        }
        Ok(registered)
    }

    fn insert(&mut self, descriptor: Arc<CallableDescriptor>) {
        let name = descriptor.name().to_string();
        if self.entries.insert(name.clone(), descriptor).is_some() {
            tracing::debug!(function = %name, "replaced existing registration");
        }
    }

    /// Returns the descriptor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::NotFound`] when no such callable exists.
    pub fn lookup(&self, name: &str) -> Result<&Arc<CallableDescriptor>, CallError> {
        self.entries
            .get(name)
            .ok_or_else(|| CallError::NotFound(name.to_string()))
    }

    /// Returns a descriptor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<CallableDescriptor>> {
        self.entries.get(name)
    }

    /// Returns whether a callable with the given name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns all descriptors in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<CallableDescriptor>> {
        self.entries.values().cloned().collect()
    }

    /// Returns the names of all registered callables in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the rendered descriptor JSON of every registered callable in
    /// registration order. This is what a discovery endpoint publishes.
    #[must_use]
    pub fn schemas(&self) -> Vec<Value> {
        self.entries.values().map(|d| d.render()).collect()
    }

    /// Number of registered callables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes a callable with a raw JSON payload, returning the result
    /// encoded as JSON. See [`invoke::invoke`].
    ///
    /// # Errors
    ///
    /// Fails with one of the [`CallError`] kinds.
    pub fn invoke(&self, name: &str, raw: &str) -> Result<Value, CallError> {
        invoke::invoke(self, name, raw)
    }

    /// Invokes a callable with a raw JSON payload, returning the native
    /// result. See [`invoke::invoke_native`].
    ///
    /// # Errors
    ///
    /// Fails with one of the [`CallError`] kinds.
    pub fn invoke_native(&self, name: &str, raw: &str) -> Result<NativeValue, CallError> {
        invoke::invoke_native(self, name, raw)
    }

    /// Invokes a callable with an already-parsed JSON value. See
    /// [`invoke::invoke_value`].
    ///
    /// # Errors
    ///
    /// Fails with one of the [`CallError`] kinds, minus `ArgumentParse`.
    pub fn invoke_value(&self, name: &str, payload: &Value) -> Result<Value, CallError> {
        invoke::invoke_value(self, name, payload)
    }
}

/// A group of declarations registered together.
///
/// A scope is the unit `collect` walks: anything that can enumerate its
/// callables — a module's tool table, a plugin's surface — implements
/// this.
pub trait FunctionScope {
    /// The scope's entries, in declaration order.
    fn entries(&self) -> Vec<ScopeEntry>;
}

/// One callable inside a [`FunctionScope`].
pub struct ScopeEntry {
    /// The declaration to compile.
    pub decl: FunctionDecl,
    /// The invokable target.
    pub target: Handler,
    /// Hidden entries are skipped by `collect` unless an allow-list names
    /// them explicitly.
    pub hidden: bool,
}

impl ScopeEntry {
    /// Creates a visible scope entry.
    pub fn new(
        decl: FunctionDecl,
        target: impl Fn(Arguments) -> Result<NativeValue, TargetError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            decl,
            target: Arc::new(target),
            hidden: false,
        }
    }

    /// Marks this entry hidden.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Name-based admission filter for [`FunctionRegistry::collect_filtered`].
#[derive(Debug, Clone, Default)]
pub struct CollectFilter {
    allow: Option<HashSet<String>>,
    deny: HashSet<String>,
}

impl CollectFilter {
    /// Creates a filter admitting every visible entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name to the allow-list. Once any name is allowed, only
    /// allowed names are admitted (hidden or not).
    #[must_use]
    pub fn allow(mut self, name: impl Into<String>) -> Self {
        self.allow.get_or_insert_default().insert(name.into());
        self
    }

    /// Adds a name to the deny-list. Denied names are never admitted.
    #[must_use]
    pub fn deny(mut self, name: impl Into<String>) -> Self {
        self.deny.insert(name.into());
        self
    }

    /// Whether an entry passes this filter.
    #[must_use]
    pub fn admits(&self, name: &str, hidden: bool) -> bool {
        if self.deny.contains(name) {
            return false;
        }
        match &self.allow {
            Some(allowed) => allowed.contains(name),
            None => !hidden,
        }
    }
}
