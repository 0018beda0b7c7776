//! Named callables
//!
//! Concurrent map from filter/tag names to registered callables. Lookups
//! clone an `Arc`, so no shard lock is held while a native runs.

use crate::error::InvokeError;
use crate::invoke::{Callable, Invoker};
use crate::logging::debug;
use crate::value::Value;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Registry {
    callables: DashMap<String, Arc<Callable>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the callable's own name, returning any callable it replaces
    pub fn register(&self, callable: Callable) -> Option<Arc<Callable>> {
        let name = callable.name().to_string();
        debug!(target: "filter_bridge::registry", name = %name, arity = callable.arity(), "registering callable");
        self.callables.insert(name, Arc::new(callable))
    }

    pub fn get(&self, name: &str) -> Option<Arc<Callable>> {
        self.callables.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callables.contains_key(name)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Callable>> {
        self.callables.remove(name).map(|(_, callable)| callable)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.callables.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    /// Look up `name` and call it through `invoker`
    pub fn invoke(&self, name: &str, args: &[Value], invoker: &Invoker) -> Result<Value, InvokeError> {
        let callable = self.get(name).ok_or_else(|| InvokeError::UnknownCallable {
            name: name.to_string(),
        })?;
        invoker.try_invoke(&callable, args)
    }
}
