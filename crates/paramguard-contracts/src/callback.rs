//! Callback function values and the registry that names them.
//!
//! Spec documents cannot hold code, so a field's `callbacks` table maps a
//! display name to the name of a function registered here. The engine looks
//! the function up when it compiles the spec.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::CallbackError;

/// A caller-supplied refinement check.
///
/// Receives the field name and the (already copied) value. A well-behaved
/// callback returns `Ok(Value::Bool(..))`; any other `Ok` value is treated as
/// a broken callback. `Err` is propagated to the caller untouched.
pub type Callback = Arc<dyn Fn(&str, &Value) -> Result<Value, CallbackError> + Send + Sync>;

/// Build a [`Callback`] from a closure.
pub fn from_fn<F>(f: F) -> Callback
where
    F: Fn(&str, &Value) -> Result<Value, CallbackError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a plain boolean predicate as a [`Callback`].
pub fn predicate<F>(f: F) -> Callback
where
    F: Fn(&str, &Value) -> bool + Send + Sync + 'static,
{
    from_fn(move |name, value| Ok(Value::Bool(f(name, value))))
}

/// Named callbacks available to spec documents.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `name`. Registering the same name twice
    /// replaces the previous function.
    pub fn register(&mut self, name: impl Into<String>, callback: Callback) {
        self.callbacks.insert(name.into(), callback);
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CallbackRegistry").field("callbacks", &names).finish()
    }
}
