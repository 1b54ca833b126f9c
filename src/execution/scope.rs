//! # Variable Scopes
//!
//! Read/write access to the process variables visible to a running execution.
//!
//! Scopes distinguish a variable that exists and holds null from a variable
//! that does not exist: `get_variable` returns `Some(Value::Null)` for the
//! former and `None` for the latter. Result binding and input-binding
//! assembly both rely on that distinction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Variable access seam between the engine and its callers
///
/// The ambient scope of an execution implements this, as do the fresh
/// containers assembled for explicitly bound inputs.
pub trait VariableScope: Send {
    /// Look up a variable by name
    fn get_variable(&self, name: &str) -> Option<Value>;

    /// Create or overwrite a variable
    fn set_variable(&mut self, name: &str, value: Value);

    /// Names of all visible variables, in no particular order
    fn variable_names(&self) -> Vec<String>;

    /// Check whether a variable with this name is visible
    fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }
}

/// In-memory variable scope backed by a hash map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapVariableScope {
    variables: HashMap<String, Value>,
}

impl MapVariableScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope over an existing variable map
    pub fn from_map(variables: HashMap<String, Value>) -> Self {
        Self { variables }
    }

    /// Add a variable (builder style)
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Number of variables in the scope
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Check whether the scope holds no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Consume the scope, yielding the underlying map
    pub fn into_map(self) -> HashMap<String, Value> {
        self.variables
    }
}

impl VariableScope for MapVariableScope {
    fn get_variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }
}
