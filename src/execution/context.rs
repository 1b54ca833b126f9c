//! # Execution Context
//!
//! Runtime identity and ambient variable state for one running step
//! invocation. A context belongs to exactly one invocation at a time; the
//! engine never shares a context across concurrent executions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::scope::{MapVariableScope, VariableScope};

/// Runtime state of a single execution token positioned at a step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Identity of this execution token
    pub execution_id: Uuid,
    /// Process instance the token belongs to
    pub process_instance_id: Uuid,
    /// Identifier of the deployed process template being executed
    pub process_definition_id: String,
    /// Ambient variables visible at this point of the process
    pub variables: MapVariableScope,
}

impl ExecutionContext {
    /// Create a context with fresh identities and an empty scope
    pub fn new(process_definition_id: impl Into<String>) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            process_instance_id: Uuid::new_v4(),
            process_definition_id: process_definition_id.into(),
            variables: MapVariableScope::new(),
        }
    }

    /// Seed an ambient variable (builder style)
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.set_variable(&name.into(), value);
        self
    }

    /// Attach this context to an existing process instance
    pub fn with_process_instance(mut self, process_instance_id: Uuid) -> Self {
        self.process_instance_id = process_instance_id;
        self
    }
}
