//! # Expression Evaluation Seam
//!
//! The engine never interprets expression text itself. Skip expressions and
//! input-binding sources are resolved through this trait by whatever
//! expression language the enclosing engine ships.

use serde_json::Value;

use crate::error::EngineError;

use super::scope::VariableScope;

/// Resolves a modeled expression against the variables visible to a scope
pub trait ExpressionEvaluator: Send + Sync {
    /// Resolve `expression` to a JSON value
    ///
    /// Implementations report resolution failures as
    /// [`EngineError::ExpressionResolution`] so binding assembly can attach
    /// the failing target and expression to the fault it raises.
    fn resolve(&self, expression: &str, scope: &dyn VariableScope) -> Result<Value, EngineError>;
}
