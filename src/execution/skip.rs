//! # Skip Decision
//!
//! Decides whether a step runs at all. A step definition may carry a skip
//! expression; when skipping is armed and the expression resolves to true,
//! the executor advances the graph immediately without assembling or running
//! any evaluation request.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::constants::variables;
use crate::error::EngineError;

use super::context::ExecutionContext;
use super::expression::ExpressionEvaluator;
use super::scope::VariableScope;

/// Skip-decision seam consumed by the step executor
///
/// `is_enabled` answers whether the skip machinery applies to this step at
/// all; only then is `should_skip` consulted. Neither call may touch the
/// variable scope.
pub trait SkipExpressionEvaluator: Send + Sync {
    /// Whether skipping is armed for this step
    fn is_enabled(&self, expression: Option<&str>, step_id: &str, ctx: &ExecutionContext) -> bool;

    /// Whether the step should be skipped right now
    fn should_skip(
        &self,
        expression: Option<&str>,
        step_id: &str,
        ctx: &ExecutionContext,
    ) -> Result<bool, EngineError>;
}

/// Default skip evaluator backed by the engine's expression language
///
/// Skipping is armed only when the definition carries a non-empty expression
/// and the running instance has set the
/// [`variables::SKIP_EXPRESSIONS_ENABLED`] ambient variable to true. The
/// expression itself must resolve to a boolean; anything else fails the
/// invocation.
pub struct ExpressionSkipEvaluator {
    expressions: Arc<dyn ExpressionEvaluator>,
}

impl ExpressionSkipEvaluator {
    pub fn new(expressions: Arc<dyn ExpressionEvaluator>) -> Self {
        Self { expressions }
    }
}

impl SkipExpressionEvaluator for ExpressionSkipEvaluator {
    fn is_enabled(&self, expression: Option<&str>, step_id: &str, ctx: &ExecutionContext) -> bool {
        let present = match expression {
            Some(text) => !text.is_empty(),
            None => false,
        };
        if !present {
            return false;
        }
        let armed = matches!(
            ctx.variables.get_variable(variables::SKIP_EXPRESSIONS_ENABLED),
            Some(Value::Bool(true))
        );
        if !armed {
            debug!(
                step_id = step_id,
                "Skip expression present but not armed for this instance"
            );
        }
        armed
    }

    fn should_skip(
        &self,
        expression: Option<&str>,
        step_id: &str,
        ctx: &ExecutionContext,
    ) -> Result<bool, EngineError> {
        let Some(expression) = expression else {
            return Ok(false);
        };
        match self.expressions.resolve(expression, &ctx.variables)? {
            Value::Bool(skip) => Ok(skip),
            _ => Err(EngineError::SkipExpressionNotBoolean {
                step_id: step_id.to_string(),
                expression: expression.to_string(),
            }),
        }
    }
}
