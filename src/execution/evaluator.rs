//! # Script Evaluator Seam
//!
//! Concrete language runtimes plug into the engine through this trait. The
//! engine owns request assembly and outcome classification; evaluators own
//! everything between receiving a request and producing a value or a fault.

use std::fmt;

use serde_json::Value;

use crate::error::EvaluationFault;

use super::scope::VariableScope;
use super::types::EvaluationRequest;

/// One registered evaluator serves one script language
///
/// Implementations must resolve variable reads through
/// [`EvaluationRequest::input_scope`](super::types::EvaluationRequest) rather
/// than reaching into `ambient` directly, and may write script-created
/// variables back to `ambient` only when the request's
/// `store_script_variables` flag is set.
#[async_trait::async_trait]
pub trait ScriptEvaluator: Send + Sync {
    /// Evaluate a script, yielding its produced value if it has one
    ///
    /// Faults carry their classification tag; see
    /// [`EvaluationFault`](crate::error::EvaluationFault).
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
        ambient: &mut dyn VariableScope,
    ) -> Result<Option<Value>, EvaluationFault>;
}

/// Opaque formatting so containers holding evaluators can implement `Debug`
/// without requiring it of every implementation
impl fmt::Debug for dyn ScriptEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn ScriptEvaluator")
    }
}
