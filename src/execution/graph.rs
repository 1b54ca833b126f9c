//! # Graph Seams
//!
//! The executor signals the surrounding process graph through two
//! capabilities: advancing the execution token past the completed step, and
//! handing a domain error to the graph's boundary machinery. Both live
//! behind traits because traversal belongs to the enclosing engine.

use crate::error::{EngineError, EngineResult};

use super::context::ExecutionContext;

/// Moves an execution token through the process graph
#[async_trait::async_trait]
pub trait GraphNavigator: Send + Sync {
    /// Advance the token past the current step
    async fn advance(&self, ctx: &ExecutionContext) -> EngineResult<()>;
}

/// Routes domain errors to matching boundaries in the graph
#[async_trait::async_trait]
pub trait ErrorPropagator: Send + Sync {
    /// Hand a domain error code to the boundary search
    ///
    /// Ok means a boundary accepted the error and the graph takes over from
    /// there. An Err surfaces to the executor's caller when nothing in the
    /// graph handles the code.
    async fn propagate(&self, code: &str, ctx: &ExecutionContext) -> EngineResult<()>;
}

/// Propagator that refuses every code
///
/// Default wiring for engines that configured no error boundaries; domain
/// errors then fail the invocation instead of disappearing.
pub struct UnhandledErrorPropagator;

#[async_trait::async_trait]
impl ErrorPropagator for UnhandledErrorPropagator {
    async fn propagate(&self, code: &str, ctx: &ExecutionContext) -> EngineResult<()> {
        Err(EngineError::UnhandledDomainError {
            code: code.to_string(),
            execution_id: ctx.execution_id,
        })
    }
}
