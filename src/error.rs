//! Error types for the procflow execution engine.
//!

use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigurationError;

pub type EngineResult<T> = anyhow::Result<T, EngineError>;

/// Engine-level faults raised while executing a scripted step
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// No evaluator registered for the requested script language
    #[error("No script evaluator registered for language {language}")]
    EvaluatorNotFound { language: String },

    /// An input binding's source expression failed to resolve
    #[error("Input binding {target} failed to resolve {expression}: {reason}")]
    BindingResolution {
        target: String,
        expression: String,
        reason: String,
    },

    /// An expression failed to resolve against the execution scope
    #[error("Expression resolution failed for {expression}: {reason}")]
    ExpressionResolution { expression: String, reason: String },

    /// A skip expression resolved to something other than a boolean
    #[error("Skip expression for step {step_id} did not resolve to a boolean: {expression}")]
    SkipExpressionNotBoolean { step_id: String, expression: String },

    /// A legacy-language evaluation echoed the script text back unresolved
    #[error(
        "Error evaluating {language} script \"{script}\" for step {step_id} in execution {execution_id}"
    )]
    UnresolvedExpression {
        language: String,
        script: String,
        step_id: String,
        execution_id: Uuid,
    },

    /// A domain error surfaced with no boundary willing to handle it
    #[error("No boundary handles domain error {code} raised in execution {execution_id}")]
    UnhandledDomainError { code: String, execution_id: Uuid },

    /// Engine configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Evaluator fault the engine could not classify, surfaced unchanged
    #[error(transparent)]
    Evaluation(#[from] EvaluationFault),
}

impl From<ConfigurationError> for EngineError {
    fn from(err: ConfigurationError) -> Self {
        EngineError::Configuration(err.to_string())
    }
}

/// Fault raised by a script evaluator, tagged with its classification
///
/// Evaluators tag faults at the raise site instead of leaving the engine to
/// walk a cause chain. `Domain` marks a modeled business failure the
/// surrounding process may catch; `Engine` wraps a fault of the engine's own
/// taxonomy; `Unclassified` covers everything else.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct EvaluationFault {
    pub message: String,
    pub cause: FaultCause,
}

/// Classification tag carried by evaluator faults
#[derive(Debug, Clone, PartialEq)]
pub enum FaultCause {
    /// Modeled business failure identified by a domain error code
    Domain { code: String },
    /// Engine-level fault that aborts the invocation
    Engine(Box<EngineError>),
    /// Failure the evaluator could not classify
    Unclassified,
}

impl EvaluationFault {
    /// Fault carrying a domain error code for boundary propagation
    pub fn domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: FaultCause::Domain { code: code.into() },
        }
    }

    /// Fault wrapping an engine-level error
    pub fn engine(inner: EngineError, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: FaultCause::Engine(Box::new(inner)),
        }
    }

    /// Fault with no classification
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: FaultCause::Unclassified,
        }
    }

    /// Get the fault class name for structured logging
    pub fn fault_class(&self) -> &'static str {
        match self.cause {
            FaultCause::Domain { .. } => "DomainError",
            FaultCause::Engine(_) => "EngineFault",
            FaultCause::Unclassified => "UnclassifiedFault",
        }
    }

    /// Domain error code when the fault is a domain failure
    pub fn domain_code(&self) -> Option<&str> {
        match &self.cause {
            FaultCause::Domain { code } => Some(code),
            _ => None,
        }
    }
}
