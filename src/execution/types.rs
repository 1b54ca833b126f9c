//! # Execution Types
//!
//! Core types shared across the scripted-step execution path: the immutable
//! step definition, evaluation requests with their input scoping, and the
//! outcome handed back to the engine loop.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::constants::system;
use crate::error::EngineError;

use super::scope::{MapVariableScope, VariableScope};

/// Immutable definition of a scripted step inside a process template
///
/// Definitions are produced when the process graph is built and shared
/// read-only across every concurrent execution of that template. Anything
/// invocation-specific, such as an overridden script text, lives on the
/// invocation itself and never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStepDefinition {
    /// Step identifier, unique within the process template
    pub step_id: String,
    /// Script source text as modeled
    pub script: String,
    /// Language tag the script is written in; empty means engine default
    pub language: String,
    /// Ambient variable to store the evaluation result under, if any
    pub result_variable: Option<String>,
    /// Expression deciding whether the step is skipped; absent disables skip
    pub skip_expression: Option<String>,
    /// Whether the evaluator should write script-created variables back
    pub store_script_variables: bool,
    /// Run the script against an empty scope instead of the ambient one
    pub exclude_ambient_variables: bool,
    /// Explicit input bindings; non-empty takes precedence over exclusion
    pub input_bindings: Vec<InputBinding>,
}

/// Single input binding: resolve an expression, expose it under a new name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBinding {
    pub target: String,
    pub source_expression: String,
}

impl InputBinding {
    pub fn new(target: impl Into<String>, source_expression: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source_expression: source_expression.into(),
        }
    }
}

impl ScriptStepDefinition {
    /// Create a definition with the required fields; everything else defaults off
    pub fn new(
        step_id: impl Into<String>,
        script: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            script: script.into(),
            language: language.into(),
            result_variable: None,
            skip_expression: None,
            store_script_variables: false,
            exclude_ambient_variables: false,
            input_bindings: Vec::new(),
        }
    }

    /// Store the evaluation result under this ambient variable
    pub fn with_result_variable(mut self, name: impl Into<String>) -> Self {
        self.result_variable = Some(name.into());
        self
    }

    /// Guard the step with a skip expression
    pub fn with_skip_expression(mut self, expression: impl Into<String>) -> Self {
        self.skip_expression = Some(expression.into());
        self
    }

    /// Ask the evaluator to write script-created variables back
    pub fn with_store_script_variables(mut self, store: bool) -> Self {
        self.store_script_variables = store;
        self
    }

    /// Evaluate against an empty scope instead of the ambient one
    pub fn with_exclude_ambient_variables(mut self, exclude: bool) -> Self {
        self.exclude_ambient_variables = exclude;
        self
    }

    /// Add an explicit input binding
    pub fn with_input_binding(mut self, binding: InputBinding) -> Self {
        self.input_bindings.push(binding);
        self
    }

    /// Replace the full input binding list
    pub fn with_input_bindings(mut self, bindings: Vec<InputBinding>) -> Self {
        self.input_bindings = bindings;
        self
    }

    /// Structural validation, run once when the process graph is built
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.step_id.is_empty() {
            return Err(EngineError::Configuration(
                "script step requires a non-empty step_id".to_string(),
            ));
        }
        if self.input_bindings.len() > system::MAX_INPUT_BINDINGS {
            return Err(EngineError::Configuration(format!(
                "step {} declares {} input bindings, limit is {}",
                self.step_id,
                self.input_bindings.len(),
                system::MAX_INPUT_BINDINGS
            )));
        }
        for binding in &self.input_bindings {
            if binding.target.is_empty() {
                return Err(EngineError::Configuration(format!(
                    "step {} declares an input binding with an empty target",
                    self.step_id
                )));
            }
        }
        Ok(())
    }
}

/// Variables visible to one evaluation
///
/// Exactly one of the three shapes applies to a request, which keeps the
/// scoping rules mutually exclusive by construction: explicit bindings win
/// over exclusion, exclusion wins over ambient inheritance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputScope {
    /// The evaluation sees the full ambient scope of the execution
    Ambient,
    /// The evaluation sees only the explicitly bound values
    Bound(MapVariableScope),
    /// The evaluation sees no variables at all
    Isolated,
}

impl InputScope {
    /// Resolve a variable read through this scope
    pub fn lookup(&self, ambient: &dyn VariableScope, name: &str) -> Option<Value> {
        match self {
            InputScope::Ambient => ambient.get_variable(name),
            InputScope::Bound(bound) => bound.get_variable(name),
            InputScope::Isolated => None,
        }
    }

    /// Names visible through this scope
    pub fn visible_names(&self, ambient: &dyn VariableScope) -> Vec<String> {
        match self {
            InputScope::Ambient => ambient.variable_names(),
            InputScope::Bound(bound) => bound.variable_names(),
            InputScope::Isolated => Vec::new(),
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, InputScope::Ambient)
    }

    pub fn is_isolated(&self) -> bool {
        matches!(self, InputScope::Isolated)
    }
}

/// Everything a script evaluator needs for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Effective script text, after any runtime override
    pub script: String,
    /// Language tag, already defaulted when the definition left it empty
    pub language: String,
    /// Variables visible to the evaluation
    pub input_scope: InputScope,
    /// Whether script-created variables should be written back
    pub store_script_variables: bool,
    /// Diagnostic tags threaded through to evaluator tracing
    pub trace_tags: HashMap<String, String>,
}

impl EvaluationRequest {
    /// Start building a request for the given script and language
    pub fn builder(script: impl Into<String>, language: impl Into<String>) -> EvaluationRequestBuilder {
        EvaluationRequestBuilder {
            script: script.into(),
            language: language.into(),
            input_scope: InputScope::Ambient,
            store_script_variables: false,
            trace_tags: HashMap::new(),
        }
    }
}

/// Builder for [`EvaluationRequest`]
#[derive(Debug, Clone)]
pub struct EvaluationRequestBuilder {
    script: String,
    language: String,
    input_scope: InputScope,
    store_script_variables: bool,
    trace_tags: HashMap<String, String>,
}

impl EvaluationRequestBuilder {
    pub fn input_scope(mut self, scope: InputScope) -> Self {
        self.input_scope = scope;
        self
    }

    pub fn store_script_variables(mut self, store: bool) -> Self {
        self.store_script_variables = store;
        self
    }

    pub fn trace_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.trace_tags.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> EvaluationRequest {
        EvaluationRequest {
            script: self.script,
            language: self.language,
            input_scope: self.input_scope,
            store_script_variables: self.store_script_variables,
            trace_tags: self.trace_tags,
        }
    }
}

/// How one scripted-step invocation concluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Script ran to completion; the execution advanced
    Completed { result: Option<Value> },
    /// Skip expression fired; the execution advanced without evaluating
    Skipped,
    /// Evaluation raised a domain error that was handed to a boundary
    DomainErrorPropagated { code: String },
}

impl StepOutcome {
    /// Check if the step ran its script to completion
    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed { .. })
    }

    /// Check if the step was skipped without evaluating
    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped)
    }

    /// Check if a domain error was propagated instead of completing
    pub fn is_domain_error(&self) -> bool {
        matches!(self, StepOutcome::DomainErrorPropagated { .. })
    }

    /// Produced result value, when the step completed with one
    pub fn result(&self) -> Option<&Value> {
        match self {
            StepOutcome::Completed { result } => result.as_ref(),
            _ => None,
        }
    }
}
