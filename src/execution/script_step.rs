//! # Scripted Step Executor
//!
//! ## Architecture: Seam-Based Step Execution
//!
//! The ScriptStepExecutor runs one scripted step of a process instance end to
//! end while delegating everything language- or graph-specific to injected
//! collaborators. The executor owns the step semantics; evaluators own the
//! languages; the enclosing engine owns traversal and error boundaries.
//!
//! ## Key Features
//!
//! - **Skip decision**: an armed skip expression bypasses evaluation entirely
//! - **Runtime overrides**: dynamically published script replacements apply
//!   per invocation without touching the shared definition
//! - **Scope isolation**: explicit input bindings or full exclusion control
//!   what the script can see
//! - **Outcome classification**: domain errors go to graph boundaries, engine
//!   faults and unclassified faults abort the invocation
//! - **Single advance**: the graph is advanced exactly once on success or
//!   skip, never on a fault
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::Value;
//! use procflow_core::error::{EngineError, EngineResult};
//! use procflow_core::execution::{
//!     ExecutionContext, ExpressionEvaluator, GraphNavigator, ScriptEngineRegistry,
//!     ScriptStepDefinition, ScriptStepExecutor, VariableScope,
//! };
//!
//! struct AmbientLookup;
//!
//! impl ExpressionEvaluator for AmbientLookup {
//!     fn resolve(&self, expression: &str, scope: &dyn VariableScope) -> Result<Value, EngineError> {
//!         let name = expression.trim_start_matches("${").trim_end_matches('}');
//!         scope
//!             .get_variable(name)
//!             .ok_or_else(|| EngineError::ExpressionResolution {
//!                 expression: expression.to_string(),
//!                 reason: "unknown variable".to_string(),
//!             })
//!     }
//! }
//!
//! struct NoopNavigator;
//!
//! #[async_trait::async_trait]
//! impl GraphNavigator for NoopNavigator {
//!     async fn advance(&self, _ctx: &ExecutionContext) -> EngineResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let registry = Arc::new(ScriptEngineRegistry::new());
//! let executor =
//!     ScriptStepExecutor::new(registry, Arc::new(AmbientLookup), Arc::new(NoopNavigator));
//!
//! let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
//!     .with_result_variable("total");
//! let mut ctx = ExecutionContext::new("order-process:1");
//!
//! // Fails with EvaluatorNotFound until an evaluator for "rhai" is registered
//! let _ = executor.execute(&definition, &mut ctx).await;
//! # });
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::constants::{languages, trace_tags};
use crate::error::{EngineError, EngineResult, EvaluationFault, FaultCause};

use super::context::ExecutionContext;
use super::expression::ExpressionEvaluator;
use super::graph::{ErrorPropagator, GraphNavigator, UnhandledErrorPropagator};
use super::overrides::{NoOverrides, OverrideProvider};
use super::registry::ScriptEngineRegistry;
use super::scope::{MapVariableScope, VariableScope};
use super::skip::{ExpressionSkipEvaluator, SkipExpressionEvaluator};
use super::types::{EvaluationRequest, InputScope, ScriptStepDefinition, StepOutcome};

/// Executor for scripted steps
pub struct ScriptStepExecutor {
    registry: Arc<ScriptEngineRegistry>,
    expressions: Arc<dyn ExpressionEvaluator>,
    skip_evaluator: Arc<dyn SkipExpressionEvaluator>,
    overrides: Arc<dyn OverrideProvider>,
    error_propagator: Arc<dyn ErrorPropagator>,
    navigator: Arc<dyn GraphNavigator>,
    config: EngineConfig,
}

impl ScriptStepExecutor {
    /// Create an executor with default collaborators
    ///
    /// Defaults: expression-backed skip evaluation, no override provider, and
    /// an error propagator that refuses every domain error. Swap any of them
    /// with the `with_*` methods.
    pub fn new(
        registry: Arc<ScriptEngineRegistry>,
        expressions: Arc<dyn ExpressionEvaluator>,
        navigator: Arc<dyn GraphNavigator>,
    ) -> Self {
        let skip_evaluator: Arc<dyn SkipExpressionEvaluator> =
            Arc::new(ExpressionSkipEvaluator::new(expressions.clone()));

        Self {
            registry,
            expressions,
            skip_evaluator,
            overrides: Arc::new(NoOverrides),
            error_propagator: Arc::new(UnhandledErrorPropagator),
            navigator,
            config: EngineConfig::default(),
        }
    }

    /// Replace the skip evaluator
    pub fn with_skip_evaluator(mut self, skip_evaluator: Arc<dyn SkipExpressionEvaluator>) -> Self {
        self.skip_evaluator = skip_evaluator;
        self
    }

    /// Attach an override provider for dynamically published scripts
    pub fn with_override_provider(mut self, overrides: Arc<dyn OverrideProvider>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Attach the graph's error-boundary propagator
    pub fn with_error_propagator(mut self, error_propagator: Arc<dyn ErrorPropagator>) -> Self {
        self.error_propagator = error_propagator;
        self
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute one scripted step against the given execution context
    ///
    /// The graph is advanced exactly once when the step completes or is
    /// skipped, and never when a fault aborts the invocation. A domain error
    /// raised by the evaluator is handed to the error propagator instead of
    /// failing the call.
    #[instrument(
        skip(self, definition, ctx),
        fields(
            step_id = %definition.step_id,
            execution_id = %ctx.execution_id,
            process_definition_id = %ctx.process_definition_id
        )
    )]
    pub async fn execute(
        &self,
        definition: &ScriptStepDefinition,
        ctx: &mut ExecutionContext,
    ) -> EngineResult<StepOutcome> {
        let skip_expression = definition.skip_expression.as_deref();
        if self
            .skip_evaluator
            .is_enabled(skip_expression, &definition.step_id, ctx)
            && self
                .skip_evaluator
                .should_skip(skip_expression, &definition.step_id, ctx)?
        {
            debug!("Skip expression fired, advancing without evaluation");
            self.navigator.advance(ctx).await?;
            return Ok(StepOutcome::Skipped);
        }

        let script = self.effective_script(definition, ctx);
        let request = self.assemble_request(definition, script, ctx)?;
        let evaluator = self.registry.resolve(&request.language)?;

        debug!(language = %request.language, "Dispatching evaluation request");
        match evaluator.evaluate(&request, &mut ctx.variables).await {
            Ok(produced) => self.complete(definition, &request, produced, ctx).await,
            Err(fault) => self.classify_fault(&definition.step_id, fault, ctx).await,
        }
    }

    /// Script text for this invocation, with any runtime override applied
    ///
    /// A published replacement wins only when the override cache is enabled
    /// engine-wide and the replacement is non-empty and textually different
    /// from the modeled script. The definition itself is never mutated.
    fn effective_script(&self, definition: &ScriptStepDefinition, ctx: &ExecutionContext) -> String {
        if !self.config.overrides.cache_enabled {
            return definition.script.clone();
        }

        match self
            .overrides
            .script_override(&definition.step_id, &ctx.process_definition_id)
        {
            Some(replacement) if !replacement.is_empty() && replacement != definition.script => {
                debug!("Applying runtime script override");
                replacement
            }
            _ => definition.script.clone(),
        }
    }

    /// Build the evaluation request, resolving input bindings as needed
    ///
    /// Scoping precedence: explicit bindings, then full exclusion, then
    /// ambient inheritance.
    fn assemble_request(
        &self,
        definition: &ScriptStepDefinition,
        script: String,
        ctx: &ExecutionContext,
    ) -> Result<EvaluationRequest, EngineError> {
        let input_scope = if !definition.input_bindings.is_empty() {
            let mut bound = MapVariableScope::new();
            for binding in &definition.input_bindings {
                let value = self
                    .expressions
                    .resolve(&binding.source_expression, &ctx.variables)
                    .map_err(|err| EngineError::BindingResolution {
                        target: binding.target.clone(),
                        expression: binding.source_expression.clone(),
                        reason: err.to_string(),
                    })?;
                bound.set_variable(&binding.target, value);
            }
            InputScope::Bound(bound)
        } else if definition.exclude_ambient_variables {
            InputScope::Isolated
        } else {
            InputScope::Ambient
        };

        let language = if definition.language.is_empty() {
            self.config.execution.default_language.clone()
        } else {
            definition.language.clone()
        };

        Ok(EvaluationRequest::builder(script, language)
            .input_scope(input_scope)
            .store_script_variables(definition.store_script_variables)
            .trace_tag(trace_tags::ORIGIN_KEY, trace_tags::SCRIPT_STEP)
            .build())
    }

    /// Finish a fault-free evaluation: check for an unresolved legacy
    /// expression, bind the result variable, advance the graph
    async fn complete(
        &self,
        definition: &ScriptStepDefinition,
        request: &EvaluationRequest,
        produced: Option<Value>,
        ctx: &mut ExecutionContext,
    ) -> EngineResult<StepOutcome> {
        if request
            .language
            .eq_ignore_ascii_case(languages::EXPRESSION_LANGUAGE)
        {
            // An expression result equal to the script text means the
            // expression never resolved. Known false positive for scripts
            // that legitimately evaluate to their own literal text.
            if let Some(Value::String(text)) = &produced {
                if *text == request.script {
                    return Err(EngineError::UnresolvedExpression {
                        language: request.language.clone(),
                        script: request.script.clone(),
                        step_id: definition.step_id.clone(),
                        execution_id: ctx.execution_id,
                    });
                }
            }
        }

        if let Some(name) = &definition.result_variable {
            ctx.variables
                .set_variable(name, produced.clone().unwrap_or(Value::Null));
        }

        self.navigator.advance(ctx).await?;
        Ok(StepOutcome::Completed { result: produced })
    }

    /// Route an evaluator fault by its classification tag
    async fn classify_fault(
        &self,
        step_id: &str,
        fault: EvaluationFault,
        ctx: &ExecutionContext,
    ) -> EngineResult<StepOutcome> {
        warn!(
            step_id = step_id,
            fault_class = fault.fault_class(),
            "Exception while executing script step: {}",
            fault.message
        );

        match fault.cause {
            FaultCause::Domain { code } => {
                debug!(error_code = %code, "Propagating domain error to graph boundary");
                self.error_propagator.propagate(&code, ctx).await?;
                Ok(StepOutcome::DomainErrorPropagated { code })
            }
            FaultCause::Engine(inner) => Err(*inner),
            FaultCause::Unclassified => Err(EngineError::Evaluation(fault)),
        }
    }
}
