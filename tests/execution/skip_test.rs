//! Skip Decision Tests
//!
//! Drives the executor's skip gate end to end: an armed skip expression
//! bypasses evaluation and advances the graph once, a dormant one changes
//! nothing, and a non-boolean skip result fails the invocation before any
//! script runs.

use std::sync::Arc;

use serde_json::json;

use procflow_core::constants::variables;
use procflow_core::error::{EngineError, EngineResult};
use procflow_core::execution::{
    ExecutionContext, ScriptEngineRegistry, ScriptStepDefinition, ScriptStepExecutor,
    SkipExpressionEvaluator, StepOutcome,
};

use crate::common::mock_engine::{MockExpressionEvaluator, MockNavigator, MockScriptEvaluator};

fn create_executor(
    evaluator: &Arc<MockScriptEvaluator>,
    navigator: &Arc<MockNavigator>,
) -> ScriptStepExecutor {
    let registry = Arc::new(ScriptEngineRegistry::new());
    registry.register("rhai", evaluator.clone());
    ScriptStepExecutor::new(
        registry,
        Arc::new(MockExpressionEvaluator::new()),
        navigator.clone(),
    )
}

fn armed_context() -> ExecutionContext {
    ExecutionContext::new("order-process:1")
        .with_variable(variables::SKIP_EXPRESSIONS_ENABLED, json!(true))
}

#[tokio::test]
async fn test_armed_skip_expression_bypasses_evaluation() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(Some(json!(1))));
    let navigator = Arc::new(MockNavigator::new());
    let executor = create_executor(&evaluator, &navigator);

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
        .with_skip_expression("${already_calculated}")
        .with_result_variable("total");
    let mut ctx = armed_context().with_variable("already_calculated", json!(true));
    let before = ctx.variables.clone();

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(outcome, StepOutcome::Skipped);
    assert_eq!(navigator.advance_count(), 1);
    assert_eq!(evaluator.request_count(), 0);
    // Skipping leaves the variable scope untouched
    assert_eq!(ctx.variables, before);
}

#[tokio::test]
async fn test_skip_expression_dormant_without_ambient_flag() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let executor = create_executor(&evaluator, &navigator);

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
        .with_skip_expression("${already_calculated}");
    // The instance never armed skipping, so the expression is not consulted
    let mut ctx =
        ExecutionContext::new("order-process:1").with_variable("already_calculated", json!(true));

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(evaluator.request_count(), 1);
    assert_eq!(navigator.advance_count(), 1);
}

#[tokio::test]
async fn test_false_skip_expression_runs_the_step() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let executor = create_executor(&evaluator, &navigator);

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
        .with_skip_expression("${already_calculated}");
    let mut ctx = armed_context().with_variable("already_calculated", json!(false));

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(evaluator.request_count(), 1);
    assert_eq!(navigator.advance_count(), 1);
}

#[tokio::test]
async fn test_non_boolean_skip_result_fails_before_evaluation() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let executor = create_executor(&evaluator, &navigator);

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
        .with_skip_expression("${already_calculated}");
    let mut ctx = armed_context().with_variable("already_calculated", json!("yes"));

    let err = executor.execute(&definition, &mut ctx).await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::SkipExpressionNotBoolean { ref step_id, .. } if step_id == "calc_total"
    ));
    assert_eq!(evaluator.request_count(), 0);
    assert_eq!(navigator.advance_count(), 0);
}

#[tokio::test]
async fn test_step_without_skip_expression_always_runs() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let executor = create_executor(&evaluator, &navigator);

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai");
    let mut ctx = armed_context();

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(evaluator.request_count(), 1);
}

#[tokio::test]
async fn test_custom_skip_evaluator_replaces_the_default_gate() {
    struct AlwaysSkip;

    impl SkipExpressionEvaluator for AlwaysSkip {
        fn is_enabled(
            &self,
            _expression: Option<&str>,
            _step_id: &str,
            _ctx: &ExecutionContext,
        ) -> bool {
            true
        }

        fn should_skip(
            &self,
            _expression: Option<&str>,
            _step_id: &str,
            _ctx: &ExecutionContext,
        ) -> EngineResult<bool> {
            Ok(true)
        }
    }

    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let executor =
        create_executor(&evaluator, &navigator).with_skip_evaluator(Arc::new(AlwaysSkip));

    // No skip expression and no ambient flag; the custom gate decides alone
    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(outcome, StepOutcome::Skipped);
    assert_eq!(evaluator.request_count(), 0);
    assert_eq!(navigator.advance_count(), 1);
}
