//! Runtime Script Override Tests
//!
//! Checks when a published replacement script actually runs in place of the
//! modeled one: the engine-wide cache flag gates the lookup entirely, blank
//! and identical replacements are ignored, and the shared definition is
//! never mutated by an applied override.

use std::sync::Arc;

use serde_json::json;

use procflow_core::config::EngineConfig;
use procflow_core::execution::{
    ExecutionContext, InMemoryOverrideStore, ScriptEngineRegistry, ScriptStepDefinition,
    ScriptStepExecutor, VariableScope,
};

use crate::common::mock_engine::{
    CountingOverrideProvider, MockExpressionEvaluator, MockNavigator, MockScriptEvaluator,
};

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

fn overrides_enabled_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.overrides.cache_enabled = true;
    config
}

#[tokio::test]
async fn test_lookup_is_skipped_when_cache_disabled() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let provider = Arc::new(CountingOverrideProvider::with_replacement("replacement"));
    // Default configuration leaves the override cache disabled
    let executor = create_executor(&evaluator, &navigator).with_override_provider(provider.clone());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(provider.lookup_count(), 0);
    assert_eq!(evaluator.last_request().unwrap().script, "original");
}

#[tokio::test]
async fn test_different_replacement_applies_when_enabled() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let provider = Arc::new(CountingOverrideProvider::with_replacement("replacement"));
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(provider.clone())
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(provider.lookup_count(), 1);
    assert_eq!(evaluator.last_request().unwrap().script, "replacement");
}

#[tokio::test]
async fn test_blank_replacement_is_ignored() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let provider = Arc::new(CountingOverrideProvider::with_replacement(""));
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(provider)
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(evaluator.last_request().unwrap().script, "original");
}

#[tokio::test]
async fn test_identical_replacement_is_ignored() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let provider = Arc::new(CountingOverrideProvider::with_replacement("original"));
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(provider.clone())
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(provider.lookup_count(), 1);
    assert_eq!(evaluator.last_request().unwrap().script, "original");
}

#[tokio::test]
async fn test_missing_replacement_keeps_modeled_script() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let provider = Arc::new(CountingOverrideProvider::empty());
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(provider.clone())
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    assert_eq!(provider.lookup_count(), 1);
    assert_eq!(evaluator.last_request().unwrap().script, "original");
}

#[tokio::test]
async fn test_override_never_mutates_the_definition() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let store = Arc::new(InMemoryOverrideStore::new());
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(store.clone())
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let pristine = definition.clone();
    let mut ctx = ExecutionContext::new("order-process:1");

    // First invocation runs the published replacement
    store.put("order-process:1", "calc_total", "replacement");
    executor.execute(&definition, &mut ctx).await.unwrap();
    assert_eq!(evaluator.last_request().unwrap().script, "replacement");
    assert_eq!(definition, pristine);

    // After withdrawal the modeled script runs again
    store.remove("order-process:1", "calc_total");
    executor.execute(&definition, &mut ctx).await.unwrap();
    assert_eq!(evaluator.last_request().unwrap().script, "original");
    assert_eq!(definition, pristine);

    assert_eq!(navigator.advance_count(), 2);
    assert_eq!(evaluator.request_count(), 2);
}

#[tokio::test]
async fn test_replacement_is_scoped_to_the_deployed_definition() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(None));
    let navigator = Arc::new(MockNavigator::new());
    let store = Arc::new(InMemoryOverrideStore::new());
    store.put("other-process:9", "calc_total", "replacement");
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(store)
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "original", "rhai");
    let mut ctx = ExecutionContext::new("order-process:1");

    executor.execute(&definition, &mut ctx).await.unwrap();

    // A replacement published for a different definition does not apply
    assert_eq!(evaluator.last_request().unwrap().script, "original");
}

#[tokio::test]
async fn test_override_applies_with_result_binding_intact() {
    let evaluator = Arc::new(MockScriptEvaluator::returning(Some(json!(5))));
    let navigator = Arc::new(MockNavigator::new());
    let store = Arc::new(InMemoryOverrideStore::new());
    store.put("order-process:1", "calc_total", "total = 5");
    let executor = create_executor(&evaluator, &navigator)
        .with_override_provider(store)
        .with_config(overrides_enabled_config());

    let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
        .with_result_variable("total");
    let mut ctx = ExecutionContext::new("order-process:1");

    let outcome = executor.execute(&definition, &mut ctx).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(evaluator.last_request().unwrap().script, "total = 5");
    assert_eq!(ctx.variables.get_variable("total"), Some(json!(5)));
}
