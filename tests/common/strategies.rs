use proptest::prelude::*;
use proptest::strategy::Just;

use procflow_core::execution::{InputBinding, MapVariableScope, ScriptStepDefinition};

/// Strategy for generating valid step identifiers
pub fn step_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,63}"
}

/// Strategy for generating variable names
pub fn variable_name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,31}"
}

/// Strategy for generating script bodies
pub fn script_body_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ =+*.]{1,80}"
}

/// Strategy for generating language tags, mixed case included
pub fn language_tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rhai".to_string()),
        Just("Rhai".to_string()),
        Just("lua".to_string()),
        Just("expr".to_string()),
    ]
}

/// Strategy for generating JSON variable values
pub fn json_value_strategy() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::json!(null)),
        any::<bool>().prop_map(|b| serde_json::json!(b)),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9 ]{0,32}".prop_map(|s| serde_json::json!(s)),
        Just(serde_json::json!({"nested": {"data": [1, 2, 3]}})),
    ]
}

/// Strategy for generating input binding lists with unique targets
pub fn input_bindings_strategy() -> impl Strategy<Value = Vec<InputBinding>> {
    prop::collection::btree_set(variable_name_strategy(), 0..6).prop_map(|targets| {
        targets
            .into_iter()
            .map(|target| {
                let source = format!("${{{target}_source}}");
                InputBinding::new(target, source)
            })
            .collect()
    })
}

/// Strategy for generating step definitions without bindings
pub fn definition_strategy() -> impl Strategy<Value = ScriptStepDefinition> {
    (
        step_id_strategy(),
        script_body_strategy(),
        language_tag_strategy(),
    )
        .prop_map(|(step_id, script, language)| ScriptStepDefinition::new(step_id, script, language))
}

/// Strategy for generating populated variable scopes
pub fn scope_strategy() -> impl Strategy<Value = MapVariableScope> {
    prop::collection::hash_map(variable_name_strategy(), json_value_strategy(), 0..8)
        .prop_map(MapVariableScope::from_map)
}
