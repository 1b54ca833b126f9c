//! # Script Engine Registry
//!
//! Maps script language tags to registered evaluators. Tags are
//! case-insensitive, so a definition modeled with `Rhai` resolves the
//! evaluator registered under `rhai`. Registration and resolution are safe
//! from concurrent executions.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::EngineError;

use super::evaluator::ScriptEvaluator;

/// Registry of script evaluators keyed by lower-cased language tag
#[derive(Default)]
pub struct ScriptEngineRegistry {
    evaluators: DashMap<String, Arc<dyn ScriptEvaluator>>,
}

impl ScriptEngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator for a language tag, replacing any previous one
    pub fn register(&self, language: impl Into<String>, evaluator: Arc<dyn ScriptEvaluator>) {
        let tag = language.into().to_lowercase();
        debug!(language = %tag, "Registering script evaluator");
        self.evaluators.insert(tag, evaluator);
    }

    /// Resolve the evaluator for a language tag
    pub fn resolve(&self, language: &str) -> Result<Arc<dyn ScriptEvaluator>, EngineError> {
        self.evaluators
            .get(&language.to_lowercase())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::EvaluatorNotFound {
                language: language.to_string(),
            })
    }

    /// Tags with a registered evaluator, in no particular order
    pub fn registered_languages(&self) -> Vec<String> {
        self.evaluators
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of registered evaluators
    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}
