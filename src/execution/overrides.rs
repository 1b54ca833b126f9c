//! # Script Overrides
//!
//! Deployed process templates can have individual step scripts replaced at
//! runtime without redeploying the template. Providers answer the lookup;
//! [`InMemoryOverrideStore`] is the engine-shipped store, keyed by process
//! definition and step with lock-free concurrent reads.
//!
//! The executor consults a provider only when the engine-wide
//! `overrides.cache_enabled` flag is on, and a replacement takes effect for
//! a single invocation only; the canonical definition is never touched.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Lookup seam for runtime script replacements
pub trait OverrideProvider: Send + Sync {
    /// Replacement script text for a step of a deployed definition, if any
    fn script_override(&self, step_id: &str, process_definition_id: &str) -> Option<String>;
}

/// Provider that never yields a replacement
pub struct NoOverrides;

impl OverrideProvider for NoOverrides {
    fn script_override(&self, _step_id: &str, _process_definition_id: &str) -> Option<String> {
        None
    }
}

/// A published replacement and when it was published
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideEntry {
    pub script: String,
    pub published_at: DateTime<Utc>,
}

/// In-memory override store for the engine's dynamic-definition service
#[derive(Default)]
pub struct InMemoryOverrideStore {
    entries: DashMap<(String, String), OverrideEntry>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a replacement script for one step of one deployed definition
    pub fn put(
        &self,
        process_definition_id: impl Into<String>,
        step_id: impl Into<String>,
        script: impl Into<String>,
    ) {
        self.entries.insert(
            (process_definition_id.into(), step_id.into()),
            OverrideEntry {
                script: script.into(),
                published_at: Utc::now(),
            },
        );
    }

    /// Withdraw a published replacement
    pub fn remove(&self, process_definition_id: &str, step_id: &str) -> Option<OverrideEntry> {
        self.entries
            .remove(&(process_definition_id.to_string(), step_id.to_string()))
            .map(|(_, entry)| entry)
    }

    /// Drop every published replacement
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of published replacements
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OverrideProvider for InMemoryOverrideStore {
    fn script_override(&self, step_id: &str, process_definition_id: &str) -> Option<String> {
        self.entries
            .get(&(process_definition_id.to_string(), step_id.to_string()))
            .map(|entry| entry.script.clone())
    }
}
