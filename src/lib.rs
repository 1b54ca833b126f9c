#![allow(clippy::doc_markdown)] // Allow technical terms like YAML, Rhai in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Procflow Core
//!
//! Process-execution engine core: scripted step handling with pluggable
//! script evaluators.
//!
//! ## Overview
//!
//! Procflow Core executes the scripted steps of a process graph. A step
//! carries a script in some language; this crate decides whether to run it,
//! which script text actually runs, what variables it can see, where its
//! result lands, and how its failures are classified. Everything specific to
//! a scripting language or to the surrounding graph engine stays behind
//! traits.
//!
//! ## Architecture
//!
//! The crate implements a **seam-based executor** where the
//! [`execution::ScriptStepExecutor`] owns step semantics and delegates to
//! injected collaborators:
//!
//! - [`execution::ScriptEvaluator`] interprets one scripting language
//! - [`execution::ExpressionEvaluator`] resolves inline expressions against
//!   a variable scope
//! - [`execution::GraphNavigator`] advances the surrounding process graph
//! - [`execution::ErrorPropagator`] routes domain errors to graph-level
//!   error boundaries
//!
//! ## Key Features
//!
//! - **Skip expressions**: boolean expressions bypass evaluation when armed
//!   by an ambient opt-in flag
//! - **Runtime script overrides**: published replacements apply per
//!   invocation without mutating shared definitions
//! - **Variable scope control**: explicit input bindings or full ambient
//!   exclusion per step
//! - **Fault classification**: domain errors propagate to boundaries, engine
//!   faults and unclassified faults abort the invocation
//! - **Structured logging**: JSON output in production, pretty console
//!   output everywhere else
//!
//! ## Module Organization
//!
//! - [`execution`] - Step executor, evaluator seams, scopes, and overrides
//! - [`config`] - YAML-driven configuration with environment overrides
//! - [`error`] - Structured error handling
//! - [`constants`] - Language tags, ambient variable names, and limits
//! - [`logging`] - Structured logging initialization and helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procflow_core::config::EngineConfig;
//! use procflow_core::execution::{ExecutionContext, ScriptStepDefinition};
//! use serde_json::json;
//!
//! let config = EngineConfig::default();
//!
//! let definition = ScriptStepDefinition::new("calc_total", "total = net * 1.19", "rhai")
//!     .with_result_variable("total");
//!
//! let ctx = ExecutionContext::new("order-process:1").with_variable("net", json!(100.0));
//!
//! println!(
//!     "Step {} of execution {} (default language: {})",
//!     definition.step_id, ctx.execution_id, config.execution.default_language
//! );
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod execution;
pub mod logging;

pub use config::{
    ConfigManager, ConfigurationError, EngineConfig, ExecutionConfig, OverridesConfig,
    TelemetryConfig,
};
pub use constants::{languages, system, trace_tags, variables};
pub use error::{EngineError, EngineResult, EvaluationFault, FaultCause};
pub use execution::{
    ErrorPropagator, EvaluationRequest, ExecutionContext, ExpressionEvaluator, GraphNavigator,
    InputBinding, InputScope, MapVariableScope, ScriptEngineRegistry, ScriptEvaluator,
    ScriptStepDefinition, ScriptStepExecutor, SkipExpressionEvaluator, StepOutcome, VariableScope,
};
