//! # Execution Engine
//!
//! Scripted step execution for process instances, with pluggable evaluators.
//!
//! ## Architecture
//!
//! The execution engine follows a **seam-based architecture** where:
//! - **The executor owns step semantics**: skip decisions, override lookup,
//!   request assembly, result binding, and outcome classification
//! - **Evaluators own the languages**: each registered [`ScriptEvaluator`]
//!   interprets one scripting language behind an async trait
//! - **The enclosing engine owns the graph**: traversal and error boundaries
//!   stay behind [`GraphNavigator`] and [`ErrorPropagator`]
//!
//! ## Core Components
//!
//! - **ScriptStepExecutor**: Runs one scripted step end to end against an
//!   execution context
//! - **ScriptEngineRegistry**: Case-insensitive language-to-evaluator lookup
//! - **ExecutionContext**: Identity and ambient variables of one execution
//! - **ScriptStepDefinition**: Immutable modeled step shared across instances
//! - **ExpressionSkipEvaluator**: Ambient-flag-gated skip expression handling
//! - **InMemoryOverrideStore**: Runtime script replacements keyed by process
//!   definition and step
//!
//! ## Variable Scoping
//!
//! Scripts see the ambient scope by default. A definition narrows that with
//! explicit input bindings (fresh container, only bound names visible) or
//! cuts it off entirely with the exclusion flag. Bindings take precedence
//! over the flag.

pub mod context;
pub mod evaluator;
pub mod expression;
pub mod graph;
pub mod overrides;
pub mod registry;
pub mod scope;
pub mod script_step;
pub mod skip;
pub mod types;

// Re-export core types and components for easy access
pub use context::ExecutionContext;
pub use evaluator::ScriptEvaluator;
pub use expression::ExpressionEvaluator;
pub use graph::{ErrorPropagator, GraphNavigator, UnhandledErrorPropagator};
pub use overrides::{InMemoryOverrideStore, NoOverrides, OverrideEntry, OverrideProvider};
pub use registry::ScriptEngineRegistry;
pub use scope::{MapVariableScope, VariableScope};
pub use script_step::ScriptStepExecutor;
pub use skip::{ExpressionSkipEvaluator, SkipExpressionEvaluator};
pub use types::{
    EvaluationRequest, EvaluationRequestBuilder, InputBinding, InputScope, ScriptStepDefinition,
    StepOutcome,
};
