//! # Engine Constants
//!
//! Core constants that define the operational boundaries of the procflow
//! execution engine: script language tags, evaluation trace tags, and
//! system-wide limits shared across modules.

/// Script language tags with engine-level meaning
pub mod languages {
    /// Tag of the legacy minimal expression language.
    ///
    /// Results produced under this tag get the unresolved-expression check:
    /// an evaluator that hands back the script text unchanged as a string
    /// never resolved the expression, and the invocation fails.
    pub const EXPRESSION_LANGUAGE: &str = "expr";

    /// Tag applied when a step definition carries an empty language tag.
    pub const DEFAULT_LANGUAGE: &str = "expr";
}

/// Trace tags attached to evaluation requests for downstream diagnostics
pub mod trace_tags {
    /// Tag key identifying what kind of engine element issued the request.
    pub const ORIGIN_KEY: &str = "type";

    /// Tag value for requests assembled by the scripted-step executor.
    pub const SCRIPT_STEP: &str = "script_step";
}

/// Well-known ambient variable names the engine reacts to
pub mod variables {
    /// Instance-level switch that arms skip expressions.
    ///
    /// Skip expressions stay dormant until the running instance sets this
    /// variable to boolean true, so deployed templates can carry skip
    /// conditions that only fire for explicitly opted-in instances.
    pub const SKIP_EXPRESSIONS_ENABLED: &str = "skip_expressions_enabled";
}

/// System-wide constants
pub mod system {
    /// Version compatibility marker
    pub const PROCFLOW_CORE_VERSION: &str = "0.1.0";

    /// Upper bound on input bindings accepted for a single step definition
    pub const MAX_INPUT_BINDINGS: usize = 256;
}
