//! Execution Module Tests
//!
//! Integration tests for the scripted step executor: outcome classification,
//! runtime script overrides, variable scoping, and skip decisions.

pub mod override_test;
pub mod skip_test;
