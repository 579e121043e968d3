//! Integration tests for the parlance_runtime crate.
//!
//! Tests for running commands end to end:
//! - `run()` outcomes for valid and rejected commands
//! - Variable storage, lookup, and destructuring across a chain
//! - REPL evaluation and scripts

mod repl_tests;
mod run_tests;
mod variable_tests;
