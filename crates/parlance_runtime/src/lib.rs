//! Engine, executor, REPL, and CLI for Parlance.
//!
//! This crate provides:
//! - [`Engine`] - One execution context: registry, lexicon, variables; `run()`
//! - [`SentenceExecutor`] - Runs dispatched sentences and their `THEN` chains
//! - [`VariableTable`] - Case-insensitive variables with destructuring
//! - [`EngineConfig`] - Base directory, echo, chain limit, variable lifetime
//! - [`Repl`] - Interactive read-eval-print loop
//!
//! The `parlance` binary wraps the REPL with script and one-shot modes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod engine;
pub mod executor;
pub mod highlight;
pub mod repl;
pub mod variables;

pub use config::EngineConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use engine::{Engine, RunOutcome};
pub use executor::SentenceExecutor;
pub use highlight::ParlanceHighlighter;
pub use repl::{Repl, Reply};
pub use variables::VariableTable;
