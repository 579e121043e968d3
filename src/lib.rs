//! Parlance - English-like command interpreter
//!
//! This crate re-exports all layers of the Parlance system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parlance_runtime    - Engine (run), executor, variables, REPL, CLI
//!          parlance_stdlib     - Standard verbs (SAY, GET, SAVE, DELETE, SET, ...)
//! Layer 2: parlance_parser     - Tokenizer, word chains, registry, dispatch, validation
//! Layer 1: parlance_foundation - Core types (Value, Role, Error, CancelToken)
//! ```

pub use parlance_foundation as foundation;
pub use parlance_parser as parser;
pub use parlance_runtime as runtime;
pub use parlance_stdlib as stdlib;
