//! Integration tests for tokenization.
//!
//! Tests for turning command text into tokens and token trees:
//! - Delimiting and bracket depth
//! - Terminators
//! - `THEN` segments
//! - Property tests over arbitrary input

mod token_tree_tests;
mod tokenize_tests;
