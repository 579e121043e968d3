//! Integration tests for the parlance_parser crate.
//!
//! Tests for the sentence pipeline against the standard verbs:
//! - Grammar validation and failure reasons
//! - Structural dispatch between same-named verbs
//! - `THEN` chains and error context
//! - Lexicon usages and counts

mod chain_tests;
mod dispatch_tests;
mod lexicon_tests;
mod validation_tests;
