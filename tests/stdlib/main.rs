//! Integration tests for the parlance_stdlib crate.
//!
//! Tests for the standard verbs, run through an engine:
//! - Console verbs (SAY, SEND)
//! - File verbs (GET FROM, SAVE, DELETE)
//! - Data verbs (GET USING, SET, ENCODE, DECODE)

mod data_verbs_tests;
mod file_verbs_tests;

use parlance::runtime::{Engine, EngineConfig};
use tempfile::TempDir;

/// An engine whose relative paths land in a fresh temporary directory.
pub fn sandbox() -> (TempDir, Engine) {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::new().with_base_dir(dir.path());
    let engine = Engine::new(config, parlance::stdlib::plugins()).unwrap();
    (dir, engine)
}
