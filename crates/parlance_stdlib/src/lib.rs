//! Standard verbs for the Parlance command language.
//!
//! This crate provides built-in verbs organized by plugin:
//! - [`ConsoleVerbs`] - SAY (PRINT, ECHO) and SEND
//! - [`FileVerbs`] - GET ... FROM (LINES, TEXT, JSON), SAVE (WRITE), DELETE (REMOVE)
//! - [`DataVerbs`] - GET ... USING, SET (LET), ENCODE, DECODE
//!
//! Each plugin registers its verbs into a [`parlance_parser::Registry`]
//! through the [`Plugin`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod console;
mod data;
mod files;
pub mod resolve;

use std::sync::Arc;

use parlance_parser::Plugin;

pub use console::ConsoleVerbs;
pub use data::DataVerbs;
pub use files::FileVerbs;

/// Every standard plugin, in registration order.
#[must_use]
pub fn plugins() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(ConsoleVerbs),
        Arc::new(FileVerbs),
        Arc::new(DataVerbs),
    ]
}
