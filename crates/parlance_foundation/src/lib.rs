//! Core values, roles, and errors for Parlance.
//!
//! This crate provides:
//! - [`Value`] - The closed value variant passed between sentences and verbs
//! - [`Handle`] - Typed locators (files, addresses, codecs)
//! - [`Role`] and [`RoleSet`] - Grammatical slots a verb can fill
//! - [`Error`] - Rich error types with context
//! - [`CancelToken`] - Opaque cancellation/deadline token handed to verb actions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod error;
pub mod role;
pub mod value;

pub use cancel::CancelToken;
pub use error::{Error, ErrorContext, ErrorKind};
pub use role::{Role, RoleSet};
pub use value::{FromValue, Handle, HandleKind, Value};

/// Result type alias using the Parlance error type.
pub type Result<T> = std::result::Result<T, Error>;
