//! Sentence parser for the Parlance command language.
//!
//! This crate turns input like `GET [text] FROM {notes.txt} THEN SAY [text].`
//! into dispatched sentences the runtime can execute.
//!
//! # Architecture
//!
//! ```text
//! "GET [x] FROM {a.txt} THEN SAY [x]."
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["GET", "[x]", "FROM", "{a.txt}", "THEN", "SAY", "[x]."]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKEN TREE    │  → terminator check, split at THEN into two segments
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  WORD FACTORY   │  → [Verb(GET), Variable(x), Keyword(FROM), Reference(a.txt)]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   VALIDATOR     │  → next-word contracts per word
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   DISPATCHER    │  → GET usage {What, From} chosen over GET usage {What, Using}
//! └─────────────────┘
//!          │
//!          ▼
//!       Sentence { root: GET, sub_sentences: [SAY] }
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Depth-aware splitting of raw input
//! - [`token_tree`] - Token sequences with sentinels and `THEN` segments
//! - [`word`] - Typed words and the index-linked word chain
//! - [`registry`] - Verb descriptors, plugins, and the capability registry
//! - [`lexicon`] - Cached per-verb grammar and usage counts
//! - [`factory`] - Token to word conversion
//! - [`validator`] - Grammar checks
//! - [`dispatch`] - Structural choice between same-named verbs
//! - [`sentence`] - Dispatched sentences and `THEN`-chains
//! - [`parser`] - Pipeline orchestration
//! - [`action`] - What verb actions receive

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod dispatch;
pub mod factory;
pub mod lexicon;
pub mod parser;
pub mod registry;
pub mod sentence;
pub mod token_tree;
pub mod tokenizer;
pub mod validator;
pub mod word;

// Re-export main types for convenience
pub use action::{ActionContext, Arguments};
pub use dispatch::{Dispatcher, RoleBinding, UsageMatch, VerbInstance, match_usage};
pub use factory::WordFactory;
pub use lexicon::{Lexicon, Usage};
pub use parser::{DEFAULT_MAX_CHAIN_LEN, SentenceParser};
pub use registry::{Plugin, Registry, RegistryBuilder, RoleSpec, VerbDescriptor, VerbId};
pub use sentence::Sentence;
pub use token_tree::{Position, TokenTree};
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use validator::{SentenceValidator, ValidationResult};
pub use word::{Keyword, Phrase, Word, WordChain};
