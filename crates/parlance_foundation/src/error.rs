//! Error types for the Parlance system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::role::Role;

/// The main error type for Parlance operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, keeping any fields already recorded.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    /// Creates an unknown verb error.
    #[must_use]
    pub fn unknown_verb(found: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownVerb(found.into()))
    }

    /// Creates a grammar rule violation.
    #[must_use]
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GrammarViolation(message.into()))
    }

    /// Creates a dispatch failure for a verb with no structurally matching usage.
    #[must_use]
    pub fn no_matching_usage(verb: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoMatchingUsage {
            verb: verb.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unresolved variable error.
    #[must_use]
    pub fn unresolved_variable(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedVariable(name.into()))
    }

    /// Creates an error for a value that cannot be converted for a role.
    #[must_use]
    pub fn unresolvable(role: Role, text: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unresolvable {
            role,
            text: text.into(),
        })
    }

    /// Creates an action failure.
    #[must_use]
    pub fn action_failed(verb: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionFailed {
            verb: verb.into(),
            message: message.into(),
        })
    }

    /// Creates an I/O failure with a description of what was attempted.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Returns true if this error reflects host misconfiguration rather than bad input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The input held no tokens.
    #[error("Empty sentence")]
    EmptySentence,

    /// The last token does not end with `.`, `?` or `!`.
    #[error("Sentence must end with a terminator ('.', '?' or '!')")]
    MissingTerminator,

    /// The sentence does not start with a known verb.
    #[error("Sentence must start with a known verb, found '{0}'")]
    UnknownVerb(String),

    /// A word was followed by something its grammar does not allow.
    #[error("{0}")]
    GrammarViolation(String),

    /// No implementation of the verb structurally matches the sentence.
    #[error("No usage of {verb} matches this sentence: {reason}")]
    NoMatchingUsage {
        /// The verb as written.
        verb: String,
        /// Why the candidates were rejected.
        reason: String,
    },

    /// A `[name]` value was read before anything was stored under it.
    #[error("Unresolved variable [{0}]")]
    UnresolvedVariable(String),

    /// A role value could not be converted to what the verb expects.
    #[error("Cannot interpret '{text}' as the {role} value")]
    Unresolvable {
        /// The role being filled.
        role: Role,
        /// The text that failed to convert.
        text: String,
    },

    /// A verb action reported a failure.
    #[error("{verb} failed: {message}")]
    ActionFailed {
        /// The verb whose action failed.
        verb: String,
        /// The failure message from the action.
        message: String,
    },

    /// An I/O operation inside an action failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The registry scan found nothing to dispatch to.
    #[error("no verbs were registered")]
    NoVerbs,

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns true for kinds that indicate host misconfiguration.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::NoVerbs | Self::Internal(_))
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command text being run.
    pub sentence: Option<String>,
    /// Zero-based index of the `THEN` segment.
    pub segment: Option<usize>,
    /// The verb being dispatched or executed.
    pub verb: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sentence text.
    #[must_use]
    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.sentence = Some(sentence.into());
        self
    }

    /// Sets the segment index.
    #[must_use]
    pub fn with_segment(mut self, segment: usize) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Sets the verb name.
    #[must_use]
    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            sentence: self.sentence.or(other.sentence),
            segment: self.segment.or(other.segment),
            verb: self.verb.or(other.verb),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(verb) = &self.verb {
            write!(f, "in {verb}")?;
            first = false;
        }
        if let Some(segment) = self.segment {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "at step {}", segment + 1)?;
            first = false;
        }
        if let Some(sentence) = &self.sentence {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "of \"{sentence}\"")?;
        }
        Ok(())
    }
}
