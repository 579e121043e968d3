//! Grammar checks over token trees and word chains.
//!
//! Purely structural: nothing here looks at files, addresses, or variable
//! contents.

use std::fmt;

use parlance_foundation::{Error, ErrorKind, Result};

use crate::lexicon::Lexicon;
use crate::registry::Registry;
use crate::token_tree::TokenTree;
use crate::word::{Keyword, Word, WordChain};

/// The outcome of validating a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    failure_reason: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            failure_reason: None,
        }
    }

    /// A failing result with a reason.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            failure_reason: Some(reason.into()),
        }
    }

    /// A failing result describing an error.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        match &err.context {
            Some(context) => Self::invalid(format!("{err} ({context})")),
            None => Self::invalid(err.to_string()),
        }
    }

    /// Returns true if the command passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Why the command failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure_reason {
            None => write!(f, "Valid"),
            Some(reason) => write!(f, "Invalid: {reason}"),
        }
    }
}

/// Walks token trees and word chains applying each word's next-word contract.
#[derive(Debug, Clone, Copy)]
pub struct SentenceValidator<'a> {
    registry: &'a Registry,
    lexicon: &'a Lexicon,
}

impl<'a> SentenceValidator<'a> {
    /// Creates a validator.
    #[must_use]
    pub const fn new(registry: &'a Registry, lexicon: &'a Lexicon) -> Self {
        Self { registry, lexicon }
    }

    /// Checks the whole command before it is split at `THEN`.
    ///
    /// # Errors
    ///
    /// `EmptySentence` for no tokens, `MissingTerminator` if the last token
    /// does not end with `.`, `?` or `!`.
    pub fn check_tree(&self, tree: &TokenTree) -> Result<()> {
        let last = tree.last().ok_or_else(|| Error::new(ErrorKind::EmptySentence))?;
        if !last.ends_sentence() {
            return Err(Error::new(ErrorKind::MissingTerminator));
        }
        Ok(())
    }

    /// Checks one sentence's word chain.
    ///
    /// # Errors
    ///
    /// `UnknownVerb` if the chain does not start with a verb; otherwise the
    /// first grammar violation found.
    pub fn check_chain(&self, chain: &WordChain) -> Result<()> {
        let head = chain.head().ok_or_else(|| Error::new(ErrorKind::EmptySentence))?;
        if chain.verb().is_none() {
            let first = chain.get(head).map(ToString::to_string).unwrap_or_default();
            return Err(Error::unknown_verb(first));
        }

        for (index, word) in chain.iter() {
            let next = chain.next(index).and_then(|n| chain.get(n));
            self.check_word(word, next)?;
        }
        Ok(())
    }

    /// Runs both checks on a single, unchained sentence.
    #[must_use]
    pub fn validate(&self, tree: &TokenTree, chain: &WordChain) -> ValidationResult {
        match self.check_tree(tree).and_then(|()| self.check_chain(chain)) {
            Ok(()) => ValidationResult::valid(),
            Err(err) => ValidationResult::from_error(&err),
        }
    }

    fn check_word(&self, word: &Word, next: Option<&Word>) -> Result<()> {
        match (word, next) {
            (Word::Verb(verb), Some(Word::Keyword(keyword))) if keyword.is_preposition() => {
                if self.lexicon.requires_direct_object(self.registry, &verb.name) {
                    return Err(Error::grammar(format!(
                        "{} needs a direct object before {keyword}",
                        verb.name
                    )));
                }
                Ok(())
            }
            (Word::Keyword(keyword), next) if keyword.is_preposition() => match next {
                Some(value) if value.is_value() => Ok(()),
                Some(other) => Err(Error::grammar(format!(
                    "{keyword} must be followed by a value, found {} '{other}'",
                    other.kind_name()
                ))),
                None => Err(Error::grammar(format!("{keyword} must be followed by a value"))),
            },
            (Word::Keyword(Keyword::Then), next) => match next {
                Some(Word::Verb(_)) => Ok(()),
                _ => Err(Error::grammar("THEN must be followed by a verb")),
            },
            (Word::Terminator(ch), Some(other)) => Err(Error::grammar(format!(
                "Nothing may follow the terminator '{ch}', found '{other}'"
            ))),
            (Word::Qualifier(first), Some(Word::Qualifier(second))) => Err(Error::grammar(
                format!("Qualifier {first} cannot be followed by another qualifier {second}"),
            )),
            (Word::Destructure(names), _) if names.is_empty() => Err(Error::grammar(
                "Destructuring pattern [{}] names no properties",
            )),
            _ => Ok(()),
        }
    }
}
