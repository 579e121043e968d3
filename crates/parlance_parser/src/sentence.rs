//! Dispatched sentences.

use std::fmt;

use crate::dispatch::VerbInstance;
use crate::word::WordChain;

/// A validated, dispatched sentence.
///
/// A `THEN`-chain is stored flat: the first sentence is the receiver and
/// every following one is in `sub_sentences`, in order.
#[derive(Clone, Debug)]
pub struct Sentence {
    root: VerbInstance,
    chain: WordChain,
    sub_sentences: Vec<Sentence>,
}

impl Sentence {
    /// Creates an unchained sentence.
    #[must_use]
    pub const fn new(root: VerbInstance, chain: WordChain) -> Self {
        Self {
            root,
            chain,
            sub_sentences: Vec::new(),
        }
    }

    /// The dispatched verb.
    #[must_use]
    pub const fn root(&self) -> &VerbInstance {
        &self.root
    }

    /// The word chain, with the verb bound.
    #[must_use]
    pub const fn chain(&self) -> &WordChain {
        &self.chain
    }

    /// Sentences chained after this one with `THEN`.
    #[must_use]
    pub fn sub_sentences(&self) -> &[Self] {
        &self.sub_sentences
    }

    /// Appends a chained sentence.
    pub fn push_sub_sentence(&mut self, sentence: Self) {
        self.sub_sentences.push(sentence);
    }

    /// Every step in execution order: this sentence, then its sub-sentences.
    pub fn steps(&self) -> impl Iterator<Item = &Self> {
        std::iter::once(self).chain(self.sub_sentences.iter())
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.sub_sentences.len()
    }

    /// Always false; a sentence has at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chain)?;
        for sub in &self.sub_sentences {
            write!(f, " THEN {}", sub.chain)?;
        }
        Ok(())
    }
}
