//! Main parser pipeline.
//!
//! Orchestrates the flow from raw input to a dispatched [`Sentence`]:
//! tokenize, check the whole command, split at `THEN`, then build, check,
//! and dispatch each segment. Every segment is parsed before anything runs.

use parlance_foundation::{Error, ErrorContext, ErrorKind, Result};

use crate::dispatch::Dispatcher;
use crate::factory::WordFactory;
use crate::lexicon::Lexicon;
use crate::registry::Registry;
use crate::sentence::Sentence;
use crate::token_tree::TokenTree;
use crate::validator::SentenceValidator;

/// Default limit on `THEN`-chained sentences per command.
pub const DEFAULT_MAX_CHAIN_LEN: usize = 64;

/// Parses commands into dispatched sentences.
#[derive(Debug, Clone, Copy)]
pub struct SentenceParser<'a> {
    registry: &'a Registry,
    lexicon: &'a Lexicon,
    max_chain_len: usize,
}

impl<'a> SentenceParser<'a> {
    /// Creates a parser.
    #[must_use]
    pub const fn new(registry: &'a Registry, lexicon: &'a Lexicon) -> Self {
        Self {
            registry,
            lexicon,
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
        }
    }

    /// Sets the limit on chained sentences.
    #[must_use]
    pub const fn with_max_chain_len(mut self, max: usize) -> Self {
        self.max_chain_len = max;
        self
    }

    /// Parses a command.
    ///
    /// # Errors
    ///
    /// Returns the first validation or dispatch failure, with the command
    /// text and failing step attached as context.
    pub fn parse(&self, input: &str) -> Result<Sentence> {
        let tree = TokenTree::parse(input);
        let context = ErrorContext::new().with_sentence(tree.to_string());
        self.parse_tree(&tree).map_err(|err| err.with_context(context))
    }

    fn parse_tree(&self, tree: &TokenTree) -> Result<Sentence> {
        let validator = SentenceValidator::new(self.registry, self.lexicon);
        validator.check_tree(tree)?;

        let segments = tree.segments();
        if segments.len() > self.max_chain_len {
            return Err(Error::grammar(format!(
                "Too many chained sentences: {} (limit {})",
                segments.len(),
                self.max_chain_len
            )));
        }

        let factory = WordFactory::new(self.registry);
        let dispatcher = Dispatcher::new(self.registry);
        let mut steps = Vec::with_capacity(segments.len());

        for (i, segment) in segments.iter().enumerate() {
            let step = ErrorContext::new().with_segment(i);
            if segment.is_empty() {
                let message = if i == 0 {
                    "THEN must follow a sentence"
                } else {
                    "THEN must be followed by a sentence"
                };
                return Err(Error::grammar(message).with_context(step));
            }

            let mut chain = factory.build(segment);
            validator
                .check_chain(&chain)
                .map_err(|err| err.with_context(step.clone()))?;
            let root = dispatcher
                .dispatch(&mut chain)
                .map_err(|err| err.with_context(step.clone()))?;

            self.lexicon.record_use(root.name());
            tracing::debug!(segment = i, verb = %root.name(), "parsed sentence");
            steps.push(Sentence::new(root, chain));
        }

        let mut steps = steps.into_iter();
        let mut sentence = steps
            .next()
            .ok_or_else(|| Error::new(ErrorKind::EmptySentence))?;
        for sub in steps {
            sentence.push_sub_sentence(sub);
        }
        Ok(sentence)
    }
}
