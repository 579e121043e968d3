//! Token sequences bounded by ROOT/TERMINAL sentinels.
//!
//! A [`TokenTree`] lets the validator and word factory walk tokens without
//! special-casing the ends, and splits a chained command at each `THEN`.

use std::fmt;
use std::ops::Range;

use crate::tokenizer::{Token, Tokenizer};

/// The keyword that chains sentences.
pub const THEN: &str = "THEN";

/// A position in a [`TokenTree`], including the two sentinels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Before the first token.
    Root,
    /// A real token, by zero-based index.
    Token(usize),
    /// After the last token.
    Terminal,
}

/// An ordered token sequence with sentinel bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenTree {
    tokens: Vec<Token>,
    segments: Vec<Range<usize>>,
}

impl TokenTree {
    /// Wraps tokens and computes the `THEN` segments.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let segments = split_segments(&tokens);
        Self { tokens, segments }
    }

    /// Tokenizes and wraps input text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::new(Tokenizer::tokenize(input))
    }

    /// Number of real tokens (sentinels excluded).
    #[must_use]
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no real tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The real tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token at a position; `None` for sentinels.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Token> {
        match pos {
            Position::Token(i) => self.tokens.get(i),
            Position::Root | Position::Terminal => None,
        }
    }

    /// The position after `pos`. Stays at TERMINAL.
    #[must_use]
    pub fn next(&self, pos: Position) -> Position {
        match pos {
            Position::Root if self.tokens.is_empty() => Position::Terminal,
            Position::Root => Position::Token(0),
            Position::Token(i) if i + 1 < self.tokens.len() => Position::Token(i + 1),
            Position::Token(_) | Position::Terminal => Position::Terminal,
        }
    }

    /// The position before `pos`. Stays at ROOT.
    #[must_use]
    pub fn prev(&self, pos: Position) -> Position {
        match pos {
            Position::Terminal if self.tokens.is_empty() => Position::Root,
            Position::Terminal => Position::Token(self.tokens.len() - 1),
            Position::Token(0) | Position::Root => Position::Root,
            Position::Token(i) => Position::Token(i - 1),
        }
    }

    /// The first real token, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.get(self.next(Position::Root))
    }

    /// The last real token, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Token> {
        self.get(self.prev(Position::Terminal))
    }

    /// Returns true if the tokens contain at least one `THEN`.
    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.segments.len() > 1
    }

    /// Number of `THEN`-separated segments. An empty tree has one empty segment.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The `THEN`-separated segments, in order, each as its own tree.
    ///
    /// The `THEN` tokens themselves are dropped. Adjacent or trailing
    /// `THEN`s produce empty segments.
    #[must_use]
    pub fn segments(&self) -> Vec<Self> {
        self.segments
            .iter()
            .map(|range| Self::new(self.tokens[range.clone()].to_vec()))
            .collect()
    }
}

fn split_segments(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_word(THEN) {
            segments.push(start..i);
            start = i + 1;
        }
    }
    segments.push(start..tokens.len());
    segments
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token.value())?;
        }
        Ok(())
    }
}
