//! Syntax highlighting for the REPL.

use std::borrow::Cow;
use std::collections::HashSet;

use parlance_parser::{Keyword, Registry};

const RESET: &str = "\x1b[0m";
const VERB: &str = "\x1b[1;32m";
const PREPOSITION: &str = "\x1b[36m";
const THEN: &str = "\x1b[1;35m";
const QUALIFIER: &str = "\x1b[33m";
const VARIABLE: &str = "\x1b[34m";
const REFERENCE: &str = "\x1b[32m";
const NUMBER: &str = "\x1b[35m";
const TERMINATOR: &str = "\x1b[1m";

/// Verb names (with synonyms) and qualifiers known to a registry.
#[must_use]
pub fn vocabulary(registry: &Registry) -> (Vec<String>, Vec<String>) {
    let verbs = registry
        .verbs()
        .flat_map(|(_, v)| std::iter::once(v.name.clone()).chain(v.synonyms.iter().cloned()))
        .collect();
    let qualifiers = registry
        .qualifiers()
        .into_iter()
        .map(str::to_string)
        .collect();
    (verbs, qualifiers)
}

/// Highlighter for Parlance sentences.
///
/// Verbs are only coloured at the start of a sentence, the same place the
/// word factory recognises them.
#[derive(Debug, Default, Clone)]
pub struct ParlanceHighlighter {
    verbs: HashSet<String>,
    qualifiers: HashSet<String>,
}

impl ParlanceHighlighter {
    /// Creates a highlighter that knows no verbs or qualifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the known verbs and qualifiers.
    pub fn set_vocabulary<V, Q>(&mut self, verbs: V, qualifiers: Q)
    where
        V: IntoIterator<Item = String>,
        Q: IntoIterator<Item = String>,
    {
        self.verbs = verbs.into_iter().map(|v| v.to_ascii_uppercase()).collect();
        self.qualifiers = qualifiers
            .into_iter()
            .map(|q| q.to_ascii_uppercase())
            .collect();
    }

    /// Highlight a line of input.
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut sentence_start = true;

        while let Some(c) = chars.next() {
            match c {
                '[' | '{' => {
                    let (open, close, color) = if c == '[' {
                        ('[', ']', VARIABLE)
                    } else {
                        ('{', '}', REFERENCE)
                    };
                    result.push_str(color);
                    result.push(c);
                    let mut depth = 1usize;
                    while depth > 0 {
                        let Some(next) = chars.next() else { break };
                        if next == open {
                            depth += 1;
                        } else if next == close {
                            depth -= 1;
                        }
                        result.push(next);
                    }
                    result.push_str(RESET);
                    sentence_start = false;
                }

                '.' | '?' | '!' => {
                    result.push_str(TERMINATOR);
                    result.push(c);
                    result.push_str(RESET);
                }

                c if c.is_whitespace() => result.push(c),

                c => {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(next) = chars.next_if(|n| {
                        !n.is_whitespace() && !matches!(*n, '[' | '{' | '.' | '?' | '!')
                    }) {
                        word.push(next);
                    }

                    let upper = word.to_ascii_uppercase();
                    let color = match Keyword::parse(&word) {
                        Some(Keyword::Then) => THEN,
                        Some(_) => PREPOSITION,
                        None if sentence_start && self.verbs.contains(&upper) => VERB,
                        None if self.qualifiers.contains(&upper) => QUALIFIER,
                        None if word.parse::<f64>().is_ok() => NUMBER,
                        None => "",
                    };
                    sentence_start = color == THEN;

                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str(RESET);
                    }
                }
            }
        }

        Cow::Owned(result)
    }
}
