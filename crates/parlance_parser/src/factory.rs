//! Token to word conversion.

use crate::registry::Registry;
use crate::token_tree::{Position, TokenTree};
use crate::tokenizer::{Token, TokenKind};
use crate::word::{Keyword, VerbWord, Word, WordChain};

/// Builds word chains from token trees.
#[derive(Debug, Clone, Copy)]
pub struct WordFactory<'r> {
    registry: &'r Registry,
}

impl<'r> WordFactory<'r> {
    /// Creates a factory that recognises the registry's verbs and qualifiers.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Converts one sentence's tokens into a word chain.
    ///
    /// Regular tokens are tried as a verb (first position only), then a
    /// keyword, then a qualifier (only between the verb and its first
    /// value, and only one the verb accepts), and otherwise become literals. A terminator attached to a token becomes
    /// its own word.
    #[must_use]
    pub fn build(&self, tree: &TokenTree) -> WordChain {
        let mut chain = WordChain::new();
        let mut pos = tree.next(Position::Root);
        while let Some(token) = tree.get(pos) {
            self.push_token(&mut chain, token);
            pos = tree.next(pos);
        }
        tracing::trace!(words = chain.len(), "built word chain");
        chain
    }

    fn push_token(&self, chain: &mut WordChain, token: &Token) {
        let (body, terminator) = token.split_terminator();
        if !body.is_empty() {
            let word = match token.kind() {
                TokenKind::Variable => variable_word(body),
                TokenKind::Reference => Word::Reference(strip_one(body).to_string()),
                TokenKind::Regular | TokenKind::Terminator => self.regular_word(chain, body),
            };
            chain.push(word);
        }
        if let Some(ch) = terminator {
            chain.push(Word::Terminator(ch));
        }
    }

    fn regular_word(&self, chain: &WordChain, body: &str) -> Word {
        if chain.is_empty() && self.registry.is_verb(body) {
            return Word::Verb(VerbWord {
                name: body.to_ascii_uppercase(),
                bound: None,
            });
        }
        if let Some(keyword) = Keyword::parse(body) {
            return Word::Keyword(keyword);
        }
        let after_verb = matches!(
            chain.tail().and_then(|t| chain.get(t)),
            Some(Word::Verb(_) | Word::Qualifier(_))
        );
        if after_verb && self.verb_takes_qualifier(chain, body) {
            return Word::Qualifier(body.to_ascii_uppercase());
        }
        Word::Literal(body.to_string())
    }

    // A registered qualifier is only a qualifier for a verb some usage of
    // which accepts it; for any other verb it is literal text.
    fn verb_takes_qualifier(&self, chain: &WordChain, body: &str) -> bool {
        let Some(verb) = chain.verb() else {
            return false;
        };
        self.registry.is_qualifier(body)
            && self
                .registry
                .candidates(&verb.name)
                .iter()
                .any(|id| self.registry.verb(*id).accepts_qualifier(body))
    }
}

/// Removes exactly one outer bracket pair.
fn strip_one(body: &str) -> &str {
    body.get(1..body.len() - 1).unwrap_or_default()
}

fn variable_word(body: &str) -> Word {
    let inner = strip_one(body);
    if inner.len() >= 2 && inner.starts_with('{') && inner.ends_with('}') {
        let names = strip_one(inner)
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Word::Destructure(names)
    } else {
        Word::Variable(inner.to_string())
    }
}
