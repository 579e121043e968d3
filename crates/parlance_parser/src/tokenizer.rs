//! Input tokenization.
//!
//! Splits raw command text on whitespace, except inside `{...}` or `[...]`,
//! where whitespace is kept verbatim. Brace and bracket depths are tracked
//! independently. There is no quote handling; `"` is an ordinary character.

/// Characters that end a sentence.
pub const TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Returns true for `.`, `?` and `!`.
#[must_use]
pub fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

/// Returns true for the characters that separate tokens at depth zero.
#[must_use]
pub const fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

/// The shape of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bare word: verb, keyword, qualifier, or literal text.
    Regular,
    /// `[name]` or `[{a,b}]`.
    Variable,
    /// `{payload}`.
    Reference,
    /// A lone `.`, `?` or `!`.
    Terminator,
}

/// A token from command input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
    kind: TokenKind,
}

impl Token {
    /// Creates a token, classifying it by shape.
    ///
    /// A single trailing terminator is ignored for classification, so
    /// `[x].` is a Variable token that also ends the sentence.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = classify(&value);
        Self { value, kind }
    }

    /// The token text exactly as it appeared.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The token's shape.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Splits off a trailing terminator, if any.
    ///
    /// A lone terminator yields an empty body.
    #[must_use]
    pub fn split_terminator(&self) -> (&str, Option<char>) {
        match self.value.chars().last() {
            Some(ch) if is_terminator(ch) => {
                (&self.value[..self.value.len() - ch.len_utf8()], Some(ch))
            }
            _ => (&self.value, None),
        }
    }

    /// Returns true if the token ends with `.`, `?` or `!`.
    #[must_use]
    pub fn ends_sentence(&self) -> bool {
        self.split_terminator().1.is_some()
    }

    /// Case-insensitive comparison against a keyword.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.value.eq_ignore_ascii_case(word)
    }
}

fn classify(value: &str) -> TokenKind {
    let body = match value.chars().last() {
        Some(ch) if is_terminator(ch) => &value[..value.len() - ch.len_utf8()],
        _ => value,
    };

    if body.is_empty() {
        return if value.is_empty() {
            TokenKind::Regular
        } else {
            TokenKind::Terminator
        };
    }
    if body.len() >= 2 && body.starts_with('[') && body.ends_with(']') {
        TokenKind::Variable
    } else if body.len() >= 2 && body.starts_with('{') && body.ends_with('}') {
        TokenKind::Reference
    } else {
        TokenKind::Regular
    }
}

/// Tokenizes command input.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes a raw input string into tokens.
    ///
    /// - Whitespace outside brackets separates tokens; runs collapse
    /// - Whitespace inside `{}` or `[]` is kept as part of the token
    /// - A closing bracket with nothing open is ordinary content
    /// - An unclosed bracket absorbs the rest of the input
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut braces = 0usize;
        let mut brackets = 0usize;

        for ch in input.chars() {
            match ch {
                '{' => {
                    braces += 1;
                    current.push(ch);
                }
                '}' => {
                    braces = braces.saturating_sub(1);
                    current.push(ch);
                }
                '[' => {
                    brackets += 1;
                    current.push(ch);
                }
                ']' => {
                    brackets = brackets.saturating_sub(1);
                    current.push(ch);
                }
                c if is_delimiter(c) && braces == 0 && brackets == 0 => {
                    if !current.is_empty() {
                        tokens.push(Token::new(std::mem::take(&mut current)));
                    }
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            tokens.push(Token::new(current));
        }

        tracing::trace!(count = tokens.len(), "tokenized input");
        tokens
    }
}
