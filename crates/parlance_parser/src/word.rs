//! Typed words and the word chain.
//!
//! A [`WordChain`] is an arena of words linked by index in both directions.
//! Links are only ever created by appending, so `next(a) == b` always
//! implies `prev(b) == a`.

use std::fmt;

use parlance_foundation::Role;

use crate::registry::VerbId;

/// A reserved keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Introduces the From role.
    From,
    /// Introduces the To role.
    To,
    /// Introduces the Using role.
    Using,
    /// Introduces the With role.
    With,
    /// Chains the next sentence.
    Then,
}

impl Keyword {
    /// Parses a keyword, ignoring ASCII case.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("THEN") {
            return Some(Self::Then);
        }
        Role::from_preposition(word).and_then(Self::for_role)
    }

    /// The preposition keyword for a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::What => None,
            Role::From => Some(Self::From),
            Role::To => Some(Self::To),
            Role::Using => Some(Self::Using),
            Role::With => Some(Self::With),
        }
    }

    /// The role this keyword introduces (`None` for THEN).
    #[must_use]
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::From => Some(Role::From),
            Self::To => Some(Role::To),
            Self::Using => Some(Role::Using),
            Self::With => Some(Role::With),
            Self::Then => None,
        }
    }

    /// Returns true for FROM/TO/USING/WITH.
    #[must_use]
    pub const fn is_preposition(self) -> bool {
        !matches!(self, Self::Then)
    }

    /// Canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::From => "FROM",
            Self::To => "TO",
            Self::Using => "USING",
            Self::With => "WITH",
            Self::Then => "THEN",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb as written, plus the implementation dispatch chose for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbWord {
    /// The verb as written (may be a synonym).
    pub name: String,
    /// The implementation selected by dispatch, once known.
    pub bound: Option<VerbId>,
}

/// A typed word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Word {
    /// A sentence-initial verb.
    Verb(VerbWord),
    /// FROM/TO/USING/WITH/THEN.
    Keyword(Keyword),
    /// Bare text.
    Literal(String),
    /// `[name]`; holds the text between the brackets as written.
    Variable(String),
    /// `[{a,b}]`; holds the requested property names.
    Destructure(Vec<String>),
    /// `{payload}`; holds the payload with one brace layer removed.
    Reference(String),
    /// A registered type-hint noun such as `LINES`.
    Qualifier(String),
    /// `.`, `?` or `!`.
    Terminator(char),
}

impl Word {
    /// Returns true for words that can fill a role.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Literal(_) | Self::Variable(_) | Self::Destructure(_) | Self::Reference(_)
        )
    }

    /// Returns the keyword if this is one.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self {
            Self::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns true for a FROM/TO/USING/WITH keyword.
    #[must_use]
    pub const fn is_preposition(&self) -> bool {
        matches!(self, Self::Keyword(k) if k.is_preposition())
    }

    /// Short description of the word's kind, for messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Verb(_) => "verb",
            Self::Keyword(_) => "keyword",
            Self::Literal(_) => "literal",
            Self::Variable(_) => "variable",
            Self::Destructure(_) => "destructuring pattern",
            Self::Reference(_) => "reference",
            Self::Qualifier(_) => "qualifier",
            Self::Terminator(_) => "terminator",
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verb(v) => write!(f, "{}", v.name),
            Self::Keyword(k) => write!(f, "{k}"),
            Self::Literal(s) | Self::Qualifier(s) => write!(f, "{s}"),
            Self::Variable(name) => write!(f, "[{name}]"),
            Self::Destructure(names) => write!(f, "[{{{}}}]", names.join(",")),
            Self::Reference(payload) => write!(f, "{{{payload}}}"),
            Self::Terminator(c) => write!(f, "{c}"),
        }
    }
}

/// A role value as it appears in the sentence.
///
/// Consecutive literals form one phrase (`SAY Hello World.`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phrase {
    /// One or more literal words joined by single spaces.
    Literal(String),
    /// `[name]`.
    Variable(String),
    /// `[{a,b}]`.
    Destructure(Vec<String>),
    /// `{payload}`.
    Reference(String),
}

impl Phrase {
    /// The phrase as written, used for value validation.
    #[must_use]
    pub fn surface(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Variable(name) => format!("[{name}]"),
            Self::Destructure(names) => format!("[{{{}}}]", names.join(",")),
            Self::Reference(payload) => format!("{{{payload}}}"),
        }
    }

    /// Returns true for a plain `[name]`.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns true for a `[name]` or `[{a,b}]` that can receive a result.
    ///
    /// Every name must be well formed; `[ y ]` could never be read back.
    #[must_use]
    pub fn is_slot(&self) -> bool {
        match self {
            Self::Variable(name) => is_variable_name(name),
            Self::Destructure(names) => names.iter().all(|n| is_variable_name(n)),
            Self::Literal(_) | Self::Reference(_) => false,
        }
    }
}

/// Returns true if `name` can be stored and read back as `[name]`.
///
/// Names are non-empty, have no surrounding whitespace, and contain no
/// brackets or braces.
#[must_use]
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains(['[', ']', '{', '}'])
}

/// Index of a word in a [`WordChain`].
pub type WordIndex = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Link {
    word: Word,
    prev: Option<WordIndex>,
    next: Option<WordIndex>,
}

/// An arena of words linked forward and backward by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordChain {
    links: Vec<Link>,
}

impl WordChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a word and links it after the current tail.
    pub fn push(&mut self, word: Word) -> WordIndex {
        let index = self.links.len();
        let prev = index.checked_sub(1);
        if let Some(p) = prev {
            self.links[p].next = Some(index);
        }
        self.links.push(Link {
            word,
            prev,
            next: None,
        });
        index
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the chain has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The first word's index.
    #[must_use]
    pub fn head(&self) -> Option<WordIndex> {
        if self.links.is_empty() { None } else { Some(0) }
    }

    /// The last word's index.
    #[must_use]
    pub fn tail(&self) -> Option<WordIndex> {
        self.links.len().checked_sub(1)
    }

    /// The word at an index.
    #[must_use]
    pub fn get(&self, index: WordIndex) -> Option<&Word> {
        self.links.get(index).map(|l| &l.word)
    }

    /// The index following `index`.
    #[must_use]
    pub fn next(&self, index: WordIndex) -> Option<WordIndex> {
        self.links.get(index).and_then(|l| l.next)
    }

    /// The index preceding `index`.
    #[must_use]
    pub fn prev(&self, index: WordIndex) -> Option<WordIndex> {
        self.links.get(index).and_then(|l| l.prev)
    }

    /// Iterates words in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (WordIndex, &Word)> {
        let mut cursor = self.head();
        std::iter::from_fn(move || {
            let index = cursor?;
            cursor = self.next(index);
            Some((index, &self.links[index].word))
        })
    }

    /// The sentence-initial verb, if the chain starts with one.
    #[must_use]
    pub fn verb(&self) -> Option<&VerbWord> {
        match self.get(self.head()?) {
            Some(Word::Verb(v)) => Some(v),
            _ => None,
        }
    }

    /// Records the implementation chosen for the verb at `index`.
    ///
    /// Returns false if that word is not a verb.
    pub fn bind_verb(&mut self, index: WordIndex, verb: VerbId) -> bool {
        match self.links.get_mut(index).map(|l| &mut l.word) {
            Some(Word::Verb(v)) => {
                v.bound = Some(verb);
                true
            }
            _ => false,
        }
    }

    /// Finds the first occurrence of a keyword.
    #[must_use]
    pub fn find_keyword(&self, keyword: Keyword) -> Option<WordIndex> {
        self.iter()
            .find(|(_, w)| w.as_keyword() == Some(keyword))
            .map(|(i, _)| i)
    }

    /// Reads the value phrase starting at `index`.
    ///
    /// Returns the phrase and the index of its last word, or `None` if the
    /// word at `index` cannot fill a role.
    #[must_use]
    pub fn phrase_at(&self, index: WordIndex) -> Option<(Phrase, WordIndex)> {
        match self.get(index)? {
            Word::Variable(name) => Some((Phrase::Variable(name.clone()), index)),
            Word::Destructure(names) => Some((Phrase::Destructure(names.clone()), index)),
            Word::Reference(payload) => Some((Phrase::Reference(payload.clone()), index)),
            Word::Literal(first) => {
                let mut text = first.clone();
                let mut last = index;
                while let Some(Word::Literal(more)) = self.next(last).and_then(|n| self.get(n)) {
                    text.push(' ');
                    text.push_str(more);
                    last = self.next(last).unwrap_or(last);
                }
                Some((Phrase::Literal(text), last))
            }
            _ => None,
        }
    }
}

impl fmt::Display for WordChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, word)) in self.iter().enumerate() {
            if i > 0 && !matches!(word, Word::Terminator(_)) {
                write!(f, " ")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
