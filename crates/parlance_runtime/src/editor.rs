//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`]; [`RustylineEditor`] is the terminal
//! implementation and tests substitute a scripted one.

use std::borrow::Cow;

use parlance_foundation::{Error, ErrorKind, Result};
use parlance_parser::Keyword;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

use crate::highlight::ParlanceHighlighter;

/// REPL commands offered for completion.
pub const COMMANDS: &[&str] = &[":help", ":verbs", ":vars", ":clear", ":quit"];

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Sets the verbs and qualifiers used for completion and highlighting.
    fn set_vocabulary(&mut self, verbs: Vec<String>, qualifiers: Vec<String>);
}

/// Returns true once every `[` and `{` has been closed.
///
/// Stray closing brackets do not count against the input.
#[must_use]
pub fn brackets_balanced(input: &str) -> bool {
    let mut braces = 0usize;
    let mut brackets = 0usize;
    for c in input.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            _ => {}
        }
    }
    braces == 0 && brackets == 0
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct ParlanceHelper {
    #[rustyline(Completer)]
    completer: ParlanceCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: BracketValidator,
    highlighter: ParlanceHighlighter,
}

impl Highlighter for ParlanceHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes verbs, keywords, qualifiers, and REPL commands.
struct ParlanceCompleter {
    words: Vec<String>,
}

impl ParlanceCompleter {
    fn new() -> Self {
        Self {
            words: Self::vocabulary(Vec::new(), Vec::new()),
        }
    }

    fn vocabulary(verbs: Vec<String>, qualifiers: Vec<String>) -> Vec<String> {
        let keywords = [
            Keyword::From,
            Keyword::To,
            Keyword::Using,
            Keyword::With,
            Keyword::Then,
        ];
        let mut words = verbs;
        words.extend(keywords.iter().map(|k| k.as_str().to_string()));
        words.extend(qualifiers);
        words.extend(COMMANDS.iter().map(|c| (*c).to_string()));
        words.sort();
        words.dedup();
        words
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        let upper = word.to_ascii_uppercase();
        self.words
            .iter()
            .filter(|w| w.starts_with(&upper) || w.starts_with(word))
            .map(|w| {
                // Keep the user's case for sentence words.
                let replacement = if word.chars().any(char::is_lowercase) && !w.starts_with(':') {
                    w.to_lowercase()
                } else {
                    w.clone()
                };
                Pair {
                    display: w.clone(),
                    replacement,
                }
            })
            .collect()
    }
}

impl Completer for ParlanceCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || "[]{}".contains(c))
            .map_or(0, |i| i + 1);

        // Nothing to offer inside a slot.
        if !brackets_balanced(&line[..start]) {
            return Ok((start, Vec::new()));
        }
        Ok((start, self.candidates(&line[start..pos])))
    }
}

/// Keeps reading while a `[` or `{` is open.
#[derive(Default)]
struct BracketValidator;

impl Validator for BracketValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if brackets_balanced(ctx.input()) {
            Ok(ValidationResult::Valid(None))
        } else {
            Ok(ValidationResult::Incomplete)
        }
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ParlanceHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = ParlanceHelper {
            completer: ParlanceCompleter::new(),
            hinter: HistoryHinter::new(),
            validator: BracketValidator,
            highlighter: ParlanceHighlighter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_vocabulary(&mut self, verbs: Vec<String>, qualifiers: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper
                .highlighter
                .set_vocabulary(verbs.clone(), qualifiers.clone());
            helper.completer.words = ParlanceCompleter::vocabulary(verbs, qualifiers);
        }
    }
}
