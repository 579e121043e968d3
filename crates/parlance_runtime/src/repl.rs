//! The interactive REPL.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use parlance_foundation::{Error, Result, Value};

use crate::editor::{LineEditor, ReadResult, RustylineEditor, brackets_balanced};
use crate::engine::Engine;
use crate::highlight::vocabulary;

/// What one line of input produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// A sentence ran.
    Ran {
        /// Output emitted by its actions.
        output: Vec<String>,
        /// The last step's result.
        value: Value,
    },
    /// A REPL command produced text.
    Info(String),
    /// Nothing to show.
    Nothing,
    /// Leave the REPL.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The execution context sentences run in.
    engine: Engine,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(engine: Engine) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, engine))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, engine: Engine) -> Self {
        let (verbs, qualifiers) = vocabulary(engine.registry());
        editor.set_vocabulary(verbs, qualifiers);
        Self {
            editor,
            engine,
            show_banner: true,
            prompt: "» ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Reply::Quit) => return Ok(false),
            Ok(reply) => self.print_reply(&reply),
            Err(e) => self.print_error(&e),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if brackets_balanced(&input) {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    // Run what was typed; the engine reports the open bracket.
                    return Ok(Some(input));
                }
            }
        }
    }

    /// Evaluates one line: a `:command` or a sentence.
    ///
    /// # Errors
    ///
    /// Returns the failure of a sentence that did not parse or run, or of
    /// an unknown command.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Reply::Nothing);
        }
        if let Some(command) = trimmed.strip_prefix(':') {
            return self.command(command);
        }

        let outcome = self.engine.run(trimmed);
        let output = self.engine.take_messages();
        let value = outcome.into_result()?;
        Ok(Reply::Ran { output, value })
    }

    fn command(&mut self, command: &str) -> Result<Reply> {
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("q" | "quit" | "exit", _) => Ok(Reply::Quit),
            ("vars", _) => Ok(Reply::Info(self.describe_variables())),
            ("verbs", _) => Ok(Reply::Info(self.describe_verbs())),
            ("help", Some(verb)) => self.describe_verb(verb).map(Reply::Info),
            ("help", None) => Ok(Reply::Info(HELP.trim_end().to_string())),
            ("clear", _) => {
                self.engine.clear_variables();
                Ok(Reply::Info("Variables cleared.".to_string()))
            }
            (other, _) => Err(Error::grammar(format!(
                "Unknown command ':{other}' (try :help)"
            ))),
        }
    }

    fn describe_variables(&self) -> String {
        let vars = self.engine.variables();
        if vars.is_empty() {
            return "(no variables)".to_string();
        }
        vars.iter()
            .map(|(name, value)| format!("[{name}] = {}", one_line(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn describe_verbs(&self) -> String {
        self.engine
            .registry()
            .verbs()
            .map(|(_, verb)| {
                let mut line = format!("{:<36} {}", verb.usage(), verb.summary);
                if !verb.synonyms.is_empty() {
                    line.push_str(&format!(" (also {})", verb.synonyms.join(", ")));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn describe_verb(&self, verb: &str) -> Result<String> {
        let registry = self.engine.registry();
        let usages = self.engine.lexicon().usages(registry, verb);
        if usages.is_empty() {
            return Err(Error::unknown_verb(verb));
        }
        let mut lines: Vec<String> = usages
            .iter()
            .map(|u| format!("{:<36} {}", u.pattern, u.summary))
            .collect();
        let count = self.engine.lexicon().use_count(verb);
        if count > 0 {
            lines.push(format!("(used {count} times this session)"));
        }
        Ok(lines.join("\n"))
    }

    /// Runs every non-empty line of a script, stopping at the first failure.
    ///
    /// Lines starting with `#` are comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails.
    pub fn run_script(&mut self, path: &Path) -> Result<Value> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}: {e}", path.display())))?;

        let mut last = Value::Nil;
        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.eval(line)? {
                Reply::Ran { output, value } => {
                    self.print_output(&output);
                    last = value;
                }
                Reply::Quit => break,
                reply => self.print_reply(&reply),
            }
        }
        Ok(last)
    }

    fn print_output(&self, output: &[String]) {
        // An echoing engine has already printed it.
        if !self.engine.config().echo {
            for line in output {
                println!("{line}");
            }
        }
    }

    /// Prints a reply to stdout.
    fn print_reply(&self, reply: &Reply) {
        match reply {
            Reply::Ran { output, value } => {
                self.print_output(output);
                if output.is_empty() && !value.is_nil() {
                    println!("\x1b[1m{}\x1b[0m", one_line(value));
                }
            }
            Reply::Info(text) => println!("{text}"),
            Reply::Nothing | Reply::Quit => {}
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        match &error.context {
            Some(context) => eprintln!("\x1b[31mError: {error}\x1b[0m \x1b[2m({context})\x1b[0m"),
            None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mParlance\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type a sentence ending in '.', or :help. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

fn one_line(value: &Value) -> String {
    match value {
        Value::List(items) => format!(
            "[{}]",
            items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        ),
        other => other.to_string(),
    }
}

const HELP: &str = "\
Sentences start with a verb and end with '.', '?' or '!':
    SAY Hello World.
    GET [lines] FROM {notes.txt} THEN SAY [lines].
    GET [{name,age}] USING {\"name\": \"Ann\", \"age\": 7}.

Values:
    [name]     a variable; as the direct object it receives the result
    [{a,b}]    store properties a and b of the result as variables
    {text}     inline text, used as written

Commands:
    :verbs         list every verb
    :help VERB     show how a verb is used
    :vars          show variables
    :clear         forget all variables
    :quit          leave
";
