//! The execution context behind `run()`.
//!
//! An [`Engine`] owns the verb registry, the lexicon, and the variable
//! table. Each [`run`](Engine::run) parses the whole command, then executes
//! it; any input-shaped failure comes back inside the [`RunOutcome`].

use std::sync::Arc;

use parlance_foundation::{CancelToken, Error, ErrorContext, Result, Value};
use parlance_parser::{Lexicon, Plugin, Registry, Sentence, SentenceParser, ValidationResult};

use crate::config::EngineConfig;
use crate::executor::SentenceExecutor;
use crate::variables::VariableTable;

/// What one `run()` produced.
///
/// When `validation` fails, `sentence` and `result` are `None` and `error`
/// holds the failure.
#[derive(Debug)]
pub struct RunOutcome {
    /// Whether the command parsed and ran.
    pub validation: ValidationResult,
    /// The dispatched sentence.
    pub sentence: Option<Sentence>,
    /// The last step's result.
    pub result: Option<Value>,
    /// The failure behind an invalid outcome.
    pub error: Option<Error>,
}

impl RunOutcome {
    fn succeeded(sentence: Sentence, result: Value) -> Self {
        Self {
            validation: ValidationResult::valid(),
            sentence: Some(sentence),
            result: Some(result),
            error: None,
        }
    }

    fn failed(error: Error) -> Self {
        Self {
            validation: ValidationResult::from_error(&error),
            sentence: None,
            result: None,
            error: Some(error),
        }
    }

    /// Returns true if the command parsed and every step ran.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    /// Why the command failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.validation.failure_reason()
    }

    /// The result, if the command succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the recorded failure.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Nil)),
        }
    }
}

/// One execution context: registry, lexicon, variables, and output.
///
/// Output follows the variables: unless they persist, each run starts with
/// no messages, so only the last run's output is ever held.
pub struct Engine {
    config: EngineConfig,
    registry: Registry,
    lexicon: Lexicon,
    variables: VariableTable,
    messages: Vec<String>,
}

impl Engine {
    /// Scans the plugins and creates an engine.
    ///
    /// # Errors
    ///
    /// Returns `NoVerbs` if no plugin registered a usable verb.
    pub fn new(config: EngineConfig, plugins: Vec<Arc<dyn Plugin>>) -> Result<Self> {
        let registry = Registry::scan(plugins)?;
        let lexicon = Lexicon::new(&registry);
        tracing::info!(
            verbs = registry.len(),
            base_dir = %config.base_dir.display(),
            "engine ready"
        );
        Ok(Self {
            config,
            registry,
            lexicon,
            variables: VariableTable::new(),
            messages: Vec::new(),
        })
    }

    /// Creates an engine with the standard verbs and default settings.
    ///
    /// # Errors
    ///
    /// Returns `NoVerbs` if the standard plugins failed to register.
    pub fn with_stdlib() -> Result<Self> {
        Self::new(EngineConfig::default(), parlance_stdlib::plugins())
    }

    /// Parses and runs a command.
    pub fn run(&mut self, command: &str) -> RunOutcome {
        self.run_with(command, &CancelToken::new())
    }

    /// Parses and runs a command, handing `cancel` to every action.
    pub fn run_with(&mut self, command: &str, cancel: &CancelToken) -> RunOutcome {
        if !self.config.persist_variables {
            self.variables.clear();
            self.messages.clear();
        }

        let parser = SentenceParser::new(&self.registry, &self.lexicon)
            .with_max_chain_len(self.config.max_chain_len);
        let sentence = match parser.parse(command) {
            Ok(sentence) => sentence,
            Err(err) => {
                tracing::debug!(error = %err, "command rejected");
                return RunOutcome::failed(err);
            }
        };

        let first_message = self.messages.len();
        let mut executor = SentenceExecutor::new(
            &mut self.variables,
            &self.config.base_dir,
            cancel,
            &mut self.messages,
        );
        let outcome = match executor.execute(&sentence) {
            Ok(result) => RunOutcome::succeeded(sentence, result),
            Err(err) => {
                let err = err.with_context(ErrorContext::new().with_sentence(command.trim()));
                tracing::debug!(error = %err, "command failed");
                RunOutcome::failed(err)
            }
        };

        if self.config.echo {
            for message in &self.messages[first_message..] {
                println!("{message}");
            }
        }
        outcome
    }

    /// Drains output produced by actions.
    ///
    /// With persistent variables output accumulates until drained.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// The variables of the last run, or of the session when they persist.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Removes every variable.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Adds a plugin and re-scans.
    ///
    /// # Errors
    ///
    /// See [`refresh`](Self::refresh).
    pub fn add_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<bool> {
        self.registry.add_plugin(plugin);
        self.refresh()
    }

    /// Re-scans the plugins. Returns true if the registered verbs changed.
    ///
    /// # Errors
    ///
    /// Returns `NoVerbs` if the re-scan found nothing.
    pub fn refresh(&mut self) -> Result<bool> {
        let changed = self.registry.refresh()?;
        self.lexicon.refresh(&self.registry);
        Ok(changed)
    }

    /// The verb registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Grammar help and use counts.
    #[must_use]
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("verbs", &self.registry.len())
            .field("variables", &self.variables.len())
            .finish_non_exhaustive()
    }
}
