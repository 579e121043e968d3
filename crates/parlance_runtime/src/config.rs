//! Engine configuration.

use std::path::PathBuf;

use parlance_parser::DEFAULT_MAX_CHAIN_LEN;

/// Settings for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory relative file paths are resolved against.
    pub base_dir: PathBuf,
    /// Print action output to stdout as it is produced.
    pub echo: bool,
    /// Maximum number of `THEN`-chained sentences per command.
    pub max_chain_len: usize,
    /// Keep variables and undrained output between runs instead of starting
    /// each run empty.
    pub persist_variables: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            echo: false,
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
            persist_variables: false,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for an interactive session: echo on, variables kept.
    #[must_use]
    pub fn interactive() -> Self {
        Self::default().with_echo(true).with_persistent_variables(true)
    }

    /// Sets the base directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Enables or disables echo.
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Sets the chain limit.
    #[must_use]
    pub const fn with_max_chain_len(mut self, max: usize) -> Self {
        self.max_chain_len = max;
        self
    }

    /// Keeps variables across runs.
    #[must_use]
    pub const fn with_persistent_variables(mut self, persist: bool) -> Self {
        self.persist_variables = persist;
        self
    }
}
