//! What a verb action receives when it runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parlance_foundation::{CancelToken, Error, Result, Role, Value};

/// Resolved role values for one verb invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<Role, Value>,
    qualifier: Option<String>,
}

impl Arguments {
    /// Creates empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Binds a role value.
    pub fn insert(&mut self, role: Role, value: Value) {
        self.values.insert(role, value);
    }

    /// The value bound to a role.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&Value> {
        self.values.get(&role)
    }

    /// The value bound to a role, or an error naming the verb.
    ///
    /// # Errors
    ///
    /// Returns `ActionFailed` if the role has no value.
    pub fn require(&self, role: Role, verb: &str) -> Result<&Value> {
        self.get(role)
            .ok_or_else(|| Error::action_failed(verb, format!("missing {role} value")))
    }

    /// The qualifier word, uppercased, if one was given.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Returns true if a role has a value.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.values.contains_key(&role)
    }

    /// Iterates bound roles in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &Value)> {
        self.values.iter().map(|(r, v)| (*r, v))
    }
}

/// Execution environment handed to every verb action.
///
/// Owned by the executor for the duration of one sentence.
#[derive(Debug)]
pub struct ActionContext<'a> {
    cancel: &'a CancelToken,
    base_dir: &'a Path,
    messages: &'a mut Vec<String>,
}

impl<'a> ActionContext<'a> {
    /// Creates a context.
    pub fn new(cancel: &'a CancelToken, base_dir: &'a Path, messages: &'a mut Vec<String>) -> Self {
        Self {
            cancel,
            base_dir,
            messages,
        }
    }

    /// The caller's cancellation token. The interpreter never inspects it.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancelToken {
        self.cancel
    }

    /// Directory relative paths are resolved against.
    #[must_use]
    pub const fn base_dir(&self) -> &Path {
        self.base_dir
    }

    /// Resolves a locator against the base directory.
    #[must_use]
    pub fn resolve_path(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Emits a line of user-visible output.
    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Output emitted so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        self.messages
    }
}
