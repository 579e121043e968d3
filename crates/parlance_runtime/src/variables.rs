//! The variable table of one execution context.
//!
//! Names are stored case-insensitively. Lookups by token accept only the
//! exact shape `[name]`; `[ name ]` never resolves.

use std::collections::BTreeMap;

use parlance_foundation::{FromValue, Value};
use parlance_parser::word::is_variable_name;

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    name: String,
    value: Value,
}

/// Case-insensitive name to value map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableTable {
    entries: BTreeMap<String, Entry>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any value under the same name in any case.
    pub fn register(&mut self, name: impl AsRef<str>, value: Value) {
        let name = name.as_ref();
        tracing::trace!(name, kind = value.type_name(), "register variable");
        self.entries.insert(
            name.to_lowercase(),
            Entry {
                name: name.to_string(),
                value,
            },
        );
    }

    /// Looks up a bare name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&name.to_lowercase()).map(|e| &e.value)
    }

    /// Returns true if a value is stored under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Looks up a `[name]` token.
    ///
    /// Returns `None` for any other shape, including surrounding whitespace
    /// inside the brackets, and for names never registered.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&Value> {
        variable_name(token).and_then(|name| self.get(name))
    }

    /// Looks up a `[name]` token and converts the value.
    ///
    /// Returns `None` when the token does not resolve or the value has
    /// another type.
    #[must_use]
    pub fn resolve_as<T: FromValue>(&self, token: &str) -> Option<T> {
        self.resolve(token).and_then(T::from_value)
    }

    /// Stores each requested property of `result` as its own variable.
    ///
    /// Requested properties the result lacks are skipped. Returns how many
    /// variables were stored.
    pub fn destructure(&mut self, names: &[String], result: &Value) -> usize {
        let mut stored = 0;
        for name in names {
            match result.property(name) {
                Some(value) => {
                    self.register(name, value.clone());
                    stored += 1;
                }
                None => tracing::trace!(name = %name, "destructured property absent"),
            }
        }
        stored
    }

    /// Removes every variable.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variables in name order, with the name as last registered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.values().map(|e| (e.name.as_str(), &e.value))
    }
}

fn variable_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('[')?.strip_suffix(']')?;
    is_variable_name(name).then_some(name)
}
