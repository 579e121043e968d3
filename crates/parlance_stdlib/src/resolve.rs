//! Text resolvers and value helpers shared by the standard verbs.

use parlance_foundation::{Error, ErrorKind, Handle, HandleKind, Result, Value};

/// Resolver: a file path.
#[must_use]
pub fn resolve_file(text: &str) -> Option<Value> {
    let path = text.trim();
    (!path.is_empty()).then(|| Value::Handle(Handle::file(path)))
}

/// Resolver: an address containing `@`.
#[must_use]
pub fn resolve_address(text: &str) -> Option<Value> {
    let address = text.trim();
    is_address(address).then(|| Value::Handle(Handle::address(address)))
}

/// Resolver: a codec name (`base64` or `hex`).
#[must_use]
pub fn resolve_codec(text: &str) -> Option<Value> {
    Codec::parse(text).map(|codec| Value::Handle(Handle::codec(codec.name())))
}

/// Resolver: a JSON document.
#[must_use]
pub fn resolve_json(text: &str) -> Option<Value> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .map(from_json)
}

/// Resolver: a number, `true`/`false`, or else text.
#[must_use]
pub fn resolve_scalar(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::Int(n));
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Some(Value::Float(n));
        }
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => Some(Value::text(text)),
    }
}

fn is_address(text: &str) -> bool {
    match text.split_once('@') {
        Some((user, host)) => {
            !user.is_empty() && !host.is_empty() && !text.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// A text codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    /// Standard base64 with padding.
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

impl Codec {
    /// Parses a codec name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "hex" => Some(Self::Hex),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }
}

/// Reads a locator of the given kind from a resolved value.
///
/// Text is accepted too, so a variable holding a path works as a file.
///
/// # Errors
///
/// Returns `ActionFailed` for handles of another kind and non-text values.
pub fn locator(verb: &str, value: &Value, kind: HandleKind) -> Result<String> {
    match value {
        Value::Handle(handle) if handle.kind == kind => Ok(handle.locator.clone()),
        Value::Text(text) => Ok(text.trim().to_string()),
        other => Err(Error::action_failed(
            verb,
            format!("expected a {kind:?} locator, got {}", other.type_name()).to_lowercase(),
        )),
    }
}

/// Converts parsed JSON into a value.
#[must_use]
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Nil),
        serde_json::Value::String(s) => Value::text(s),
        serde_json::Value::Array(items) => items.into_iter().map(from_json).collect(),
        serde_json::Value::Object(props) => {
            Value::object(props.into_iter().map(|(k, v)| (k, from_json(v))))
        }
    }
}

/// Renders a value as text for output or storage.
///
/// Text is written raw, lists one item per line, objects as JSON.
///
/// # Errors
///
/// Returns an internal error if JSON serialization fails.
pub fn render(value: &Value) -> Result<String> {
    match value {
        Value::Object(_) => serde_json::to_string_pretty(value)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string()))),
        other => Ok(other.to_string()),
    }
}
