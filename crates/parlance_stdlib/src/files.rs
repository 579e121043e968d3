//! File verbs: GET ... FROM, SAVE, and DELETE.
//!
//! Paths are resolved against the action context's base directory. Nothing
//! is checked before the action runs; a missing file fails the step that
//! touches it.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use parlance_foundation::{Error, HandleKind, Result, Role, Value};
use parlance_parser::{ActionContext, Arguments, Plugin, RegistryBuilder, RoleSpec, VerbDescriptor};

use crate::resolve::{from_json, locator, render, resolve_file};

/// How GET returns file contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReadMode {
    Lines,
    Text,
    Json,
}

impl ReadMode {
    fn from_qualifier(qualifier: Option<&str>) -> Self {
        match qualifier {
            Some(q) if q.eq_ignore_ascii_case("TEXT") => Self::Text,
            Some(q) if q.eq_ignore_ascii_case("JSON") => Self::Json,
            _ => Self::Lines,
        }
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::io(format!("cannot {action} '{}': {err}", path.display()))
}

/// Files: GET FROM - read a file as lines, text, or JSON
pub(crate) fn get_from(args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
    let file = locator("GET", args.require(Role::From, "GET")?, HandleKind::File)?;
    let path = ctx.resolve_path(&file);
    let contents = fs::read_to_string(&path).map_err(|e| io_error("read", &path, &e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "read file");

    match ReadMode::from_qualifier(args.qualifier()) {
        ReadMode::Lines => Ok(contents.lines().map(Value::text).collect()),
        ReadMode::Text => Ok(Value::text(contents)),
        ReadMode::Json => serde_json::from_str(&contents)
            .map(from_json)
            .map_err(|e| Error::action_failed("GET", format!("'{file}' is not JSON: {e}"))),
    }
}

/// Files: SAVE - write a value to a file, returning the path
pub(crate) fn save(args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
    let value = args.require(Role::What, "SAVE")?;
    let file = locator("SAVE", args.require(Role::To, "SAVE")?, HandleKind::File)?;
    let path = ctx.resolve_path(&file);

    let mut contents = render(value)?;
    if matches!(value, Value::List(_) | Value::Object(_)) {
        contents.push('\n');
    }
    fs::write(&path, &contents).map_err(|e| io_error("write", &path, &e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(Value::text(path.to_string_lossy()))
}

/// Files: DELETE - remove a file; false if it was already gone
pub(crate) fn delete(args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
    let file = locator("DELETE", args.require(Role::From, "DELETE")?, HandleKind::File)?;
    let path = ctx.resolve_path(&file);
    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "deleted file");
            Ok(Value::Bool(true))
        }
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(Value::Bool(false)),
        Err(e) => Err(io_error("delete", &path, &e)),
    }
}

/// GET FROM, SAVE, and DELETE.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileVerbs;

impl Plugin for FileVerbs {
    fn name(&self) -> &str {
        "files"
    }

    fn register(&self, builder: &mut RegistryBuilder) -> Result<()> {
        builder
            .verb(
                VerbDescriptor::new("GET", get_from)
                    .with_synonyms(["READ"])
                    .with_role(RoleSpec::new(Role::What).receiver())
                    .with_role(RoleSpec::new(Role::From).resolving(resolve_file))
                    .with_qualifiers(["LINES", "TEXT", "JSON"])
                    .with_summary("Read a file (LINES by default, TEXT, or JSON)"),
            )
            .verb(
                VerbDescriptor::new("SAVE", save)
                    .with_synonyms(["WRITE"])
                    .with_role(RoleSpec::new(Role::What))
                    .with_role(RoleSpec::new(Role::To).resolving(resolve_file))
                    .with_summary("Write a value to a file"),
            )
            .verb(
                VerbDescriptor::new("DELETE", delete)
                    .with_synonyms(["REMOVE"])
                    .with_role(
                        RoleSpec::new(Role::From)
                            .preposition_optional()
                            .resolving(resolve_file),
                    )
                    .with_summary("Delete a file"),
            )
            .qualifier("LINES")
            .qualifier("TEXT")
            .qualifier("JSON");
        Ok(())
    }
}
