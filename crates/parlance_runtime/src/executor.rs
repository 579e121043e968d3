//! Runs dispatched sentences.
//!
//! Steps run strictly in order against one [`VariableTable`]. The first
//! failure stops the chain; earlier side effects stay in place.

use std::path::Path;

use parlance_foundation::{CancelToken, Error, ErrorContext, Result, Role, Value};
use parlance_parser::{ActionContext, Phrase, RoleBinding, RoleSpec, Sentence, VerbInstance};

use crate::variables::VariableTable;

/// Executes sentences against a variable table.
#[derive(Debug)]
pub struct SentenceExecutor<'a> {
    variables: &'a mut VariableTable,
    base_dir: &'a Path,
    cancel: &'a CancelToken,
    messages: &'a mut Vec<String>,
}

impl<'a> SentenceExecutor<'a> {
    /// Creates an executor.
    pub fn new(
        variables: &'a mut VariableTable,
        base_dir: &'a Path,
        cancel: &'a CancelToken,
        messages: &'a mut Vec<String>,
    ) -> Self {
        Self {
            variables,
            base_dir,
            cancel,
            messages,
        }
    }

    /// Runs a sentence and its `THEN` chain, returning the last result.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or action failure, tagged with the
    /// step it happened in. Later steps do not run.
    pub fn execute(&mut self, sentence: &Sentence) -> Result<Value> {
        let mut last = Value::Nil;
        for (i, step) in sentence.steps().enumerate() {
            tracing::trace!(segment = i, verb = %step.root().name(), "executing sentence");
            last = self
                .execute_step(step.root())
                .map_err(|err| err.with_context(ErrorContext::new().with_segment(i)))?;
        }
        Ok(last)
    }

    fn execute_step(&mut self, root: &VerbInstance) -> Result<Value> {
        let variables = &*self.variables;
        let args = root
            .bind(|binding, spec| resolve_binding(variables, binding, spec))
            .map_err(|err| err.with_context(ErrorContext::new().with_verb(root.name())))?;

        let mut ctx = ActionContext::new(self.cancel, self.base_dir, self.messages);
        let result = root.invoke(&args, &mut ctx)?;
        self.store(root, &result);
        Ok(result)
    }

    // A slot in the direct-object position receives the result.
    fn store(&mut self, root: &VerbInstance, result: &Value) {
        let Some(binding) = root.binding(Role::What) else {
            return;
        };
        match &binding.phrase {
            Phrase::Variable(name) => self.variables.register(name, result.clone()),
            Phrase::Destructure(names) => {
                let stored = self.variables.destructure(names, result);
                tracing::debug!(requested = names.len(), stored, "destructured result");
            }
            Phrase::Literal(_) | Phrase::Reference(_) => {}
        }
    }
}

/// Resolves one role value for the action.
///
/// Literals go through the role's resolver, variables through the table.
/// A reference is evaluated fresh each time: a `[name]` payload reads the
/// variable, anything else (including a JSON array such as `["a", 1]`) goes
/// through the resolver as text.
///
/// # Errors
///
/// Returns `UnresolvedVariable` for a variable never stored, or
/// `Unresolvable` when the role's resolver rejects the text.
pub fn resolve_binding(
    variables: &VariableTable,
    binding: &RoleBinding,
    spec: &RoleSpec,
) -> Result<Value> {
    match &binding.phrase {
        Phrase::Literal(text) => resolve_text(spec, text),
        Phrase::Variable(name) => lookup(variables, name),
        Phrase::Reference(payload) => {
            match payload.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
                Some(name) if is_plain_name(name) => lookup(variables, name),
                _ => resolve_text(spec, payload),
            }
        }
        Phrase::Destructure(names) => Err(Error::grammar(format!(
            "Destructuring pattern [{{{}}}] can only receive a result",
            names.join(",")
        ))),
    }
}

// A letter or `_`, then letters, digits, `_`, `-` or `.`.
fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn resolve_text(spec: &RoleSpec, text: &str) -> Result<Value> {
    (spec.resolve)(text).ok_or_else(|| Error::unresolvable(spec.role, text))
}

fn lookup(variables: &VariableTable, name: &str) -> Result<Value> {
    variables
        .resolve(&format!("[{name}]"))
        .cloned()
        .ok_or_else(|| Error::unresolved_variable(name))
}
