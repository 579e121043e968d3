//! Structural dispatch.
//!
//! Several descriptors can answer to the same verb word. The dispatcher
//! reads the sentence's shape (qualifier, direct object, which prepositions
//! are present, and the surface form of each value) and picks the first
//! candidate that fits, most specific first.

use std::fmt;
use std::sync::Arc;

use parlance_foundation::{Error, ErrorContext, Result, Role, RoleSet, Value};

use crate::action::{ActionContext, Arguments};
use crate::registry::{Registry, RoleSpec, VerbDescriptor, VerbId};
use crate::word::{Keyword, Phrase, Word, WordChain, WordIndex};

/// A role value located in the word chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleBinding {
    /// The role filled.
    pub role: Role,
    /// The value as written.
    pub phrase: Phrase,
    /// First word of the phrase.
    pub start: WordIndex,
    /// Last word of the phrase.
    pub end: WordIndex,
}

/// The result of matching one descriptor against a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageMatch {
    /// Role values in sentence order.
    pub bindings: Vec<RoleBinding>,
    /// The qualifier, uppercased.
    pub qualifier: Option<String>,
}

/// Matches a descriptor against a chain's structure.
///
/// # Errors
///
/// Returns the reason the descriptor does not fit.
pub fn match_usage(
    descriptor: &VerbDescriptor,
    chain: &WordChain,
) -> std::result::Result<UsageMatch, String> {
    let verb = match chain.head() {
        Some(head) if matches!(chain.get(head), Some(Word::Verb(_))) => head,
        _ => return Err("the sentence does not start with a verb".to_string()),
    };
    let name = &descriptor.name;
    let mut found = UsageMatch::default();
    let mut cursor = chain.next(verb);

    if let Some(index) = cursor {
        if let Some(Word::Qualifier(q)) = chain.get(index) {
            if !descriptor.accepts_qualifier(q) {
                return Err(format!("{name} does not accept {q}"));
            }
            found.qualifier = Some(q.clone());
            cursor = chain.next(index);
        }
    }

    let mut direct = None;
    if let Some(index) = cursor {
        if let Some((phrase, end)) = chain.phrase_at(index) {
            direct = Some((phrase, index, end));
            cursor = chain.next(end);
        }
    }

    let mut seen = RoleSet::new();
    while let Some(index) = cursor {
        let word = chain.get(index).ok_or_else(|| "broken word chain".to_string())?;
        match word {
            Word::Terminator(_) => break,
            Word::Keyword(keyword) if keyword.is_preposition() => {
                let role = keyword.role().ok_or_else(|| format!("{keyword} has no role"))?;
                if descriptor.role(role).is_none() {
                    return Err(format!("{name} does not take {keyword}"));
                }
                if !seen.insert(role) {
                    return Err(format!("{keyword} appears more than once"));
                }
                let start = chain
                    .next(index)
                    .ok_or_else(|| format!("{keyword} needs a value"))?;
                let (phrase, end) = chain
                    .phrase_at(start)
                    .ok_or_else(|| format!("{keyword} needs a value"))?;
                found.bindings.push(RoleBinding {
                    role,
                    phrase,
                    start,
                    end,
                });
                cursor = chain.next(end);
            }
            other => {
                return Err(format!("unexpected {} '{other}'", other.kind_name()));
            }
        }
    }

    if let Some((phrase, start, end)) = direct {
        let role = direct_object_role(descriptor, seen)
            .ok_or_else(|| format!("{name} takes no direct object"))?;
        seen.insert(role);
        found.bindings.insert(
            0,
            RoleBinding {
                role,
                phrase,
                start,
                end,
            },
        );
    }

    for binding in &found.bindings {
        if !descriptor.validate(binding.role, &binding.phrase) {
            return Err(format!(
                "{} is not a valid {} value for {name}",
                binding.phrase.surface(),
                binding.role
            ));
        }
    }

    if let Some(missing) = descriptor.required_roles().iter().find(|r| !seen.contains(*r)) {
        return Err(match Keyword::for_role(missing) {
            Some(keyword) => format!("{name} needs {keyword} <value>"),
            None => format!("{name} needs a direct object"),
        });
    }

    Ok(found)
}

// A bare value after the verb fills What, or else the role whose
// preposition may be omitted.
fn direct_object_role(descriptor: &VerbDescriptor, seen: RoleSet) -> Option<Role> {
    if descriptor.role(Role::What).is_some() {
        return Some(Role::What);
    }
    descriptor
        .roles
        .iter()
        .find(|spec| spec.optional_preposition && !seen.contains(spec.role))
        .map(|spec| spec.role)
}

/// A descriptor chosen for a sentence, with its role values located.
#[derive(Clone)]
pub struct VerbInstance {
    id: VerbId,
    descriptor: Arc<VerbDescriptor>,
    usage: UsageMatch,
}

impl VerbInstance {
    /// The registry id of the chosen descriptor.
    #[must_use]
    pub const fn id(&self) -> VerbId {
        self.id
    }

    /// The chosen descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &VerbDescriptor {
        &self.descriptor
    }

    /// Canonical verb name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Role values in sentence order.
    #[must_use]
    pub fn bindings(&self) -> &[RoleBinding] {
        &self.usage.bindings
    }

    /// The value bound to a role.
    #[must_use]
    pub fn binding(&self, role: Role) -> Option<&RoleBinding> {
        self.usage.bindings.iter().find(|b| b.role == role)
    }

    /// The qualifier, if one was written.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.usage.qualifier.as_deref()
    }

    /// The direct object, when it receives the action's result.
    #[must_use]
    pub fn receiver(&self) -> Option<&RoleBinding> {
        let spec = self.descriptor.role(Role::What)?;
        if spec.receiver {
            self.binding(Role::What)
        } else {
            None
        }
    }

    /// Resolves every input role into arguments.
    ///
    /// `resolve` is called for each binding except a receiver and returns
    /// the value for it.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub fn bind<F>(&self, mut resolve: F) -> Result<Arguments>
    where
        F: FnMut(&RoleBinding, &RoleSpec) -> Result<Value>,
    {
        let mut args = Arguments::new().with_qualifier(self.usage.qualifier.clone());
        for binding in &self.usage.bindings {
            let Some(spec) = self.descriptor.role(binding.role) else {
                continue;
            };
            if spec.receiver {
                continue;
            }
            args.insert(binding.role, resolve(binding, spec)?);
        }
        Ok(args)
    }

    /// Runs the bound action.
    ///
    /// # Errors
    ///
    /// Returns the action's failure, tagged with the verb name.
    pub fn invoke(&self, args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
        self.descriptor
            .act(args, ctx)
            .map_err(|err| err.with_context(ErrorContext::new().with_verb(self.name())))
    }
}

impl fmt::Debug for VerbInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbInstance")
            .field("id", &self.id)
            .field("verb", &self.descriptor.name)
            .field("usage", &self.usage)
            .finish()
    }
}

/// Chooses among same-named descriptors.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher over a registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Candidates for a verb word, most specific first.
    ///
    /// Ties keep registration order.
    #[must_use]
    pub fn ranked(&self, verb: &str) -> Vec<VerbId> {
        let mut ids = self.registry.candidates(verb).to_vec();
        ids.sort_by_key(|id| std::cmp::Reverse(self.registry.verb(*id).arity()));
        ids
    }

    /// Picks the descriptor for a chain and binds it into the verb word.
    ///
    /// # Errors
    ///
    /// Returns `NoMatchingUsage` if no candidate fits, or `UnknownVerb` if
    /// the chain does not start with a known verb.
    pub fn dispatch(&self, chain: &mut WordChain) -> Result<VerbInstance> {
        let (head, written) = match chain.head().zip(chain.verb()) {
            Some((head, verb)) => (head, verb.name.clone()),
            None => {
                let first = chain
                    .iter()
                    .next()
                    .map(|(_, w)| w.to_string())
                    .unwrap_or_default();
                return Err(Error::unknown_verb(first));
            }
        };

        let mut reasons: Vec<String> = Vec::new();
        for id in self.ranked(&written) {
            let descriptor = self.registry.verb(id);
            match match_usage(descriptor, chain) {
                Ok(usage) => {
                    tracing::debug!(
                        verb = %written,
                        id = id.0,
                        roles = %descriptor.declared_roles(),
                        "dispatched"
                    );
                    chain.bind_verb(head, id);
                    return Ok(VerbInstance {
                        id,
                        descriptor: Arc::clone(descriptor),
                        usage,
                    });
                }
                Err(reason) => {
                    tracing::trace!(verb = %written, id = id.0, %reason, "candidate rejected");
                    if !reasons.contains(&reason) {
                        reasons.push(reason);
                    }
                }
            }
        }

        if reasons.is_empty() {
            return Err(Error::unknown_verb(written));
        }
        Err(Error::no_matching_usage(written, reasons.join("; ")))
    }
}
