//! Verb capability registry.
//!
//! Plugins register [`VerbDescriptor`]s and qualifier nouns into a
//! [`RegistryBuilder`]; the [`Registry`] indexes them by name, synonym, and
//! role signature. Several descriptors may share a name; dispatch picks
//! between them by sentence structure.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parlance_foundation::{Error, ErrorKind, Result, Role, RoleSet, Value};

use crate::action::{ActionContext, Arguments};
use crate::word::{Phrase, WordChain};

/// Decides whether a phrase's surface form is acceptable for a role.
pub type AcceptFn = fn(&Phrase) -> bool;

/// Converts literal text into the value a role expects.
pub type ResolveFn = fn(&str) -> Option<Value>;

/// Performs a verb's action.
pub type ActFn = fn(&Arguments, &mut ActionContext<'_>) -> Result<Value>;

/// Accepts any phrase.
#[must_use]
pub fn accept_any(_: &Phrase) -> bool {
    true
}

/// Accepts `[name]` and `[{a,b}]` only.
#[must_use]
pub fn accept_slot(phrase: &Phrase) -> bool {
    phrase.is_slot()
}

/// Accepts anything except a destructuring pattern.
#[must_use]
pub fn accept_input(phrase: &Phrase) -> bool {
    !matches!(phrase, Phrase::Destructure(_))
}

/// Resolves text as itself.
#[must_use]
pub fn resolve_text(text: &str) -> Option<Value> {
    Some(Value::text(text))
}

/// Identifies one registered descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerbId(pub usize);

/// How a verb fills one role.
#[derive(Clone)]
pub struct RoleSpec {
    /// The role.
    pub role: Role,
    /// Whether the sentence must supply it.
    pub required: bool,
    /// Whether the preposition may be left out (`DELETE {a}.` for `DELETE FROM {a}.`).
    pub optional_preposition: bool,
    /// Whether this direct object receives the result instead of supplying input.
    pub receiver: bool,
    /// Surface-form check used during dispatch.
    pub accepts: AcceptFn,
    /// Converts literal and reference text into a value.
    pub resolve: ResolveFn,
}

impl RoleSpec {
    /// A required role accepting any input phrase, resolved as text.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            required: true,
            optional_preposition: false,
            receiver: false,
            accepts: accept_input,
            resolve: resolve_text,
        }
    }

    /// Marks the role as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Allows the value to follow the verb without its preposition.
    #[must_use]
    pub fn preposition_optional(mut self) -> Self {
        self.optional_preposition = true;
        self
    }

    /// Marks a direct object as the slot the result is stored into.
    #[must_use]
    pub fn receiver(mut self) -> Self {
        self.receiver = true;
        self.accepts = accept_slot;
        self
    }

    /// Sets the surface-form check.
    #[must_use]
    pub fn accepting(mut self, accepts: AcceptFn) -> Self {
        self.accepts = accepts;
        self
    }

    /// Sets the text resolver.
    #[must_use]
    pub fn resolving(mut self, resolve: ResolveFn) -> Self {
        self.resolve = resolve;
        self
    }
}

impl fmt::Debug for RoleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleSpec")
            .field("role", &self.role)
            .field("required", &self.required)
            .field("optional_preposition", &self.optional_preposition)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// One concrete implementation of a verb.
#[derive(Clone)]
pub struct VerbDescriptor {
    /// Canonical name, stored uppercase.
    pub name: String,
    /// Alternative names, stored uppercase.
    pub synonyms: Vec<String>,
    /// Roles in the order they are matched.
    pub roles: Vec<RoleSpec>,
    /// Qualifier nouns this usage accepts, stored uppercase.
    pub qualifiers: Vec<String>,
    /// One-line description for help output.
    pub summary: String,
    /// The action.
    pub act: ActFn,
}

impl VerbDescriptor {
    /// Creates a descriptor with no roles.
    #[must_use]
    pub fn new(name: impl Into<String>, act: ActFn) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            synonyms: Vec::new(),
            roles: Vec::new(),
            qualifiers: Vec::new(),
            summary: String::new(),
            act,
        }
    }

    /// Adds synonyms.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.synonyms
            .extend(synonyms.into_iter().map(|s| s.as_ref().to_ascii_uppercase()));
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, spec: RoleSpec) -> Self {
        self.roles.push(spec);
        self
    }

    /// Adds accepted qualifiers.
    #[must_use]
    pub fn with_qualifiers<I, S>(mut self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.qualifiers
            .extend(qualifiers.into_iter().map(|s| s.as_ref().to_ascii_uppercase()));
        self
    }

    /// Sets the help summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Returns true if `word` is the name or a synonym.
    #[must_use]
    pub fn answers_to(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(word))
    }

    /// The spec for a role, if declared.
    #[must_use]
    pub fn role(&self, role: Role) -> Option<&RoleSpec> {
        self.roles.iter().find(|spec| spec.role == role)
    }

    /// Every declared role.
    #[must_use]
    pub fn declared_roles(&self) -> RoleSet {
        self.roles.iter().map(|spec| spec.role).collect()
    }

    /// Roles the sentence must supply.
    #[must_use]
    pub fn required_roles(&self) -> RoleSet {
        self.roles
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.role)
            .collect()
    }

    /// Number of declared roles.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if the qualifier is accepted.
    #[must_use]
    pub fn accepts_qualifier(&self, qualifier: &str) -> bool {
        self.qualifiers.iter().any(|q| q.eq_ignore_ascii_case(qualifier))
    }

    /// Asks the role's value check whether a phrase is acceptable.
    #[must_use]
    pub fn validate(&self, role: Role, phrase: &Phrase) -> bool {
        self.role(role).is_some_and(|spec| (spec.accepts)(phrase))
    }

    /// Converts text for a role.
    #[must_use]
    pub fn resolve(&self, role: Role, text: &str) -> Option<Value> {
        self.role(role).and_then(|spec| (spec.resolve)(text))
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Propagates the action's failure.
    pub fn act(&self, args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
        (self.act)(args, ctx)
    }

    /// Returns true if this usage structurally matches the chain.
    #[must_use]
    pub fn can_handle(&self, chain: &WordChain) -> bool {
        crate::dispatch::match_usage(self, chain).is_ok()
    }

    /// Short usage line, e.g. `GET [LINES|TEXT] <what> FROM <value>`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = self.name.clone();
        if !self.qualifiers.is_empty() {
            out.push_str(&format!(" [{}]", self.qualifiers.join("|")));
        }
        for spec in &self.roles {
            let part = match spec.role.preposition() {
                Some(prep) if spec.optional_preposition => format!("[{prep}] <value>"),
                Some(prep) => format!("{prep} <value>"),
                None if spec.receiver => "[name]".to_string(),
                None => "<what>".to_string(),
            };
            if spec.required {
                out.push_str(&format!(" {part}"));
            } else {
                out.push_str(&format!(" ({part})"));
            }
        }
        out
    }

    fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(Error::new(ErrorKind::Internal(format!(
                "invalid verb name '{}'",
                self.name
            ))));
        }
        let mut seen = RoleSet::new();
        for spec in &self.roles {
            if !seen.insert(spec.role) {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "{} declares the {} role twice",
                    self.name, spec.role
                ))));
            }
            if spec.optional_preposition && spec.role == Role::What {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "{} marks the What role as preposition-optional",
                    self.name
                ))));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for VerbDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbDescriptor")
            .field("name", &self.name)
            .field("synonyms", &self.synonyms)
            .field("roles", &self.roles)
            .field("qualifiers", &self.qualifiers)
            .finish_non_exhaustive()
    }
}

/// The role signature of one registered usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Every declared role.
    pub roles: RoleSet,
    /// Roles the sentence must supply.
    pub required: RoleSet,
    /// Number of declared roles.
    pub arity: usize,
}

/// A source of verbs and qualifiers.
pub trait Plugin: Send + Sync {
    /// Name used in logs and to detect plugin-set changes.
    fn name(&self) -> &str;

    /// Registers this plugin's verbs and qualifiers.
    ///
    /// # Errors
    ///
    /// A failing plugin is skipped; nothing it registered is kept.
    fn register(&self, builder: &mut RegistryBuilder) -> Result<()>;
}

/// Collects registrations from one plugin.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    verbs: Vec<VerbDescriptor>,
    qualifiers: Vec<String>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a verb usage.
    pub fn verb(&mut self, descriptor: VerbDescriptor) -> &mut Self {
        self.verbs.push(descriptor);
        self
    }

    /// Registers a qualifier noun.
    pub fn qualifier(&mut self, name: impl AsRef<str>) -> &mut Self {
        self.qualifiers.push(name.as_ref().to_ascii_uppercase());
        self
    }
}

/// Indexed verbs and qualifiers from every plugin that registered cleanly.
pub struct Registry {
    plugins: Vec<Arc<dyn Plugin>>,
    verbs: Vec<Arc<VerbDescriptor>>,
    by_name: HashMap<String, Vec<VerbId>>,
    qualifiers: HashSet<String>,
    skipped: Vec<String>,
    fingerprint: u64,
}

impl Registry {
    /// Scans plugins and builds the indexes.
    ///
    /// # Errors
    ///
    /// Returns `NoVerbs` if no plugin contributed a usable verb.
    pub fn scan(plugins: Vec<Arc<dyn Plugin>>) -> Result<Self> {
        let mut registry = Self {
            plugins,
            verbs: Vec::new(),
            by_name: HashMap::new(),
            qualifiers: HashSet::new(),
            skipped: Vec::new(),
            fingerprint: 0,
        };
        registry.rebuild();
        if registry.verbs.is_empty() {
            return Err(Error::new(ErrorKind::NoVerbs));
        }
        Ok(registry)
    }

    /// Adds a plugin. Takes effect on the next [`refresh`](Self::refresh).
    pub fn add_plugin(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Re-scans every plugin.
    ///
    /// Returns true if the set of registered usages changed.
    ///
    /// # Errors
    ///
    /// Returns `NoVerbs` if the re-scan found nothing; the registry is left empty.
    pub fn refresh(&mut self) -> Result<bool> {
        let before = self.fingerprint;
        self.rebuild();
        if self.verbs.is_empty() {
            return Err(Error::new(ErrorKind::NoVerbs));
        }
        Ok(before != self.fingerprint)
    }

    fn rebuild(&mut self) {
        self.verbs.clear();
        self.by_name.clear();
        self.qualifiers.clear();
        self.skipped.clear();

        for plugin in &self.plugins {
            let mut builder = RegistryBuilder::new();
            if let Err(err) = plugin.register(&mut builder) {
                tracing::warn!(plugin = plugin.name(), error = %err, "skipping plugin");
                self.skipped.push(plugin.name().to_string());
                continue;
            }
            for descriptor in builder.verbs {
                if let Err(err) = descriptor.check() {
                    tracing::warn!(plugin = plugin.name(), error = %err, "skipping verb");
                    self.skipped.push(format!("{}::{}", plugin.name(), descriptor.name));
                    continue;
                }
                let id = VerbId(self.verbs.len());
                for name in std::iter::once(&descriptor.name).chain(&descriptor.synonyms) {
                    let entry = self.by_name.entry(name.to_ascii_lowercase()).or_default();
                    if !entry.contains(&id) {
                        entry.push(id);
                    }
                }
                self.verbs.push(Arc::new(descriptor));
            }
            self.qualifiers.extend(builder.qualifiers);
        }

        self.fingerprint = self.compute_fingerprint();
        tracing::info!(
            plugins = self.plugins.len(),
            verbs = self.verbs.len(),
            skipped = self.skipped.len(),
            "verb registry scanned"
        );
    }

    fn compute_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for plugin in &self.plugins {
            plugin.name().hash(&mut hasher);
        }
        for verb in &self.verbs {
            verb.name.hash(&mut hasher);
            verb.synonyms.hash(&mut hasher);
            verb.declared_roles().hash(&mut hasher);
            verb.required_roles().hash(&mut hasher);
            verb.qualifiers.hash(&mut hasher);
        }
        let mut qualifiers: Vec<_> = self.qualifiers.iter().collect();
        qualifiers.sort();
        qualifiers.hash(&mut hasher);
        hasher.finish()
    }

    /// Identifies the current set of registered usages.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Returns true if `word` names a verb (canonical or synonym).
    #[must_use]
    pub fn is_verb(&self, word: &str) -> bool {
        self.by_name.contains_key(&word.to_ascii_lowercase())
    }

    /// Every usage answering to `word`, in registration order.
    #[must_use]
    pub fn candidates(&self, word: &str) -> &[VerbId] {
        self.by_name
            .get(&word.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// The canonical name for a verb word.
    #[must_use]
    pub fn canonical_name(&self, word: &str) -> Option<&str> {
        self.candidates(word)
            .first()
            .map(|id| self.verbs[id.0].name.as_str())
    }

    /// The descriptor for an id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this registry.
    #[must_use]
    pub fn verb(&self, id: VerbId) -> &Arc<VerbDescriptor> {
        &self.verbs[id.0]
    }

    /// The role signature for an id.
    #[must_use]
    pub fn signature(&self, id: VerbId) -> Option<Signature> {
        self.verbs.get(id.0).map(|v| Signature {
            roles: v.declared_roles(),
            required: v.required_roles(),
            arity: v.arity(),
        })
    }

    /// Every registered usage.
    pub fn verbs(&self) -> impl Iterator<Item = (VerbId, &Arc<VerbDescriptor>)> {
        self.verbs.iter().enumerate().map(|(i, v)| (VerbId(i), v))
    }

    /// Distinct canonical verb names, sorted.
    #[must_use]
    pub fn verb_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.verbs.iter().map(|v| v.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Returns true if `word` is a registered qualifier.
    #[must_use]
    pub fn is_qualifier(&self, word: &str) -> bool {
        self.qualifiers.contains(&word.to_ascii_uppercase())
    }

    /// Registered qualifiers, sorted.
    #[must_use]
    pub fn qualifiers(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.qualifiers.iter().map(String::as_str).collect();
        all.sort_unstable();
        all
    }

    /// Plugins and verbs skipped during the last scan.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of registered usages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("plugins", &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field("verbs", &self.verbs)
            .field("qualifiers", &self.qualifiers)
            .field("skipped", &self.skipped)
            .finish()
    }
}
