//! Read-through grammar cache over the [`Registry`].
//!
//! Answers "what may follow verb X" without rescanning descriptors, and
//! keeps per-verb usage counts across refreshes that do not change the
//! registered usages.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use parlance_foundation::{Role, RoleSet};

use crate::registry::{Registry, VerbId};
use crate::word::Keyword;

/// One concrete usage of a verb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Usage {
    /// The registered descriptor.
    pub verb: VerbId,
    /// Every declared role.
    pub roles: RoleSet,
    /// Roles the sentence must supply.
    pub required: RoleSet,
    /// Accepted qualifiers.
    pub qualifiers: Vec<String>,
    /// Number of declared roles.
    pub arity: usize,
    /// Usage line for help output.
    pub pattern: String,
    /// Help summary.
    pub summary: String,
}

/// Cached usages and use counts, keyed by lowercase verb word.
#[derive(Debug, Default)]
pub struct Lexicon {
    usages: RefCell<HashMap<String, Arc<[Usage]>>>,
    counts: RefCell<HashMap<String, u64>>,
    fingerprint: Option<u64>,
}

impl Lexicon {
    /// Creates a lexicon bound to a registry's current fingerprint.
    #[must_use]
    pub fn new(registry: &Registry) -> Self {
        Self {
            fingerprint: Some(registry.fingerprint()),
            ..Self::default()
        }
    }

    /// Every usage of a verb word, loaded on first request.
    pub fn usages(&self, registry: &Registry, verb: &str) -> Arc<[Usage]> {
        let key = verb.to_ascii_lowercase();
        if let Some(cached) = self.usages.borrow().get(&key) {
            return Arc::clone(cached);
        }

        let loaded: Arc<[Usage]> = registry
            .candidates(&key)
            .iter()
            .map(|&id| {
                let descriptor = registry.verb(id);
                Usage {
                    verb: id,
                    roles: descriptor.declared_roles(),
                    required: descriptor.required_roles(),
                    qualifiers: descriptor.qualifiers.clone(),
                    arity: descriptor.arity(),
                    pattern: descriptor.usage(),
                    summary: descriptor.summary.clone(),
                }
            })
            .collect();
        tracing::trace!(verb = %key, usages = loaded.len(), "lexicon cache fill");
        self.usages.borrow_mut().insert(key, Arc::clone(&loaded));
        loaded
    }

    /// Prepositions some usage of the verb accepts, in role order.
    pub fn legal_prepositions(&self, registry: &Registry, verb: &str) -> Vec<Keyword> {
        let all: RoleSet = self
            .usages(registry, verb)
            .iter()
            .flat_map(|u| u.roles.iter())
            .collect();
        all.iter().filter_map(Keyword::for_role).collect()
    }

    /// Qualifiers some usage of the verb accepts, sorted.
    pub fn legal_qualifiers(&self, registry: &Registry, verb: &str) -> Vec<String> {
        let mut all: Vec<String> = self
            .usages(registry, verb)
            .iter()
            .flat_map(|u| u.qualifiers.iter().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    /// Returns true if every usage of the verb requires a direct object.
    pub fn requires_direct_object(&self, registry: &Registry, verb: &str) -> bool {
        let usages = self.usages(registry, verb);
        !usages.is_empty() && usages.iter().all(|u| u.required.contains(Role::What))
    }

    /// Counts one successful dispatch of a verb.
    pub fn record_use(&self, verb: &str) {
        *self
            .counts
            .borrow_mut()
            .entry(verb.to_ascii_lowercase())
            .or_insert(0) += 1;
    }

    /// How often a verb has been dispatched.
    #[must_use]
    pub fn use_count(&self, verb: &str) -> u64 {
        self.counts
            .borrow()
            .get(&verb.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Drops cached usages. Counts are kept.
    pub fn clear(&mut self) {
        self.usages.get_mut().clear();
    }

    /// Re-syncs with the registry after it was refreshed.
    ///
    /// Counts survive only if the registered usages are unchanged.
    pub fn refresh(&mut self, registry: &Registry) {
        self.clear();
        let fingerprint = registry.fingerprint();
        if self.fingerprint != Some(fingerprint) {
            tracing::debug!("registry changed, resetting verb counts");
            self.counts.get_mut().clear();
            self.fingerprint = Some(fingerprint);
        }
    }
}
