//! Material resolution boundary.
//!
//! The resolver is an explicit object handed to the import call, populated by
//! the caller beforehand. Lookups are a deterministic pure mapping from a
//! normalized name to the host's opaque handle; the importer never caches,
//! retries, or mutates resolver state. Callers wanting per-import libraries
//! call [`MaterialResolver::clear`] and re-register before each import.

use std::collections::HashMap;

/// Maps material names to opaque host handles.
///
/// Registration order matters only for duplicates: the first registration of
/// a name wins and later ones are ignored, so callers layering several
/// libraries register them in priority order.
#[derive(Clone, Debug)]
pub struct MaterialResolver<M> {
    table: HashMap<String, M>,
}

impl<M: Clone> MaterialResolver<M> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register a material handle under `name`.
    ///
    /// Returns `false` when the name was already registered; the existing
    /// handle is kept.
    pub fn register(&mut self, name: impl Into<String>, handle: M) -> bool {
        let name = name.into();
        if self.table.contains_key(&name) {
            return false;
        }

        self.table.insert(name, handle);
        true
    }

    /// Remove every registered material.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Look up a handle by identifier.
    ///
    /// Quote characters are stripped from the identifier before the lookup,
    /// since the authoring tool writes some material names quoted.
    pub fn resolve(&self, identifier: &str) -> Option<M> {
        let normalized = identifier.replace('"', "");
        self.table.get(&normalized).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<M: Clone> Default for MaterialResolver<M> {
    fn default() -> Self {
        Self::new()
    }
}
