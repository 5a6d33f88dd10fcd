//! Static action catalog oracle.
//!
//! Provides read-only access to per-action parameters.

use std::collections::BTreeMap;

use crate::action::{ActionEntry, ActionId};

/// Oracle providing static action parameters.
///
/// Entries define cast type, range, costs, cooldown group and potencies for
/// each action id. The catalog is read-only for the lifetime of a zone.
pub trait ActionOracle: Send + Sync {
    /// Returns the entry for `id`, or `None` if the id is unknown.
    fn lookup(&self, id: ActionId) -> Option<ActionEntry>;
}

/// In-memory catalog keyed by action id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticCatalog {
    entries: BTreeMap<ActionId, ActionEntry>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, entry: ActionEntry) -> Option<ActionEntry> {
        self.entries.insert(entry.id, entry)
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionEntry> {
        self.entries.get(&id)
    }

    /// Returns an iterator over all registered action ids.
    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ActionEntry> for StaticCatalog {
    fn from_iter<T: IntoIterator<Item = ActionEntry>>(iter: T) -> Self {
        let mut catalog = StaticCatalog::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

impl ActionOracle for StaticCatalog {
    fn lookup(&self, id: ActionId) -> Option<ActionEntry> {
        self.entries.get(&id).cloned()
    }
}
