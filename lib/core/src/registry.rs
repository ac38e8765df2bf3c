use crate::{builtin, Entry, Error, Result};
use indexmap::IndexMap;
use tracing::{debug, info};

type PairMap<V> = IndexMap<String, V, ahash::RandomState>;

/// The builtin and user halves stored for one name.
///
/// At least one of `builtin` / `custom` is set for every pair held by an
/// [`EntryRegistry`]. `custom` is the user override.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPair {
    pub name: String,
    pub builtin: Option<Entry>,
    pub custom: Option<Entry>,
}

impl EntryPair {
    pub fn builtin(entry: Entry) -> Self {
        Self {
            name: entry.name.clone(),
            builtin: Some(entry),
            custom: None,
        }
    }

    pub fn custom(entry: Entry) -> Self {
        Self {
            name: entry.name.clone(),
            builtin: None,
            custom: Some(entry),
        }
    }

    /// The effective entry: the override laid over the builtin field by field.
    pub fn resolve(&self) -> Result<Entry> {
        match (&self.builtin, &self.custom) {
            (None, None) => Err(Error::MissingEntry(self.name.clone())),
            (None, Some(custom)) => Ok(custom.clone()),
            (Some(builtin), None) => Ok(builtin.clone()),
            (Some(builtin), Some(custom)) => Ok(builtin.overlay(custom)),
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.custom.is_some()
    }
}

/// Merged view of the builtin vocabulary and the user overrides, keyed by name.
///
/// Iteration follows insertion order. Re-inserting a name replaces the pair
/// in place, so the slot of the first occurrence is kept.
#[derive(Debug, Clone, Default)]
pub struct EntryRegistry {
    pairs: PairMap<EntryPair>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry loaded with the embedded symbol table
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.load(builtin::builtin_entries()?);
        Ok(registry)
    }

    /// Replace the whole registry with `entries` as builtins.
    ///
    /// Duplicate names are not rejected: the last one wins.
    pub fn load<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Entry>,
    {
        self.pairs.clear();
        for entry in entries {
            self.pairs.insert(entry.name.clone(), EntryPair::builtin(entry));
        }
        info!("Loaded symbol entries. Size: {}", self.pairs.len());
    }

    /// Merge overrides into the registry.
    ///
    /// Existing pairs get their override replaced; unknown names become
    /// override-only pairs. Nothing is removed. The entry is renamed to its
    /// key, so a pair and its halves always agree on the name.
    pub fn apply_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, Entry)>,
    {
        for (name, mut entry) in overrides {
            debug!("Applying override for {}", name);
            entry.name.clone_from(&name);
            match self.pairs.get_mut(&name) {
                Some(pair) => pair.custom = Some(entry),
                None => {
                    self.pairs.insert(
                        name.clone(),
                        EntryPair {
                            name,
                            builtin: None,
                            custom: Some(entry),
                        },
                    );
                }
            }
        }
    }

    /// Set a single override, keyed by the entry's own name
    pub fn set_override(&mut self, entry: Entry) {
        self.apply_overrides(std::iter::once((entry.name.clone(), entry)));
    }

    /// Drop the override for `name`. Override-only pairs disappear entirely.
    pub fn remove_override(&mut self, name: &str) -> bool {
        let Some(pair) = self.pairs.get_mut(name) else {
            return false;
        };
        if pair.custom.take().is_none() {
            return false;
        }
        if pair.builtin.is_none() {
            self.pairs.shift_remove(name);
        }
        true
    }

    /// Clear the whole override half
    pub fn clear_overrides(&mut self) {
        self.pairs.retain(|_, pair| pair.builtin.is_some());
        for pair in self.pairs.values_mut() {
            pair.custom = None;
        }
    }

    pub fn get(&self, name: &str) -> Option<&EntryPair> {
        self.pairs.get(name)
    }

    /// Resolve the effective entry for `name`
    pub fn resolve(&self, name: &str) -> Option<Result<Entry>> {
        self.pairs.get(name).map(EntryPair::resolve)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryPair> {
        self.pairs.values()
    }

    /// Copy of the override half, in registry order
    pub fn overrides(&self) -> IndexMap<String, Entry> {
        self.pairs
            .values()
            .filter_map(|pair| {
                pair.custom
                    .as_ref()
                    .map(|custom| (pair.name.clone(), custom.clone()))
            })
            .collect()
    }

    pub fn override_count(&self) -> usize {
        self.pairs.values().filter(|pair| pair.is_overridden()).count()
    }
}
