//! Catalog oracle implementing [`gacha_core::CatalogOracle`].

use std::collections::{BTreeMap, HashMap};

use gacha_core::{CatalogEntry, CatalogOracle};

/// Oracle providing catalog entries by id or (case-insensitive) name.
pub struct CatalogOracleImpl {
    entries: BTreeMap<u32, CatalogEntry>,
    by_name: HashMap<String, u32>,
}

impl CatalogOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// The built-in fallback catalog from `gacha-content`.
    pub fn builtin() -> Self {
        Self::from_entries(gacha_content::default_catalog())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut oracle = Self::new();
        for entry in entries {
            oracle.add(entry);
        }
        oracle
    }

    /// Add an entry. A later entry with the same id replaces the earlier one;
    /// name lookups resolve to the first entry registered under that name.
    pub fn add(&mut self, entry: CatalogEntry) {
        if let Some(previous) = self.entries.get(&entry.id) {
            tracing::warn!(id = entry.id, previous = %previous.name, "catalog id replaced");
            let previous_name = previous.name.to_lowercase();
            if self.by_name.get(&previous_name) == Some(&entry.id) {
                self.by_name.remove(&previous_name);
            }
        }
        self.by_name
            .entry(entry.name.to_lowercase())
            .or_insert(entry.id);
        self.entries.insert(entry.id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CatalogOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogOracle for CatalogOracleImpl {
    fn entry(&self, id: u32) -> Option<CatalogEntry> {
        self.entries.get(&id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<CatalogEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.entry(*id))
    }

    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.values().cloned().collect()
    }
}
