use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::code::NormalizedCode;
use crate::core::entry::CatalogEntry;
use crate::utils::validation::MAX_ENTRIES;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Catalog too large: {0} entries exceeds maximum of {MAX_ENTRIES}")]
    TooManyEntries(usize),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub entries: Vec<CatalogEntry>,
}

/// Flat snapshot of catalog entries with a normalized-code lookup.
///
/// This type stands in for the persistence collaborator: it owns the entry
/// list the hierarchy algorithms consume and offers the list / create /
/// update / search surface the admin screens are built on. The algorithms
/// themselves never require a store - they take `&[CatalogEntry]` - so any
/// other source of snapshots works just as well.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,

    /// Index: normalized code -> index in `entries`. On duplicate normalized
    /// codes the later entry shadows the earlier, the documented precedence
    /// for malformed snapshots.
    code_to_index: HashMap<NormalizedCode, usize>,
}

impl CatalogStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed (caught at build
    /// time by build.rs, so this only fires on a corrupted binary).
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time, validated by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/diagnostic_codes.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error on invalid JSON or when the entry count exceeds
    /// [`MAX_ENTRIES`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        if data.entries.len() > MAX_ENTRIES {
            return Err(CatalogError::TooManyEntries(data.entries.len()));
        }

        let mut store = Self::new();
        for entry in data.entries {
            store.add_entry(entry);
        }

        Ok(store)
    }

    /// Add an entry to the store
    pub fn add_entry(&mut self, entry: CatalogEntry) {
        let index = self.entries.len();
        if let Some(key) = entry.code_key() {
            self.code_to_index.insert(key, index);
        }
        self.entries.push(entry);
    }

    /// Replace the entry whose normalized code matches `entry`'s. Returns
    /// false when no such entry exists.
    pub fn update_entry(&mut self, entry: CatalogEntry) -> bool {
        let Some(key) = entry.code_key() else {
            return false;
        };
        match self.code_to_index.get(&key) {
            Some(&index) => {
                self.entries[index] = entry;
                true
            }
            None => false,
        }
    }

    /// Get an entry by code (case- and whitespace-insensitive)
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        let key = NormalizedCode::parse(code)?;
        self.code_to_index.get(&key).map(|&i| &self.entries[i])
    }

    /// Case-insensitive substring search over code and name.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.code.to_lowercase().contains(&needle) || e.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// The full snapshot, in input order - what the hierarchy builders
    /// consume.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Export the catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            entries: self.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of entries in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_catalog() {
        let store = CatalogStore::load_embedded().unwrap();
        assert!(!store.is_empty());
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let store = CatalogStore::load_embedded().unwrap();

        let entry = store.get(" f32.1 ");
        assert!(entry.is_some());
        assert_eq!(entry.unwrap().name, "Moderate depressive episode");
    }

    #[test]
    fn test_get_nonexistent() {
        let store = CatalogStore::load_embedded().unwrap();
        assert!(store.get("Z99.9").is_none());
        assert!(store.get("   ").is_none());
    }

    #[test]
    fn test_search_matches_code_and_name() {
        let store = CatalogStore::load_embedded().unwrap();

        let by_name = store.search("depress");
        assert!(by_name.iter().any(|e| e.code == "F32"));
        assert!(by_name.iter().any(|e| e.code == "F33"));

        let by_code = store.search("f41.");
        assert_eq!(by_code.len(), 2);
    }

    #[test]
    fn test_update_entry() {
        let mut store = CatalogStore::new();
        store.add_entry(CatalogEntry::new("F32", "Depressive episode"));

        let updated = store.update_entry(
            CatalogEntry::new("f32", "Depressive episode (renamed)").with_level(1),
        );
        assert!(updated);
        assert_eq!(store.get("F32").unwrap().name, "Depressive episode (renamed)");

        assert!(!store.update_entry(CatalogEntry::new("F99", "Missing")));
    }

    #[test]
    fn test_duplicate_codes_later_shadows_earlier() {
        let mut store = CatalogStore::new();
        store.add_entry(CatalogEntry::new("F32", "First copy"));
        store.add_entry(CatalogEntry::new("f32", "Second copy"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("F32").unwrap().name, "Second copy");
    }

    #[test]
    fn test_json_roundtrip() {
        let store = CatalogStore::load_embedded().unwrap();
        let json = store.to_json().unwrap();

        let reloaded = CatalogStore::from_json(&json).unwrap();
        assert_eq!(store.len(), reloaded.len());
        assert_eq!(
            store.get("F32.1").unwrap(),
            reloaded.get("F32.1").unwrap()
        );
    }

    #[test]
    fn test_rejects_oversized_catalog() {
        let entries: Vec<CatalogEntry> = (0..=MAX_ENTRIES)
            .map(|i| CatalogEntry::new(format!("C{i}"), format!("Entry {i}")))
            .collect();
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            entries,
        };
        let json = serde_json::to_string(&data).unwrap();

        let result = CatalogStore::from_json(&json);
        assert!(matches!(result, Err(CatalogError::TooManyEntries(_))));
    }
}
