use std::collections::{HashMap, HashSet};

use crate::core::code::NormalizedCode;
use crate::core::entry::CatalogEntry;

/// Groups entries by normalized parent code for child lookup during
/// traversal.
///
/// Only entries whose parent code resolves to a code that actually exists in
/// the snapshot are bucketed; entries with absent, blank, or dangling parent
/// references are left out (they are root candidates, handled by the
/// hierarchy builder). Buckets hold indices into the entry slice the index
/// was built from, sorted by the child's normalized code so sibling order is
/// deterministic and locale-stable.
///
/// The index is rebuilt from scratch on every call. Snapshots are small (a
/// few hundred to low thousands of rows) and the rebuild is O(n log n), so
/// incremental maintenance would buy nothing.
#[derive(Debug, Default)]
pub struct ChildrenIndex {
    buckets: HashMap<NormalizedCode, Vec<usize>>,
}

impl ChildrenIndex {
    /// Build the index for one snapshot.
    #[must_use]
    pub fn build(entries: &[CatalogEntry]) -> Self {
        let known: HashSet<NormalizedCode> =
            entries.iter().filter_map(CatalogEntry::code_key).collect();

        let mut buckets: HashMap<NormalizedCode, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(parent) = entry.parent_key() {
                if known.contains(&parent) {
                    buckets.entry(parent).or_default().push(i);
                }
            }
        }

        // Sort each bucket by the child's normalized code. Ties (duplicate
        // codes) keep input order.
        for bucket in buckets.values_mut() {
            bucket.sort_by(|&a, &b| entries[a].code_key().cmp(&entries[b].code_key()));
        }

        Self { buckets }
    }

    /// Direct children of the given normalized code, in sorted order.
    #[must_use]
    pub fn children_of(&self, code: &NormalizedCode) -> &[usize] {
        self.buckets.get(code).map_or(&[], Vec::as_slice)
    }

    /// Number of parent codes that have at least one child.
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("F30", "Manic episode"),
            CatalogEntry::new("F32", "Depressive episode").with_parent("F30"),
            CatalogEntry::new("F31", "Bipolar affective disorder").with_parent("F30"),
            CatalogEntry::new("F32.1", "Moderate depressive episode").with_parent("f32"),
            CatalogEntry::new("F99", "Unspecified mental disorder").with_parent("GHOST"),
        ]
    }

    #[test]
    fn test_children_sorted_by_code() {
        let entries = entries();
        let index = ChildrenIndex::build(&entries);

        let f30 = NormalizedCode::parse("F30").unwrap();
        let children: Vec<&str> = index
            .children_of(&f30)
            .iter()
            .map(|&i| entries[i].code.as_str())
            .collect();
        assert_eq!(children, vec!["F31", "F32"]);
    }

    #[test]
    fn test_parent_lookup_is_case_insensitive() {
        let entries = entries();
        let index = ChildrenIndex::build(&entries);

        let f32 = NormalizedCode::parse("F32").unwrap();
        assert_eq!(index.children_of(&f32).len(), 1);
        assert_eq!(entries[index.children_of(&f32)[0]].code, "F32.1");
    }

    #[test]
    fn test_dangling_parent_not_bucketed() {
        let entries = entries();
        let index = ChildrenIndex::build(&entries);

        let ghost = NormalizedCode::parse("GHOST").unwrap();
        assert!(index.children_of(&ghost).is_empty());
        // F30 and F32 are the only codes with children
        assert_eq!(index.parent_count(), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let index = ChildrenIndex::build(&[]);
        assert_eq!(index.parent_count(), 0);
    }
}
