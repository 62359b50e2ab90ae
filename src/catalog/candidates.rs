use serde::Serialize;

use crate::catalog::hierarchy::{build_hierarchy, HierarchyNode};
use crate::core::entry::CatalogEntry;

/// A legal-parent candidate for a parent-selection control, in display order.
#[derive(Debug, Clone)]
pub struct ParentCandidate<'a> {
    pub entry: &'a CatalogEntry,
    /// Depth in the flattened forest, for indented rendering.
    pub depth: u32,
    /// False only for the entry currently being edited: self-parenting is
    /// blocked at the selection boundary. Deeper cycles are not prevented
    /// here - the traversal guards contain them instead.
    pub selectable: bool,
}

/// Owned, serializable form of a [`ParentCandidate`] for CLI and web output.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub code: String,
    pub name: String,
    pub depth: u32,
    pub selectable: bool,
}

impl From<&ParentCandidate<'_>> for CandidateRow {
    fn from(candidate: &ParentCandidate<'_>) -> Self {
        Self {
            code: candidate.entry.code.clone(),
            name: candidate.entry.name.clone(),
            depth: candidate.depth,
            selectable: candidate.selectable,
        }
    }
}

/// Produce parent candidates for the entry being edited (or for a new entry
/// when `editing` is `None`).
///
/// Candidates come out in the hierarchy builder's display order so a
/// selector can render the same indented tree the browser shows.
#[must_use]
pub fn parent_candidates<'a>(
    entries: &'a [CatalogEntry],
    editing: Option<&CatalogEntry>,
) -> Vec<ParentCandidate<'a>> {
    let editing_key = editing.and_then(CatalogEntry::code_key);

    build_hierarchy(entries)
        .iter()
        .map(|node: &HierarchyNode<'a>| {
            let selectable = match (&editing_key, node.entry.code_key()) {
                (Some(editing), Some(candidate)) => *editing != candidate,
                _ => true,
            };
            ParentCandidate {
                entry: node.entry,
                depth: node.depth,
                selectable,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("F30", "Manic episode"),
            CatalogEntry::new("F32", "Depressive episode").with_parent("F30"),
            CatalogEntry::new("F32.1", "Moderate depressive episode").with_parent("F32"),
        ]
    }

    #[test]
    fn test_editing_entry_is_not_selectable() {
        let entries = entries();
        let candidates = parent_candidates(&entries, Some(&entries[1]));

        assert_eq!(candidates.len(), 3);
        for candidate in &candidates {
            assert_eq!(candidate.selectable, candidate.entry.code != "F32");
        }
    }

    #[test]
    fn test_self_exclusion_is_case_insensitive() {
        let entries = entries();
        let editing = CatalogEntry::new(" f32 ", "Depressive episode");
        let candidates = parent_candidates(&entries, Some(&editing));

        let f32 = candidates
            .iter()
            .find(|c| c.entry.code == "F32")
            .expect("F32 present");
        assert!(!f32.selectable);
    }

    #[test]
    fn test_new_entry_can_pick_anything() {
        let entries = entries();
        let candidates = parent_candidates(&entries, None);
        assert!(candidates.iter().all(|c| c.selectable));
    }

    #[test]
    fn test_order_matches_hierarchy() {
        let entries = entries();
        let candidates = parent_candidates(&entries, None);

        let codes: Vec<&str> = candidates.iter().map(|c| c.entry.code.as_str()).collect();
        assert_eq!(codes, vec!["F30", "F32", "F32.1"]);
        let depths: Vec<u32> = candidates.iter().map(|c| c.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }
}
