//! Depth-first flattening of the catalog forest.
//!
//! The persistence layer hands back a flat, unordered list of entries whose
//! only link to their parent is a code-valued foreign key that may be
//! missing, dangling, or cyclic. [`build_hierarchy`] reconstructs the forest
//! from that list and flattens it into the display order: a pre-order walk
//! where parents always precede their children and siblings are sorted by
//! normalized code.
//!
//! Malformed data never aborts the build. Dangling parent references degrade
//! to "treat as root", and cyclic subgraphs are broken up by per-entry
//! visited bookkeeping, then swept up as synthetic roots so no entry is ever
//! silently dropped.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::index::ChildrenIndex;
use crate::core::code::NormalizedCode;
use crate::core::entry::CatalogEntry;

/// One entry in the flattened display order, annotated with its computed
/// depth. Depth is derived by traversal and never read from the entry's
/// stored `level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode<'a> {
    pub entry: &'a CatalogEntry,
    pub depth: u32,
}

/// Owned, serializable form of a [`HierarchyNode`] for CLI and web output.
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyRow {
    pub code: String,
    pub name: String,
    pub depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub active: bool,
}

impl From<&HierarchyNode<'_>> for HierarchyRow {
    fn from(node: &HierarchyNode<'_>) -> Self {
        Self {
            code: node.entry.code.clone(),
            name: node.entry.name.clone(),
            depth: node.depth,
            parent_code: node.entry.parent_code.clone(),
            level: node.entry.level,
            active: node.entry.active,
        }
    }
}

/// Flatten the forest into display order, building the children index
/// internally.
///
/// Guarantees, regardless of how malformed the input is:
///
/// - every input entry appears exactly once in the output;
/// - an entry with a resolvable parent appears after that parent;
/// - siblings appear in ascending normalized-code order;
/// - the build terminates - the visited flag per entry is a strict progress
///   marker, so termination does not depend on cycle shape.
#[must_use]
pub fn build_hierarchy(entries: &[CatalogEntry]) -> Vec<HierarchyNode<'_>> {
    let index = ChildrenIndex::build(entries);
    build_hierarchy_with_index(entries, &index)
}

/// Flatten the forest using a pre-built children index.
#[must_use]
pub fn build_hierarchy_with_index<'a>(
    entries: &'a [CatalogEntry],
    index: &ChildrenIndex,
) -> Vec<HierarchyNode<'a>> {
    let known: HashSet<NormalizedCode> =
        entries.iter().filter_map(CatalogEntry::code_key).collect();

    // Deterministic root selection: walk the whole list in normalized-code
    // order. Entries with a blank code sort first; they are still emitted.
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| entries[a].code_key().cmp(&entries[b].code_key()));

    let mut visited = vec![false; entries.len()];
    let mut out = Vec::with_capacity(entries.len());

    // Pass 1: natural roots - no parent, blank parent, or dangling parent.
    for &i in &order {
        let is_root = match entries[i].parent_key() {
            None => true,
            Some(parent) => !known.contains(&parent),
        };
        if is_root {
            visit(entries, index, i, 0, &mut visited, &mut out);
        }
    }

    // Pass 2: anything still unvisited participates exclusively in a cycle
    // with no reachable root. Emit it as a synthetic root and walk its
    // remaining subtree so the entry is not lost.
    for &i in &order {
        if !visited[i] {
            visit(entries, index, i, 0, &mut visited, &mut out);
        }
    }

    out
}

/// Iterative pre-order visit. Children are pushed in reverse bucket order so
/// they pop in ascending normalized-code order.
fn visit<'a>(
    entries: &'a [CatalogEntry],
    index: &ChildrenIndex,
    start: usize,
    start_depth: u32,
    visited: &mut [bool],
    out: &mut Vec<HierarchyNode<'a>>,
) {
    let mut stack = vec![(start, start_depth)];

    while let Some((i, depth)) = stack.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        out.push(HierarchyNode {
            entry: &entries[i],
            depth,
        });

        if let Some(code) = entries[i].code_key() {
            for &child in index.children_of(&code).iter().rev() {
                if !visited[child] {
                    stack.push((child, depth + 1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(nodes: &[HierarchyNode<'_>]) -> Vec<(String, u32)> {
        nodes
            .iter()
            .map(|n| (n.entry.code.clone(), n.depth))
            .collect()
    }

    #[test]
    fn test_concrete_scenario() {
        let entries = vec![
            CatalogEntry::new("F30", "Manic episode"),
            CatalogEntry::new("F32", "Depressive episode").with_parent("F30"),
            CatalogEntry::new("F32.1", "Moderate depressive episode").with_parent("F32"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(
            codes(&nodes),
            vec![
                ("F30".to_string(), 0),
                ("F32".to_string(), 1),
                ("F32.1".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let entries = vec![
            CatalogEntry::new("F32.1", "Moderate depressive episode").with_parent("F32"),
            CatalogEntry::new("F30", "Manic episode"),
            CatalogEntry::new("F32", "Depressive episode").with_parent("F30"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(
            codes(&nodes),
            vec![
                ("F30".to_string(), 0),
                ("F32".to_string(), 1),
                ("F32.1".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_sibling_ordering() {
        let entries = vec![
            CatalogEntry::new("A", "Root"),
            CatalogEntry::new("A.3", "Third").with_parent("A"),
            CatalogEntry::new("A.1", "First").with_parent("A"),
            CatalogEntry::new("A.2", "Second").with_parent("A"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(
            codes(&nodes),
            vec![
                ("A".to_string(), 0),
                ("A.1".to_string(), 1),
                ("A.2".to_string(), 1),
                ("A.3".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_dangling_parent_treated_as_root() {
        let entries = vec![
            CatalogEntry::new("F30", "Manic episode"),
            CatalogEntry::new("F99", "Orphan").with_parent("GHOST"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(
            codes(&nodes),
            vec![("F30".to_string(), 0), ("F99".to_string(), 0)]
        );
    }

    #[test]
    fn test_cycle_terminates_and_keeps_every_entry() {
        let entries = vec![
            CatalogEntry::new("X", "First").with_parent("Y"),
            CatalogEntry::new("Y", "Second").with_parent("X"),
        ];

        let nodes = build_hierarchy(&entries);
        // Both emitted exactly once; the sorted-first member of the cycle
        // becomes the synthetic root.
        assert_eq!(
            codes(&nodes),
            vec![("X".to_string(), 0), ("Y".to_string(), 1)]
        );
    }

    #[test]
    fn test_cycle_island_next_to_healthy_tree() {
        let entries = vec![
            CatalogEntry::new("A", "Root"),
            CatalogEntry::new("A.1", "Child").with_parent("A"),
            CatalogEntry::new("P", "Cycle member").with_parent("Q"),
            CatalogEntry::new("Q", "Cycle member").with_parent("P"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(nodes.len(), 4);
        assert_eq!(
            codes(&nodes),
            vec![
                ("A".to_string(), 0),
                ("A.1".to_string(), 1),
                ("P".to_string(), 0),
                ("Q".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_self_parent_terminates() {
        let entries = vec![CatalogEntry::new("LOOP", "Self-referencing").with_parent("LOOP")];

        let nodes = build_hierarchy(&entries);
        assert_eq!(codes(&nodes), vec![("LOOP".to_string(), 0)]);
    }

    #[test]
    fn test_parent_before_child_everywhere() {
        let entries = vec![
            CatalogEntry::new("F40-F48", "Neurotic disorders"),
            CatalogEntry::new("F41", "Other anxiety disorders").with_parent("F40-F48"),
            CatalogEntry::new("F41.0", "Panic disorder").with_parent("F41"),
            CatalogEntry::new("F41.1", "Generalized anxiety disorder").with_parent("F41"),
            CatalogEntry::new("F40", "Phobic anxiety disorders").with_parent("F40-F48"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(nodes.len(), entries.len());

        let position = |code: &str| {
            nodes
                .iter()
                .position(|n| n.entry.code == code)
                .unwrap_or_else(|| panic!("{code} missing from output"))
        };
        for entry in &entries {
            if let Some(parent) = &entry.parent_code {
                assert!(position(parent) < position(&entry.code));
            }
        }
    }

    #[test]
    fn test_duplicate_codes_do_not_lose_entries() {
        // Duplicate handling is the caller's concern; the builder must still
        // emit every input entry exactly once without crashing.
        let entries = vec![
            CatalogEntry::new("A", "Root"),
            CatalogEntry::new("A.1", "First copy").with_parent("A"),
            CatalogEntry::new("a.1", "Second copy").with_parent("A"),
        ];

        let nodes = build_hierarchy(&entries);
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(&[]).is_empty());
    }
}
