use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::catalog::hierarchy::build_hierarchy;
use crate::catalog::index::ChildrenIndex;
use crate::core::code::NormalizedCode;
use crate::core::entry::CatalogEntry;

/// Detailed data-quality report over one catalog snapshot.
///
/// The hierarchy algorithms never raise errors on malformed data - they
/// degrade to documented fallbacks. This report is how callers see what was
/// degraded: duplicate business keys, dangling parent references, entries
/// stuck in parent cycles, blank display names. It is read-only and changes
/// no semantics.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDiagnosis {
    /// Total entries analyzed
    pub entry_count: usize,

    /// Normalized codes that appear more than once, with occurrence counts
    pub duplicate_codes: Vec<DuplicateCode>,

    /// Entries whose parent code resolves to no known entry
    pub dangling_parents: Vec<DanglingParent>,

    /// Entries unreachable from any natural root: they participate in a
    /// parent cycle with no way in. The builder emits them as synthetic
    /// roots; forms should treat them as rows needing repair.
    pub cycle_members: Vec<String>,

    /// Entries whose display name is empty after trimming
    pub blank_names: Vec<String>,

    /// Deepest level observed in the flattened forest
    pub max_depth: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCode {
    pub code: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DanglingParent {
    pub code: String,
    pub parent_code: String,
}

impl CatalogDiagnosis {
    /// Analyze one snapshot.
    #[must_use]
    pub fn analyze(entries: &[CatalogEntry]) -> Self {
        let known: HashSet<NormalizedCode> =
            entries.iter().filter_map(CatalogEntry::code_key).collect();

        // Duplicates post-normalization
        let mut counts: HashMap<NormalizedCode, usize> = HashMap::new();
        for entry in entries {
            if let Some(key) = entry.code_key() {
                *counts.entry(key).or_default() += 1;
            }
        }
        let mut duplicate_codes: Vec<DuplicateCode> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(code, count)| DuplicateCode {
                code: code.to_string(),
                count,
            })
            .collect();
        duplicate_codes.sort_by(|a, b| a.code.cmp(&b.code));

        // Dangling parent references
        let dangling_parents: Vec<DanglingParent> = entries
            .iter()
            .filter_map(|entry| {
                let parent = entry.parent_key()?;
                if known.contains(&parent) {
                    None
                } else {
                    Some(DanglingParent {
                        code: entry.code.clone(),
                        parent_code: entry.parent_code.clone().unwrap_or_default(),
                    })
                }
            })
            .collect();

        // Cycle members: entries no natural root can reach
        let cycle_members = unreachable_from_roots(entries, &known);

        let blank_names: Vec<String> = entries
            .iter()
            .filter(|e| e.name.trim().is_empty())
            .map(|e| e.code.clone())
            .collect();

        let max_depth = build_hierarchy(entries)
            .iter()
            .map(|n| n.depth)
            .max()
            .unwrap_or(0);

        Self {
            entry_count: entries.len(),
            duplicate_codes,
            dangling_parents,
            cycle_members,
            blank_names,
            max_depth,
        }
    }

    /// True when the snapshot has none of the anomalies this report tracks.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_codes.is_empty()
            && self.dangling_parents.is_empty()
            && self.cycle_members.is_empty()
            && self.blank_names.is_empty()
    }
}

impl std::fmt::Display for CatalogDiagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Catalog diagnosis: {} entries, max depth {}",
            self.entry_count, self.max_depth
        )?;

        if self.is_clean() {
            return write!(f, "No anomalies found");
        }

        if !self.duplicate_codes.is_empty() {
            writeln!(f, "\nDuplicate codes (post-normalization):")?;
            for dup in &self.duplicate_codes {
                writeln!(f, "  {} ({} occurrences)", dup.code, dup.count)?;
            }
        }

        if !self.dangling_parents.is_empty() {
            writeln!(f, "\nDangling parent references (treated as roots):")?;
            for dangling in &self.dangling_parents {
                writeln!(f, "  {} -> {}", dangling.code, dangling.parent_code)?;
            }
        }

        if !self.cycle_members.is_empty() {
            writeln!(f, "\nEntries in parent cycles (emitted as synthetic roots):")?;
            for code in &self.cycle_members {
                writeln!(f, "  {code}")?;
            }
        }

        if !self.blank_names.is_empty() {
            writeln!(f, "\nEntries with blank names:")?;
            for code in &self.blank_names {
                writeln!(f, "  {code}")?;
            }
        }

        Ok(())
    }
}

/// Mark everything reachable from natural roots; whatever is left sits in a
/// cycle with no way in. Same guard bookkeeping as the hierarchy builder,
/// minus the output.
fn unreachable_from_roots(
    entries: &[CatalogEntry],
    known: &HashSet<NormalizedCode>,
) -> Vec<String> {
    let index = ChildrenIndex::build(entries);
    let mut visited = vec![false; entries.len()];

    for (i, entry) in entries.iter().enumerate() {
        let is_root = match entry.parent_key() {
            None => true,
            Some(parent) => !known.contains(&parent),
        };
        if is_root {
            mark_subtree(entries, &index, i, &mut visited);
        }
    }

    let mut unreachable: Vec<String> = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| !visited[*i])
        .map(|(_, e)| e.code.clone())
        .collect();
    unreachable.sort();
    unreachable
}

fn mark_subtree(
    entries: &[CatalogEntry],
    index: &ChildrenIndex,
    start: usize,
    visited: &mut [bool],
) {
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        if let Some(code) = entries[i].code_key() {
            for &child in index.children_of(&code) {
                if !visited[child] {
                    stack.push(child);
                }
            }
        }
    }
}
