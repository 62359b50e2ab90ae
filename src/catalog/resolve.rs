//! Per-entry level and breadcrumb resolution.
//!
//! These resolvers re-derive depth by walking parent links directly, so they
//! give correct answers in form workflows where a user has just picked a
//! parent and no full forest build is available yet. Both walks carry the
//! same hop ceiling: on cyclic or pathologically deep data they stop after
//! [`MAX_WALK_HOPS`] hops instead of looping, and callers treat a
//! ceiling-length result as data-quality feedback rather than a failure.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::code::NormalizedCode;
use crate::core::entry::CatalogEntry;

/// Hop ceiling for single-path parent walks. Generous - far beyond any
/// realistic taxonomy depth - so tripping it always means malformed data.
pub const MAX_WALK_HOPS: usize = 50;

/// One segment of a root-to-entry breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbSegment {
    pub level: u32,
    pub code: String,
    pub name: String,
}

/// Resolve the canonical level for a single entry.
///
/// - No parent code (after normalization): level 0.
/// - Parent found and it carries a stored level: `parent.level + 1`. The
///   stored value wins even when stale; the caller asked for the level the
///   catalog believes in.
/// - Parent found without a stored level: depth of the entry's resolvable
///   ancestor chain, bounded by [`MAX_WALK_HOPS`].
/// - Parent code does not resolve to any known entry: level 0. The dangling
///   reference stays visible on `entry.parent_code` for data-quality review.
#[must_use]
pub fn resolve_level(entry: &CatalogEntry, entries: &[CatalogEntry]) -> u32 {
    let Some(parent_key) = entry.parent_key() else {
        return 0;
    };

    let lookup = code_lookup(entries);
    let Some(&parent_idx) = lookup.get(&parent_key) else {
        return 0;
    };

    match entries[parent_idx].level {
        Some(parent_level) => parent_level + 1,
        None => walked_depth(entry, entries, &lookup),
    }
}

/// Build the root-to-entry breadcrumb trail for a starting code.
///
/// Walks upward from the starting entry, then reverses the chain; segment
/// levels are positional from the topmost resolved ancestor. An unknown
/// starting code yields an empty trail. A walk aborted by the hop ceiling
/// returns the segments accumulated so far - its length equals
/// [`MAX_WALK_HOPS`], which is how callers detect cyclic data.
#[must_use]
pub fn breadcrumb(start_code: &str, entries: &[CatalogEntry]) -> Vec<BreadcrumbSegment> {
    let Some(start_key) = NormalizedCode::parse(start_code) else {
        return Vec::new();
    };

    let lookup = code_lookup(entries);
    let Some(&start_idx) = lookup.get(&start_key) else {
        return Vec::new();
    };

    let mut chain = Vec::new();
    let mut current = start_idx;
    let mut hops = 0usize;
    loop {
        chain.push(current);
        hops += 1;
        if hops >= MAX_WALK_HOPS {
            break;
        }
        let Some(parent_key) = entries[current].parent_key() else {
            break;
        };
        let Some(&parent_idx) = lookup.get(&parent_key) else {
            break;
        };
        current = parent_idx;
    }

    chain.reverse();
    chain
        .into_iter()
        .enumerate()
        .map(|(level, i)| BreadcrumbSegment {
            level: level as u32,
            code: entries[i].code.clone(),
            name: entries[i].name.clone(),
        })
        .collect()
}

/// Normalized code → entry index. On duplicate normalized codes the later
/// entry in input order shadows the earlier, matching the precedence the
/// rest of the crate documents for malformed snapshots.
pub(crate) fn code_lookup(entries: &[CatalogEntry]) -> HashMap<NormalizedCode, usize> {
    let mut map = HashMap::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if let Some(key) = entry.code_key() {
            map.insert(key, i);
        }
    }
    map
}

/// Count resolvable ancestors above `entry`, stopping at the hop ceiling.
fn walked_depth(
    entry: &CatalogEntry,
    entries: &[CatalogEntry],
    lookup: &HashMap<NormalizedCode, usize>,
) -> u32 {
    let mut depth = 0u32;
    let mut current = entry;
    while (depth as usize) < MAX_WALK_HOPS {
        let Some(parent_key) = current.parent_key() else {
            break;
        };
        let Some(&parent_idx) = lookup.get(&parent_key) else {
            break;
        };
        depth += 1;
        current = &entries[parent_idx];
    }
    depth
}
