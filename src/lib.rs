//! # dx-catalog
//!
//! A library for reconstructing and querying hierarchical diagnostic-code
//! catalogs from flat entry lists.
//!
//! Clinical catalogs store taxonomy entries flat: each row carries a
//! business-key code and, optionally, the code of its parent. In real data
//! that parent reference is frequently missing, dangling (pointing at a code
//! nobody has), or even cyclic. `dx-catalog` rebuilds the forest from such a
//! list deterministically and never loops or crashes on malformed links:
//! bad references degrade to well-defined fallbacks instead.
//!
//! ## Features
//!
//! - **Cycle-safe flattening**: depth-annotated, pre-order display order for
//!   the whole forest, with cyclic islands kept as synthetic roots
//! - **Normalized lookups**: codes compare trimmed and case-folded, however
//!   they were typed
//! - **Per-entry resolution**: level and breadcrumb derivation that works
//!   before any full tree build, for form workflows
//! - **Safe parent selection**: candidate lists that block self-parenting
//! - **Data-quality reporting**: duplicates, dangling parents, and cycle
//!   members surfaced without affecting query results
//!
//! ## Example
//!
//! ```rust
//! use dx_catalog::{build_hierarchy, breadcrumb, CatalogEntry};
//!
//! let entries = vec![
//!     CatalogEntry::new("F30", "Manic episode"),
//!     CatalogEntry::new("F32", "Depressive episode").with_parent("F30"),
//!     CatalogEntry::new("F32.1", "Moderate depressive episode").with_parent("F32"),
//! ];
//!
//! // Flatten the forest: parents precede children, siblings sort by code
//! for node in build_hierarchy(&entries) {
//!     println!("{}{}", "  ".repeat(node.depth as usize), node.entry.code);
//! }
//!
//! // Root-to-entry trail for rendering "Category > Subcategory > Item"
//! let trail = breadcrumb("f32.1", &entries);
//! assert_eq!(trail.len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Store, children index, hierarchy builder, resolvers, and
//!   data-quality diagnosis
//! - [`core`]: Core data types for entries and normalized codes
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Query web service
//! - [`utils`]: Validation helpers and the snapshot signature

pub mod catalog;
pub mod cli;
pub mod core;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::candidates::{parent_candidates, CandidateRow, ParentCandidate};
pub use catalog::diagnosis::CatalogDiagnosis;
pub use catalog::hierarchy::{build_hierarchy, HierarchyNode, HierarchyRow};
pub use catalog::index::ChildrenIndex;
pub use catalog::resolve::{breadcrumb, resolve_level, BreadcrumbSegment, MAX_WALK_HOPS};
pub use catalog::store::{CatalogError, CatalogStore};
pub use core::code::NormalizedCode;
pub use core::entry::CatalogEntry;
