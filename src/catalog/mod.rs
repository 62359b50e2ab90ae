//! Catalog storage, indexing, and hierarchy reconstruction.
//!
//! The persistence layer stores catalog entries flat; the only structure is
//! the `parent_code` foreign key on each row, which may be missing, dangling,
//! or cyclic. This module turns those flat snapshots back into a usable
//! forest:
//!
//! - [`store::CatalogStore`]: snapshot container with the list / create /
//!   update / search surface, plus the embedded default catalog
//! - [`index::ChildrenIndex`]: normalized parent code → sorted children
//! - [`hierarchy::build_hierarchy`]: cycle-safe, depth-annotated pre-order
//!   flattening of the whole forest (the display order)
//! - [`resolve::resolve_level`] / [`resolve::breadcrumb`]: per-entry level
//!   and trail resolution for form workflows
//! - [`candidates::parent_candidates`]: legal parent choices for an entry
//!   being edited
//! - [`diagnosis::CatalogDiagnosis`]: data-quality report over a snapshot
//!
//! ## Embedded Catalog
//!
//! A default catalog of ICD-10-style mental and behavioural disorder codes
//! is compiled into the binary; custom catalogs load from JSON files with
//! the same shape.
//!
//! ## Malformed Data
//!
//! None of these operations error on bad parent links. Dangling or blank
//! references degrade to "treat as root"; cycles are contained by visited
//! bookkeeping (full traversals) and a hop ceiling (single-path walks); the
//! anomalies stay visible through [`diagnosis::CatalogDiagnosis`].

pub mod candidates;
pub mod diagnosis;
pub mod hierarchy;
pub mod index;
pub mod resolve;
pub mod store;
