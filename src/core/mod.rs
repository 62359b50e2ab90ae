//! Core data types for hierarchical catalog management.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`CatalogEntry`]: A single taxonomy record with a business-key code and
//!   optional parent code
//! - [`NormalizedCode`]: The canonical (trimmed, uppercased) form of a code
//!
//! ## Code Normalization
//!
//! Codes are business keys entered by humans, so `"f32"`, `"F32"` and
//! `" F32 "` must all resolve to the same entry. Every comparison in this
//! crate works on [`NormalizedCode`]; the original spelling is preserved on
//! the entry for display and round-tripping.

pub mod code;
pub mod entry;

pub use code::NormalizedCode;
pub use entry::CatalogEntry;
