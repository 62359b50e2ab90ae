//! Centralized validation and helper functions.

use crate::core::entry::CatalogEntry;

/// Maximum number of entries allowed in a single catalog load
pub const MAX_ENTRIES: usize = 100_000;

/// Maximum accepted length for a business-key code
pub const MAX_CODE_LENGTH: usize = 64;

/// Why an entry failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    BlankCode,
    CodeTooLong,
    BlankName,
}

impl std::fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCode => write!(f, "code must be non-empty after trimming"),
            Self::CodeTooLong => {
                write!(f, "code exceeds maximum length of {MAX_CODE_LENGTH}")
            }
            Self::BlankName => write!(f, "name must be non-empty after trimming"),
        }
    }
}

/// Validate an entry the way the write path should before persisting it.
///
/// The hierarchy algorithms tolerate records that fail these checks - this
/// is for callers that accept user input and want to reject bad rows up
/// front.
///
/// # Errors
///
/// Returns the first failed check.
pub fn validate_entry(entry: &CatalogEntry) -> Result<(), EntryValidationError> {
    if entry.code.trim().is_empty() {
        return Err(EntryValidationError::BlankCode);
    }
    if entry.code.trim().len() > MAX_CODE_LENGTH {
        return Err(EntryValidationError::CodeTooLong);
    }
    if entry.name.trim().is_empty() {
        return Err(EntryValidationError::BlankName);
    }
    Ok(())
}

/// Compute a content signature for a snapshot of entries.
///
/// The signature is computed by:
/// 1. Rendering each entry as a `code|parent|level|active|name` line
///    (normalized code forms)
/// 2. Sorting the lines
/// 3. Computing MD5 of the joined lines
///
/// Two snapshots with the same entries in any order produce the same
/// signature, so callers can memoize derived hierarchies per unchanged
/// snapshot. The core itself never caches.
#[must_use]
pub fn snapshot_signature(entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "{}|{}|{}|{}|{}",
                e.code_key().map(|c| c.to_string()).unwrap_or_default(),
                e.parent_key().map(|c| c.to_string()).unwrap_or_default(),
                e.level.map(|l| l.to_string()).unwrap_or_default(),
                e.active,
                e.name
            )
        })
        .collect();
    lines.sort_unstable();
    let concatenated = lines.join("\n");
    let digest = md5::compute(concatenated.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry(&CatalogEntry::new("F32", "Depressive episode")).is_ok());
        assert_eq!(
            validate_entry(&CatalogEntry::new("  ", "Depressive episode")),
            Err(EntryValidationError::BlankCode)
        );
        assert_eq!(
            validate_entry(&CatalogEntry::new("F32", "   ")),
            Err(EntryValidationError::BlankName)
        );
        assert_eq!(
            validate_entry(&CatalogEntry::new("C".repeat(65), "Too long")),
            Err(EntryValidationError::CodeTooLong)
        );
    }

    #[test]
    fn test_signature_is_order_insensitive() {
        let a = CatalogEntry::new("F30", "Manic episode");
        let b = CatalogEntry::new("F32", "Depressive episode").with_parent("F30");

        let forward = snapshot_signature(&[a.clone(), b.clone()]);
        let backward = snapshot_signature(&[b, a]);
        assert_eq!(forward, backward);
        assert!(!forward.is_empty());
    }

    #[test]
    fn test_signature_changes_with_content() {
        let a = CatalogEntry::new("F30", "Manic episode");
        let moved = a.clone().with_parent("F00-F09");

        assert_ne!(snapshot_signature(&[a]), snapshot_signature(&[moved]));
    }

    #[test]
    fn test_signature_empty_snapshot() {
        assert_eq!(snapshot_signature(&[]), "");
    }
}
