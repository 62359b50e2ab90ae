use serde::{Deserialize, Serialize};

use crate::core::code::NormalizedCode;

/// A single catalog entry: one taxonomy record with a business-key code and
/// an optional parent code.
///
/// The persistence layer is the source of truth for these records; this crate
/// only ever sees an immutable snapshot of them. `parent_code` and `level`
/// are stored as provided - a dangling parent reference or a stale level is
/// kept visible so upstream data-quality review can see it, while the
/// hierarchy algorithms degrade to safe fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Business key, unique within an active snapshot. Compared
    /// case-insensitively but stored as provided.
    pub code: String,

    /// Display label, required, non-empty after trimming.
    pub name: String,

    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,

    /// Optional reference to another entry's `code`. Absent means the entry
    /// is a root candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,

    /// Stored level. Authoritative only when consistent with the computed
    /// parent chain; otherwise advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Visibility flag. The hierarchy builders never filter on this -
    /// visibility policy belongs to the caller.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
            parent_code: None,
            level: None,
            active: true,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Normalized form of this entry's own code. `None` only for malformed
    /// records whose code is blank.
    #[must_use]
    pub fn code_key(&self) -> Option<NormalizedCode> {
        NormalizedCode::parse(&self.code)
    }

    /// Normalized form of the parent reference. `None` means "root
    /// candidate": the field is absent, blank, or whitespace-only.
    #[must_use]
    pub fn parent_key(&self) -> Option<NormalizedCode> {
        NormalizedCode::parse_opt(self.parent_code.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let entry = CatalogEntry::new("F32.1", "Moderate depressive episode")
            .with_parent("F32")
            .with_level(2);

        assert_eq!(entry.code, "F32.1");
        assert_eq!(entry.parent_code.as_deref(), Some("F32"));
        assert_eq!(entry.level, Some(2));
        assert!(entry.active);
    }

    #[test]
    fn test_parent_key_normalizes() {
        let entry = CatalogEntry::new("F32.1", "Moderate").with_parent(" f32 ");
        assert_eq!(entry.parent_key().unwrap().as_str(), "F32");
    }

    #[test]
    fn test_blank_parent_is_root_candidate() {
        let entry = CatalogEntry::new("F30", "Manic episode").with_parent("   ");
        assert!(entry.parent_key().is_none());
        // The raw field keeps the anomaly visible
        assert_eq!(entry.parent_code.as_deref(), Some("   "));
    }

    #[test]
    fn test_serde_defaults() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"code": "F30", "name": "Manic episode"}"#).unwrap();
        assert!(entry.active);
        assert!(entry.description.is_empty());
        assert!(entry.parent_code.is_none());
        assert!(entry.level.is_none());
    }
}
