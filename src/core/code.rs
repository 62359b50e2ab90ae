use serde::{Deserialize, Serialize};

/// Canonical form of a business-key code: trimmed and ASCII-uppercased.
///
/// Catalog codes arrive from forms and imports with inconsistent casing and
/// stray whitespace (`"f32"`, `" F32 "`). Every comparison in this crate goes
/// through `NormalizedCode` so that lookups behave identically regardless of
/// how the code was typed. The original spelling is kept on the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    /// Normalize a raw code. Returns `None` for blank or whitespace-only
    /// input - the "no code" sentinel used for absent parent references.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    /// Normalize an optional raw code, treating `None` the same as blank.
    #[must_use]
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_uppercases() {
        let code = NormalizedCode::parse(" f32.1 ").unwrap();
        assert_eq!(code.as_str(), "F32.1");
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert!(NormalizedCode::parse("").is_none());
        assert!(NormalizedCode::parse("   ").is_none());
        assert!(NormalizedCode::parse("\t\n").is_none());
    }

    #[test]
    fn test_parse_opt() {
        assert!(NormalizedCode::parse_opt(None).is_none());
        assert!(NormalizedCode::parse_opt(Some("  ")).is_none());
        assert_eq!(
            NormalizedCode::parse_opt(Some("f30")).unwrap().as_str(),
            "F30"
        );
    }

    #[test]
    fn test_equality_ignores_case_and_whitespace() {
        assert_eq!(
            NormalizedCode::parse("f32"),
            NormalizedCode::parse(" F32 ")
        );
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        // Business codes sort as strings, not numbers: "F10" < "F9"
        let a = NormalizedCode::parse("F10").unwrap();
        let b = NormalizedCode::parse("F9").unwrap();
        assert!(a < b);
    }
}
