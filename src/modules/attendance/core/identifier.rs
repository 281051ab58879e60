// Canonical form of a student registration number.
//
// Purpose
// - Make spreadsheet identifiers and participation identifiers comparable.
//
// Boundaries
// - Pure function, used by both ingestion and matching. Both call sites must go through here.

/// Trim, lower-case, drop whitespace and keep only ASCII letters, digits and `_`.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
