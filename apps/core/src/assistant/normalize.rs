//! Text normalization applied before any pattern matching.

/// Lowercase, drop everything that is not an ASCII word character or
/// whitespace, then trim.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.trim().to_string()
}
