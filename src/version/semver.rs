use semver::Version;

/// Strip surrounding whitespace and a single leading `v` or `=` from a version string.
///
/// Examples:
/// - " 1.2.3 " -> "1.2.3"
/// - "v1.2.3" -> "1.2.3"
/// - "=1.2.3" -> "1.2.3"
pub fn clean_version(version: &str) -> &str {
    let trimmed = version.trim();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed)
        .trim_start()
}

/// Parse a single exact semantic version, accepting a leading `v`/`=` and whitespace.
///
/// Partial versions ("1", "1.2") and ranges are rejected.
pub fn parse_exact(version: &str) -> Option<Version> {
    Version::parse(clean_version(version)).ok()
}

/// Whether the string is one exact, valid semantic version
pub fn is_valid_version(version: &str) -> bool {
    parse_exact(version).is_some()
}

/// Normalize a release tag into a semantic version string.
///
/// Returns `None` if the tag is not a valid version once cleaned.
///
/// Examples:
/// - "v4.1.0" -> Some("4.1.0")
/// - "release-2024" -> None
pub fn normalize_tag(tag: &str) -> Option<String> {
    parse_exact(tag).map(|v| v.to_string())
}

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix (use `clean_version` first if needed).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}
