//! Version classification for resolved dependencies

use serde::Serialize;
use tracing::info;

use crate::version::range::is_greater_than_range;
use crate::version::semver::is_valid_version;

/// Outcome of comparing a declared version with the latest upstream version
///
/// Variants are listed in the precedence order used by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckResult {
    /// Current version is missing, unparseable, or latest is not valid semver
    InvalidVersion,
    /// Upstream lookup failed or returned nothing
    NotFound,
    /// Latest version is above everything the current version (range) accepts
    Outdated,
    /// Current version accepts latest but is a range or tag, not an exact pin
    NotFixed,
    /// Current version is an exact pin accepted as latest
    Latest,
}

impl CheckResult {
    /// All outcomes, in precedence order
    pub const ALL: [CheckResult; 5] = [
        CheckResult::InvalidVersion,
        CheckResult::NotFound,
        CheckResult::Outdated,
        CheckResult::NotFixed,
        CheckResult::Latest,
    ];

    /// Returns the string representation of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::InvalidVersion => "invalid_version",
            CheckResult::NotFound => "not_found",
            CheckResult::Outdated => "outdated",
            CheckResult::NotFixed => "not_fixed",
            CheckResult::Latest => "latest",
        }
    }

    /// Single-character marker used in logs and reports
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckResult::InvalidVersion => "✗",
            CheckResult::NotFound => "?",
            CheckResult::Outdated => "↑",
            CheckResult::NotFixed => "~",
            CheckResult::Latest => "✓",
        }
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one dependency reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCheckSummaryItem {
    /// Package name, import-map alias or URL, depending on the scanned input
    pub package_name: String,
    pub current_version: Option<String>,
    pub latest_version: Option<String>,
    pub check_result: CheckResult,
}

/// Classify a `(current, latest)` pair
pub fn classify(current: Option<&str>, latest: Option<&str>) -> CheckResult {
    let Some(current) = current else {
        return CheckResult::InvalidVersion;
    };

    if latest.is_some_and(|latest| !is_valid_version(latest)) {
        return CheckResult::InvalidVersion;
    }

    let Some(latest) = latest else {
        return CheckResult::NotFound;
    };

    match is_greater_than_range(latest, current) {
        Err(_) => CheckResult::InvalidVersion,
        Ok(true) => CheckResult::Outdated,
        Ok(false) if !is_valid_version(current) => CheckResult::NotFixed,
        Ok(false) => CheckResult::Latest,
    }
}

/// Classify a dependency and log the outcome
pub fn check_version(
    package_name: &str,
    current_version: Option<String>,
    latest_version: Option<String>,
) -> VersionCheckSummaryItem {
    let check_result = classify(current_version.as_deref(), latest_version.as_deref());

    info!(
        "{} {} {} -> {}",
        check_result.symbol(),
        package_name,
        current_version.as_deref().unwrap_or("-"),
        latest_version.as_deref().unwrap_or("-"),
    );

    VersionCheckSummaryItem {
        package_name: package_name.to_string(),
        current_version,
        latest_version,
        check_result,
    }
}
