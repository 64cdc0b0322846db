//! npm-style version range expressions
//!
//! Supports the range syntax found in package.json, import maps and versioned URLs:
//! - `1.2.3`, `v1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1.2`, `1`, `*`, empty - wildcards
//! - `1.0.0 - 2.0.0` - hyphen range
//! - `>=1.0.0 <2.0.0` - AND of ranges, `^1.0.0 || ^2.0.0` - OR of ranges
//!
//! The main entry point is [`is_greater_than_range`], which answers whether a
//! version is strictly above every version a range would accept.

use semver::{Prerelease, Version};

use crate::version::error::RangeError;
use crate::version::semver::{clean_version, parse_exact, parse_version};

/// Top-level version specification
/// Handles compound ranges (AND, OR) as well as simple ranges
#[derive(Debug, Clone, PartialEq)]
pub enum VersionSpec {
    /// Single range (^1.0.0, >=1.0.0, etc.)
    Single(VersionRange),
    /// AND of ranges (>=1.0.0 <2.0.0) - space-separated, all must satisfy
    And(Vec<VersionSpec>),
    /// OR of specs (^1.0.0 || ^2.0.0) - any must satisfy
    Or(Vec<VersionSpec>),
}

impl VersionSpec {
    /// Parse a version specification string
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        // OR (||) has the lowest precedence
        if spec.contains("||") {
            let specs: Option<Vec<VersionSpec>> =
                spec.split("||").map(Self::parse_and_or_single).collect();
            return specs.map(VersionSpec::Or);
        }

        Self::parse_and_or_single(spec)
    }

    /// Parse a spec that may be AND (space-separated) or a single range
    fn parse_and_or_single(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if VersionRange::parse_hyphen(spec).is_some() {
            return VersionRange::parse(spec).map(VersionSpec::Single);
        }

        let parts = Self::split_and_parts(spec);

        if parts.len() > 1 {
            let ranges: Option<Vec<VersionSpec>> = parts
                .into_iter()
                .map(|p| VersionRange::parse(&p).map(VersionSpec::Single))
                .collect();
            ranges.map(VersionSpec::And)
        } else {
            VersionRange::parse(spec).map(VersionSpec::Single)
        }
    }

    /// Split spec into AND parts (space-separated ranges)
    ///
    /// An operator separated from its version by spaces (`>= 1.0.0`) stays one part.
    fn split_and_parts(spec: &str) -> Vec<String> {
        let mut parts: Vec<String> = Vec::new();
        let mut pending_operator: Option<&str> = None;

        for token in spec.split_whitespace() {
            let token_is_operator = token
                .chars()
                .all(|c| matches!(c, '<' | '>' | '=' | '^' | '~'));
            match pending_operator.take() {
                Some(op) => parts.push(format!("{op}{token}")),
                None if token_is_operator => pending_operator = Some(token),
                None => parts.push(token.to_string()),
            }
        }

        if let Some(op) = pending_operator {
            parts.push(op.to_string());
        }

        parts
    }

    /// Check if a version satisfies this spec
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.satisfies(version),
            VersionSpec::And(specs) => specs.iter().all(|s| s.satisfies(version)),
            VersionSpec::Or(specs) => specs.iter().any(|s| s.satisfies(version)),
        }
    }

    /// Check if a version lies above everything this spec accepts
    fn is_exceeded_by(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.upper_bound().is_exceeded_by(version),
            // The tightest upper bound of the conjunction wins
            VersionSpec::And(specs) => specs.iter().any(|s| s.is_exceeded_by(version)),
            VersionSpec::Or(specs) => specs.iter().all(|s| s.is_exceeded_by(version)),
        }
    }
}

/// Upper limit of the versions a range accepts
#[derive(Debug, Clone, PartialEq)]
enum UpperBound {
    Unbounded,
    Inclusive(Version),
    Exclusive(Version),
}

impl UpperBound {
    /// Exclusive bound at `ceiling`; no bound when the ceiling overflows
    fn below(ceiling: Option<Version>) -> Self {
        ceiling.map_or(UpperBound::Unbounded, UpperBound::Exclusive)
    }

    fn is_exceeded_by(&self, version: &Version) -> bool {
        match self {
            UpperBound::Unbounded => false,
            UpperBound::Inclusive(max) => version > max,
            UpperBound::Exclusive(limit) => version >= limit,
        }
    }
}

/// Represents a parsed npm version range
#[derive(Debug, Clone, PartialEq)]
pub enum VersionRange {
    /// Exact version match
    Exact(Version),
    /// Caret range: ^1.2.3 means >=1.2.3 <2.0.0 (or special cases for 0.x)
    Caret(Version),
    /// Tilde range: ~1.2.3 means >=1.2.3 <1.3.0
    Tilde(Version),
    /// Greater than or equal
    Gte(Version),
    /// Greater than
    Gt(Version),
    /// Less than or equal
    Lte(Version),
    /// Less than
    Lt(Version),
    /// Any version: `*`, `x` or an empty spec
    Any,
    /// Wildcard major: 1.x means >=1.0.0 <2.0.0
    WildcardMajor(u64),
    /// Wildcard minor: 1.2.x means >=1.2.0 <1.3.0
    WildcardMinor(u64, u64),
    /// Hyphen range: 1.0.0 - 2.0.0 means >=1.0.0 <=2.0.0
    Hyphen { from: Version, to: Box<VersionRange> },
}

impl VersionRange {
    /// Parse a version specification string into a VersionRange
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if let Some(range) = Self::parse_hyphen(spec) {
            return Some(range);
        }

        if let Some(rest) = spec.strip_prefix(">=") {
            Self::parse_partial(rest).map(|p| VersionRange::Gte(p.lower()))
        } else if let Some(rest) = spec.strip_prefix('>') {
            Self::parse_partial(rest).map(|p| match p.exclusive_ceiling() {
                // >1.2 means >=1.3.0
                Some(ceiling) => VersionRange::Gte(ceiling),
                None if p == VersionRange::Any => VersionRange::Lt(Version::new(0, 0, 0)),
                None => VersionRange::Gt(p.lower()),
            })
        } else if let Some(rest) = spec.strip_prefix("<=") {
            Self::parse_partial(rest).map(|p| match p.exclusive_ceiling() {
                // <=1.2 means <1.3.0
                Some(ceiling) => VersionRange::Lt(ceiling),
                None if p == VersionRange::Any => VersionRange::Any,
                None => VersionRange::Lte(p.lower()),
            })
        } else if let Some(rest) = spec.strip_prefix('<') {
            Self::parse_partial(rest).map(|p| VersionRange::Lt(p.lower()))
        } else if let Some(rest) = spec.strip_prefix('^') {
            parse_version(clean_version(rest)).map(VersionRange::Caret)
        } else if let Some(rest) = spec.strip_prefix('~') {
            let rest = rest.strip_prefix('>').unwrap_or(rest);
            match Self::parse_partial(rest)? {
                // ~1 means 1.x
                range @ VersionRange::WildcardMajor(_) => Some(range),
                other => Some(VersionRange::Tilde(other.lower())),
            }
        } else {
            Self::parse_partial(spec)
        }
    }

    /// Parse a bare version which may be partial or contain wildcards
    fn parse_partial(spec: &str) -> Option<Self> {
        let spec = clean_version(spec);

        if spec.is_empty() || is_wildcard(spec) {
            return Some(VersionRange::Any);
        }

        if let Ok(version) = Version::parse(spec) {
            return Some(VersionRange::Exact(version));
        }

        let parts: Vec<&str> = spec.split('.').collect();

        match parts.as_slice() {
            [major] => major.parse::<u64>().ok().map(VersionRange::WildcardMajor),
            [major, minor] if is_wildcard(*minor) => {
                major.parse::<u64>().ok().map(VersionRange::WildcardMajor)
            }
            [major, minor, patch] if is_wildcard(*minor) && is_wildcard(*patch) => {
                major.parse::<u64>().ok().map(VersionRange::WildcardMajor)
            }
            [major, minor] | [major, minor, _] => {
                if let [_, _, patch] = parts.as_slice()
                    && !is_wildcard(*patch)
                {
                    return None;
                }
                let major = major.parse::<u64>().ok()?;
                let minor = minor.parse::<u64>().ok()?;
                Some(VersionRange::WildcardMinor(major, minor))
            }
            _ => None,
        }
    }

    /// Parse hyphen range like "1.0.0 - 2.0.0"
    fn parse_hyphen(spec: &str) -> Option<Self> {
        let parts: Vec<&str> = spec.split(" - ").collect();
        if parts.len() != 2 {
            return None;
        }

        let from = parse_version(clean_version(parts[0]))?;
        let to = Self::parse_partial(parts[1])?;

        Some(VersionRange::Hyphen {
            from,
            to: Box::new(to),
        })
    }

    /// Lowest version this partial version denotes
    fn lower(&self) -> Version {
        match self {
            VersionRange::Exact(v) => v.clone(),
            VersionRange::WildcardMajor(major) => Version::new(*major, 0, 0),
            VersionRange::WildcardMinor(major, minor) => Version::new(*major, *minor, 0),
            _ => Version::new(0, 0, 0),
        }
    }

    /// Exclusive ceiling for wildcard forms
    ///
    /// `None` for exact or unbounded forms, and when the ceiling would overflow `u64`.
    fn exclusive_ceiling(&self) -> Option<Version> {
        match self {
            VersionRange::WildcardMajor(major) => Some(floor(major.checked_add(1)?, 0, 0)),
            VersionRange::WildcardMinor(major, minor) => {
                Some(floor(*major, minor.checked_add(1)?, 0))
            }
            _ => None,
        }
    }

    /// Check if a version satisfies this range
    fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionRange::Exact(v) => version == v,
            VersionRange::Any => true,
            VersionRange::Gt(v) => version > v,
            _ => version >= &self.lower_bound() && !self.upper_bound().is_exceeded_by(version),
        }
    }

    /// Smallest accepted version for the bounded forms
    fn lower_bound(&self) -> Version {
        match self {
            VersionRange::Caret(v) | VersionRange::Tilde(v) | VersionRange::Gte(v) => v.clone(),
            VersionRange::Hyphen { from, .. } => from.clone(),
            VersionRange::Lte(_) | VersionRange::Lt(_) => Version::new(0, 0, 0),
            other => other.lower(),
        }
    }

    fn upper_bound(&self) -> UpperBound {
        match self {
            VersionRange::Exact(v) | VersionRange::Lte(v) => UpperBound::Inclusive(v.clone()),
            VersionRange::Lt(v) => UpperBound::Exclusive(v.clone()),
            VersionRange::Gte(_) | VersionRange::Gt(_) | VersionRange::Any => UpperBound::Unbounded,
            // ^1.2.3 -> <2.0.0, ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.0.4
            VersionRange::Caret(v) if v.major > 0 => {
                UpperBound::below(v.major.checked_add(1).map(|major| floor(major, 0, 0)))
            }
            VersionRange::Caret(v) if v.minor > 0 => {
                UpperBound::below(v.minor.checked_add(1).map(|minor| floor(0, minor, 0)))
            }
            VersionRange::Caret(v) => {
                UpperBound::below(v.patch.checked_add(1).map(|patch| floor(0, 0, patch)))
            }
            VersionRange::Tilde(v) => {
                UpperBound::below(v.minor.checked_add(1).map(|minor| floor(v.major, minor, 0)))
            }
            VersionRange::WildcardMajor(_) | VersionRange::WildcardMinor(_, _) => {
                UpperBound::below(self.exclusive_ceiling())
            }
            VersionRange::Hyphen { to, .. } => match to.as_ref() {
                VersionRange::Any => UpperBound::Unbounded,
                VersionRange::Exact(v) => UpperBound::Inclusive(v.clone()),
                partial => UpperBound::below(partial.exclusive_ceiling()),
            },
        }
    }
}

fn is_wildcard(part: &str) -> bool {
    part == "*" || part.eq_ignore_ascii_case("x")
}

/// Lowest possible version of `major.minor.patch`, prereleases included (`x.y.z-0`)
fn floor(major: u64, minor: u64, patch: u64) -> Version {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").expect("`0` is a valid prerelease identifier");
    version
}

/// Whether `version` is strictly greater than every version `range` accepts.
///
/// Errors when either side cannot be parsed.
pub fn is_greater_than_range(version: &str, range: &str) -> Result<bool, RangeError> {
    let version =
        parse_exact(version).ok_or_else(|| RangeError::InvalidVersion(version.to_string()))?;
    let spec = VersionSpec::parse(range).ok_or_else(|| RangeError::InvalidRange(range.to_string()))?;

    if spec.satisfies(&version) {
        return Ok(false);
    }

    Ok(spec.is_exceeded_by(&version))
}
