//! Common types for scanning

use serde::{Deserialize, Serialize};

use crate::version::error::RegistryError;

/// Shape of a scanned file, selecting both the extractor and the default resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanKind {
    /// Manifest with name -> version dependency blocks (package.json)
    Manifest,
    /// Import map with an `imports` object (deno.json, import_map.json)
    ImportMap,
    /// Arbitrary source text containing quoted URLs
    Text,
}

impl ScanKind {
    /// Resolver used when a file entry does not name one
    pub fn default_resolver(&self) -> ResolverKind {
        match self {
            ScanKind::Manifest => ResolverKind::Npm,
            ScanKind::ImportMap | ScanKind::Text => ResolverKind::Url,
        }
    }
}

/// Resolution strategy named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolverKind {
    /// Bare npm package names
    Npm,
    /// `npm:` specifiers and URLs dispatched by host
    Url,
    /// Anything else; every reference resolves to an empty pair
    #[serde(other)]
    Unsupported,
}

/// A file to scan inside each repository, with its extractor and resolver fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Path relative to the repository root
    pub path: String,
    pub kind: ScanKind,
    pub resolver: ResolverKind,
}

impl ScanTarget {
    pub fn new(path: impl Into<String>, kind: ScanKind) -> Self {
        Self {
            path: path.into(),
            kind,
            resolver: kind.default_resolver(),
        }
    }

    pub fn with_resolver(mut self, resolver: ResolverKind) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Error type for scanning file content
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Transport fault while resolving a dependency
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// File content is not the JSON shape its kind requires
    #[error("Failed to parse file: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured file exists but could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""npm""#, ResolverKind::Npm)]
    #[case(r#""url""#, ResolverKind::Url)]
    #[case(r#""jsr""#, ResolverKind::Unsupported)]
    fn resolver_kind_deserializes_unknown_names_as_unsupported(
        #[case] json: &str,
        #[case] expected: ResolverKind,
    ) {
        assert_eq!(serde_json::from_str::<ResolverKind>(json).unwrap(), expected);
    }

    #[rstest]
    #[case(ScanKind::Manifest, ResolverKind::Npm)]
    #[case(ScanKind::ImportMap, ResolverKind::Url)]
    #[case(ScanKind::Text, ResolverKind::Url)]
    fn default_resolver_returns_expected(#[case] kind: ScanKind, #[case] expected: ResolverKind) {
        assert_eq!(kind.default_resolver(), expected);
    }
}
