//! Dependency resolver trait
//!
//! A resolver turns a raw dependency reference (package name, `name@version`
//! or URL) into the version it pins and the latest version upstream.

use tracing::debug;

use crate::version::cache::LatestVersionCache;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// Current and latest version of one dependency reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPair {
    /// Version declared by the reference itself, if its format carries one
    pub current: Option<String>,
    /// Latest upstream version, `None` if the lookup failed or found nothing
    pub latest: Option<String>,
}

impl VersionPair {
    pub fn new(current: Option<String>, latest: Option<String>) -> Self {
        Self { current, latest }
    }

    /// Pair for references that cannot be resolved at all
    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// Trait for ecosystem-specific resolution strategies
#[async_trait::async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Resolve a reference into its `(current, latest)` pair
    ///
    /// Registry failures are reported as a `None` latest version; only
    /// transport faults are returned as errors.
    async fn resolve(&self, reference: &str) -> Result<VersionPair, RegistryError>;
}

/// Split `name@version` on the last `@` that is not the first character.
///
/// Scoped names keep their leading `@`; a missing suffix yields an empty version.
///
/// Examples:
/// - "@scope/pkg@1.2.3" -> ("@scope/pkg", "1.2.3")
/// - "@scope/pkg" -> ("@scope/pkg", "")
/// - "oak@v12.6.1" -> ("oak", "v12.6.1")
pub fn split_reference(reference: &str) -> (&str, &str) {
    match reference.rfind('@') {
        Some(index) if index > 0 => (&reference[..index], &reference[index + 1..]),
        _ => (reference, ""),
    }
}

/// Look up the latest version of `key` through `cache`, fetching at most once.
///
/// Non-transport registry errors are memoized as `None`.
pub(crate) async fn lookup_latest(
    cache: &LatestVersionCache,
    registry: &dyn Registry,
    key: &str,
) -> Result<Option<String>, RegistryError> {
    cache
        .get_or_fetch(key, || async move {
            match registry.fetch_latest_version(key).await {
                Ok(latest) => Ok(latest),
                Err(e) if e.is_transport() => Err(e),
                Err(e) => {
                    debug!(
                        "{} lookup for {} failed: {}",
                        registry.registry_type().as_str(),
                        key,
                        e
                    );
                    Ok(None)
                }
            }
        })
        .await
}
