//! npm registry resolver

use std::sync::Arc;

use crate::version::cache::LatestVersionCache;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::resolver::{DependencyResolver, VersionPair, lookup_latest, split_reference};

/// Resolves bare package names (`lodash`, `@types/node@20.0.0`) against the npm registry
///
/// The `@version` suffix is ignored for the lookup. It is reported as the
/// current version when present, otherwise the current version is `None` and
/// the caller supplies it (e.g. from a package.json dependency block).
pub struct NpmResolver {
    registry: Arc<dyn Registry>,
    cache: LatestVersionCache,
}

impl NpmResolver {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            cache: LatestVersionCache::new("npm"),
        }
    }

    pub fn cache(&self) -> &LatestVersionCache {
        &self.cache
    }
}

#[async_trait::async_trait]
impl DependencyResolver for NpmResolver {
    async fn resolve(&self, reference: &str) -> Result<VersionPair, RegistryError> {
        let (name, version) = split_reference(reference.trim());
        let latest = lookup_latest(&self.cache, self.registry.as_ref(), name).await?;
        let current = (!version.is_empty()).then(|| version.to_string());

        Ok(VersionPair::new(current, latest))
    }
}
