//! deno.land hosted module resolver

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::version::cache::LatestVersionCache;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::resolver::{DependencyResolver, VersionPair, lookup_latest, split_reference};

/// Hostnames served by this resolver
pub const HOSTS: &[&str] = &["deno.land"];

/// Routing prefix for third-party modules (`/x/<module>@<version>/...`)
const THIRD_PARTY_PREFIX: &str = "x";

/// Resolves module URLs such as `https://deno.land/x/oak@v12.6.1/mod.ts`
///
/// Cached by module name, so every version of a module shares one lookup.
pub struct DenoLandResolver {
    registry: Arc<dyn Registry>,
    cache: LatestVersionCache,
}

impl DenoLandResolver {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            cache: LatestVersionCache::new("deno.land"),
        }
    }

    pub fn cache(&self) -> &LatestVersionCache {
        &self.cache
    }

    /// Extract `(module, version)` from a module URL path
    ///
    /// Examples:
    /// - "/x/oak@v12.6.1/mod.ts" -> ("oak", "v12.6.1")
    /// - "/std@0.200.0/path/mod.ts" -> ("std", "0.200.0")
    /// - "/x/oak/mod.ts" -> ("oak", "")
    pub fn parse_module(url: &Url) -> Option<(String, String)> {
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let first = segments.next()?;
        let module = if first == THIRD_PARTY_PREFIX {
            segments.next()?
        } else {
            first
        };

        let (name, version) = split_reference(module);
        Some((name.to_string(), version.to_string()))
    }

    pub async fn resolve_url(&self, url: &Url) -> Result<VersionPair, RegistryError> {
        let Some((name, version)) = Self::parse_module(url) else {
            debug!("No module in deno.land URL: {}", url);
            return Ok(VersionPair::unresolved());
        };

        let latest = lookup_latest(&self.cache, self.registry.as_ref(), &name).await?;

        Ok(VersionPair::new(Some(version), latest))
    }
}

#[async_trait::async_trait]
impl DependencyResolver for DenoLandResolver {
    async fn resolve(&self, reference: &str) -> Result<VersionPair, RegistryError> {
        match Url::parse(reference) {
            Ok(url) => self.resolve_url(&url).await,
            Err(e) => {
                debug!("Malformed URL {}: {}", reference, e);
                Ok(VersionPair::unresolved())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registry::MockRegistry;
    use mockall::predicate::function;
    use rstest::rstest;

    #[rstest]
    #[case("https://deno.land/x/oak@v12.6.1/mod.ts", Some(("oak", "v12.6.1")))]
    #[case("https://deno.land/std@0.200.0/path/mod.ts", Some(("std", "0.200.0")))]
    #[case("https://deno.land/x/oak/mod.ts", Some(("oak", "")))]
    #[case("https://deno.land/x/", None)]
    #[case("https://deno.land/", None)]
    fn parse_module_returns_expected(#[case] url: &str, #[case] expected: Option<(&str, &str)>) {
        let url = Url::parse(url).unwrap();
        assert_eq!(
            DenoLandResolver::parse_module(&url),
            expected.map(|(n, v)| (n.to_string(), v.to_string()))
        );
    }

    #[tokio::test]
    async fn resolve_shares_cache_across_module_versions() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_latest_version()
            .with(function(|name: &str| name == "oak"))
            .times(1)
            .returning(|_| Ok(Some("v12.6.1".to_string())));

        let resolver = DenoLandResolver::new(Arc::new(registry));

        let old = resolver
            .resolve("https://deno.land/x/oak@v11.0.0/mod.ts")
            .await
            .unwrap();
        let new = resolver
            .resolve("https://deno.land/x/oak@v12.6.1/router.ts")
            .await
            .unwrap();

        assert_eq!(
            old,
            VersionPair::new(Some("v11.0.0".to_string()), Some("v12.6.1".to_string()))
        );
        assert_eq!(
            new,
            VersionPair::new(Some("v12.6.1".to_string()), Some("v12.6.1".to_string()))
        );
    }

    #[tokio::test]
    async fn resolve_returns_unresolved_for_malformed_url() {
        // No expectations: any registry call would panic
        let registry = MockRegistry::new();
        let resolver = DenoLandResolver::new(Arc::new(registry));

        let result = resolver.resolve("not a url").await.unwrap();

        assert_eq!(result, VersionPair::unresolved());
        assert!(resolver.cache().is_empty());
    }
}
