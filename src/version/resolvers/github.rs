//! GitHub source-hosted resolver

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::version::cache::LatestVersionCache;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::resolver::{DependencyResolver, VersionPair, lookup_latest};

/// Host serving raw files as `/<owner>/<repo>/<ref>/<path>`
pub const RAW_HOST: &str = "raw.githubusercontent.com";

/// Host serving files as `/<owner>/<repo>/{raw,blob,tree}/<ref>/<path>`
pub const WEB_HOST: &str = "github.com";

/// Hostnames served by this resolver
pub const HOSTS: &[&str] = &[RAW_HOST, WEB_HOST];

/// Repository and ref encoded in a GitHub file URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
    /// Tag, branch or commit as written in the URL
    pub git_ref: String,
}

impl RepositoryRef {
    /// Cache and lookup key (`owner/repo`)
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Resolves file URLs hosted on GitHub against the repository's latest release
pub struct GitHubResolver {
    registry: Arc<dyn Registry>,
    cache: LatestVersionCache,
}

impl GitHubResolver {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            cache: LatestVersionCache::new("github"),
        }
    }

    pub fn cache(&self) -> &LatestVersionCache {
        &self.cache
    }

    /// Extract owner, repo and ref from a GitHub URL
    pub fn parse_repository_ref(url: &Url) -> Option<RepositoryRef> {
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

        let (owner, repo, git_ref) = match (url.host_str()?, segments.as_slice()) {
            (RAW_HOST, [owner, repo, git_ref, ..]) => (*owner, *repo, *git_ref),
            (WEB_HOST, [owner, repo, "raw" | "blob" | "tree", git_ref, ..]) => {
                (*owner, *repo, *git_ref)
            }
            _ => return None,
        };

        Some(RepositoryRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            git_ref: git_ref.to_string(),
        })
    }

    pub async fn resolve_url(&self, url: &Url) -> Result<VersionPair, RegistryError> {
        let Some(repository) = Self::parse_repository_ref(url) else {
            debug!("No owner/repo/ref in GitHub URL: {}", url);
            return Ok(VersionPair::unresolved());
        };

        let latest = lookup_latest(&self.cache, self.registry.as_ref(), &repository.slug()).await?;

        Ok(VersionPair::new(Some(repository.git_ref), latest))
    }
}

#[async_trait::async_trait]
impl DependencyResolver for GitHubResolver {
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
    use crate::version::registry::{MockRegistry, RegistryType};
    use mockall::predicate::function;
    use rstest::rstest;

    #[rstest]
    #[case(
        "https://raw.githubusercontent.com/denoland/deno_std/0.200.0/path/mod.ts",
        Some(("denoland", "deno_std", "0.200.0"))
    )]
    #[case(
        "https://github.com/owner/repo/raw/v1.2.3/mod.ts",
        Some(("owner", "repo", "v1.2.3"))
    )]
    #[case(
        "https://github.com/owner/repo/blob/main/README.md",
        Some(("owner", "repo", "main"))
    )]
    #[case("https://raw.githubusercontent.com/owner/repo", None)]
    #[case("https://github.com/owner/repo", None)]
    #[case("https://github.com/owner/repo/issues/1", None)]
    fn parse_repository_ref_returns_expected(
        #[case] url: &str,
        #[case] expected: Option<(&str, &str, &str)>,
    ) {
        let url = Url::parse(url).unwrap();
        assert_eq!(
            GitHubResolver::parse_repository_ref(&url),
            expected.map(|(owner, repo, git_ref)| RepositoryRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
                git_ref: git_ref.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn resolve_returns_declared_ref_and_latest_release() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_latest_version()
            .with(function(|name: &str| name == "denoland/deno_std"))
            .times(1)
            .returning(|_| Ok(Some("0.224.0".to_string())));

        let resolver = GitHubResolver::new(Arc::new(registry));

        let pinned = resolver
            .resolve("https://raw.githubusercontent.com/denoland/deno_std/0.200.0/path/mod.ts")
            .await
            .unwrap();
        let branch = resolver
            .resolve("https://raw.githubusercontent.com/denoland/deno_std/main/fs/mod.ts")
            .await
            .unwrap();

        assert_eq!(
            pinned,
            VersionPair::new(Some("0.200.0".to_string()), Some("0.224.0".to_string()))
        );
        assert_eq!(
            branch,
            VersionPair::new(Some("main".to_string()), Some("0.224.0".to_string()))
        );
    }

    #[tokio::test]
    async fn resolve_caches_missing_release_as_none() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_latest_version()
            .times(1)
            .returning(|name| Err(RegistryError::NotFound(name.to_string())));
        registry
            .expect_registry_type()
            .returning(|| RegistryType::GitHub);

        let resolver = GitHubResolver::new(Arc::new(registry));

        let result = resolver
            .resolve("https://raw.githubusercontent.com/owner/repo/v1.0.0/mod.ts")
            .await
            .unwrap();

        assert_eq!(result, VersionPair::new(Some("v1.0.0".to_string()), None));
        assert_eq!(resolver.cache().get("owner/repo"), Some(None));
    }
}
