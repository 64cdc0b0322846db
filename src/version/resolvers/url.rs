//! Dispatching resolver for import-map locators and free-text URLs

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::resolver::{DependencyResolver, VersionPair};
use crate::version::resolvers::{DenoLandResolver, GitHubResolver, NpmResolver, deno_land, github};

/// Prefix marking an npm package specifier (`npm:preact@10.19.0`)
pub const NPM_PREFIX: &str = "npm:";

/// Routes a locator to the resolver of its ecosystem
///
/// `npm:` specifiers go to the npm resolver; URLs are routed by hostname.
/// Malformed URLs and unknown hosts resolve to an empty pair without any
/// network access.
pub struct UrlResolver {
    npm: Arc<NpmResolver>,
    deno_land: Arc<DenoLandResolver>,
    github: Arc<GitHubResolver>,
}

impl UrlResolver {
    pub fn new(
        npm: Arc<NpmResolver>,
        deno_land: Arc<DenoLandResolver>,
        github: Arc<GitHubResolver>,
    ) -> Self {
        Self {
            npm,
            deno_land,
            github,
        }
    }
}

#[async_trait::async_trait]
impl DependencyResolver for UrlResolver {
    async fn resolve(&self, reference: &str) -> Result<VersionPair, RegistryError> {
        if let Some(spec) = reference.strip_prefix(NPM_PREFIX) {
            return self.npm.resolve(spec).await;
        }

        let url = match Url::parse(reference) {
            Ok(url) => url,
            Err(e) => {
                debug!("Malformed URL {}: {}", reference, e);
                return Ok(VersionPair::unresolved());
            }
        };

        match url.host_str() {
            Some(host) if deno_land::HOSTS.contains(&host) => self.deno_land.resolve_url(&url).await,
            Some(host) if github::HOSTS.contains(&host) => self.github.resolve_url(&url).await,
            _ => {
                debug!("Unsupported host, skipping: {}", reference);
                Ok(VersionPair::unresolved())
            }
        }
    }
}
