//! Resolution strategies, one per ecosystem, plus the URL dispatcher

pub mod deno_land;
pub mod github;
pub mod npm;
pub mod url;

pub use deno_land::DenoLandResolver;
pub use github::GitHubResolver;
pub use npm::NpmResolver;
pub use url::UrlResolver;

use crate::version::error::RegistryError;
use crate::version::resolver::{DependencyResolver, VersionPair};

/// Resolver for strategies this tool does not know; never touches the network
pub struct UnsupportedResolver;

#[async_trait::async_trait]
impl DependencyResolver for UnsupportedResolver {
    async fn resolve(&self, _reference: &str) -> Result<VersionPair, RegistryError> {
        Ok(VersionPair::unresolved())
    }
}
