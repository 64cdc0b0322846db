//! Registry implementations for fetching latest package versions

pub mod deno_land;
pub mod github;
pub mod npm;

pub use deno_land::DenoLandRegistry;
pub use github::GitHubRegistry;
pub use npm::NpmRegistry;

use crate::version::error::RegistryError;
use crate::version::registry::{Registry, RegistryType};

/// User agent sent with every registry request
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Stand-in for a registry switched off in configuration
///
/// Every lookup reports no latest version without touching the network.
pub struct DisabledRegistry {
    registry_type: RegistryType,
}

impl DisabledRegistry {
    pub fn new(registry_type: RegistryType) -> Self {
        Self { registry_type }
    }
}

#[async_trait::async_trait]
impl Registry for DisabledRegistry {
    fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    async fn fetch_latest_version(
        &self,
        _package_name: &str,
    ) -> Result<Option<String>, RegistryError> {
        Ok(None)
    }
}
