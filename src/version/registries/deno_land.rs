//! deno.land/x module registry API implementation

use crate::version::error::RegistryError;
use crate::version::registry::{Registry, RegistryType};
use serde::Deserialize;
use tracing::warn;

/// Default base URL for the deno.land module API
pub const DEFAULT_BASE_URL: &str = "https://apiland.deno.dev";

/// Response from the module metadata endpoint
#[derive(Debug, Deserialize)]
struct ModuleResponse {
    latest_version: Option<String>,
}

/// Registry implementation for deno.land hosted modules
#[derive(Clone)]
pub struct DenoLandRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl DenoLandRegistry {
    /// Creates a new DenoLandRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for DenoLandRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for DenoLandRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::DenoLand
    }

    async fn fetch_latest_version(
        &self,
        package_name: &str,
    ) -> Result<Option<String>, RegistryError> {
        let url = format!("{}/v2/modules/{}", self.base_url, package_name);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("deno.land API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let module: ModuleResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse deno.land module response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(module.latest_version)
    }
}
