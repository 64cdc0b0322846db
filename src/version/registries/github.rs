//! GitHub Releases API registry implementation

use crate::version::error::RegistryError;
use crate::version::registry::{Registry, RegistryType};
use crate::version::semver::normalize_tag;
use serde::Deserialize;
use tracing::warn;

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response from GitHub latest release API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Registry implementation for GitHub Releases API
#[derive(Clone)]
pub struct GitHubRegistry {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubRegistry {
    /// Creates a new GitHubRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Authenticate requests with a personal access token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

impl Default for GitHubRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for GitHubRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::GitHub
    }

    /// Fetches the latest release tag, normalized to a semantic version
    ///
    /// `package_name` is `owner/repo`. A tag that is not a valid version
    /// yields `Ok(None)`.
    async fn fetch_latest_version(
        &self,
        package_name: &str,
    ) -> Result<Option<String>, RegistryError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, package_name);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let release: Release = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let version = normalize_tag(&release.tag_name);
        if version.is_none() {
            warn!(
                "Latest release tag of {} is not a semantic version: {}",
                package_name, release.tag_name
            );
        }

        Ok(version)
    }
}
