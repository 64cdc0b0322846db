//! Registry trait for fetching the latest version of a package

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Ecosystem a registry or resolver serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryType {
    /// npm registry (package.json, `npm:` specifiers)
    Npm,
    /// deno.land/x hosted modules
    DenoLand,
    /// GitHub releases (raw.githubusercontent.com / github.com URLs)
    GitHub,
}

impl RegistryType {
    /// Returns the string representation of the registry type
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::Npm => "npm",
            RegistryType::DenoLand => "deno_land",
            RegistryType::GitHub => "github",
        }
    }
}

/// Trait for fetching the latest published version from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the type of registry this implementation handles
    fn registry_type(&self) -> RegistryType;

    /// Fetches the latest version for a package
    ///
    /// # Arguments
    /// * `package_name` - The lookup key (e.g., "lodash", "oak", "denoland/deno")
    ///
    /// # Returns
    /// * `Ok(Some(version))` - The latest version
    /// * `Ok(None)` - The package exists but publishes no usable version
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_latest_version(&self, package_name: &str)
    -> Result<Option<String>, RegistryError>;
}
