use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::scan::{ManifestSection, ResolverKind, ScanKind, ScanTarget};
use crate::version::registries::{deno_land, github, npm};

/// Environment variable holding the GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "VERSION_SCAN_LOG";

const APP_NAME: &str = "version-scan";

/// Scan configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    pub registries: RegistriesConfig,
    pub files: Vec<FileConfig>,
    pub manifest_sections: Vec<ManifestSection>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            registries: RegistriesConfig::default(),
            files: vec![
                FileConfig::new("package.json", ScanKind::Manifest),
                FileConfig::new("deno.json", ScanKind::ImportMap),
                FileConfig::new("import_map.json", ScanKind::ImportMap),
                FileConfig::new("deps.ts", ScanKind::Text),
                FileConfig::new("mod.ts", ScanKind::Text),
            ],
            manifest_sections: vec![
                ManifestSection::Dependencies,
                ManifestSection::DevDependencies,
            ],
        }
    }
}

impl ScanConfig {
    /// Resolve every file entry to its extractor and resolver
    pub fn targets(&self) -> Vec<ScanTarget> {
        self.files
            .iter()
            .map(|file| {
                let target = ScanTarget::new(&file.path, file.kind);
                let target = match file.resolver {
                    Some(resolver) => target.with_resolver(resolver),
                    None => target,
                };
                if target.resolver == ResolverKind::Unsupported {
                    warn!(
                        "Unsupported resolver configured for {}; its dependencies will not be resolved",
                        target.path
                    );
                }
                target
            })
            .collect()
    }
}

/// Registry endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistriesConfig {
    pub npm: RegistryConfig,
    pub deno_land: RegistryConfig,
    pub github: RegistryConfig,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            npm: RegistryConfig::new(npm::DEFAULT_BASE_URL),
            deno_land: RegistryConfig::new(deno_land::DEFAULT_BASE_URL),
            github: RegistryConfig::new(github::DEFAULT_BASE_URL),
        }
    }
}

/// Individual registry configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegistryConfig {
    pub url: String,
    /// A disabled registry is never queried; its lookups report no latest version
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RegistryConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            enabled: true,
        }
    }
}

/// A file to scan in every repository
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Path relative to the repository root
    pub path: String,
    pub kind: ScanKind,
    /// Overrides the kind's default resolver
    #[serde(default)]
    pub resolver: Option<ResolverKind>,
}

impl FileConfig {
    pub fn new(path: &str, kind: ScanKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
            resolver: None,
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load configuration from `explicit` or from the default config path.
///
/// A missing default file yields the default configuration; a missing
/// explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<ScanConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = config_path();
            if path.exists() {
                read_config(&path)
            } else {
                debug!("No config at {:?}, using defaults", path);
                Ok(ScanConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/version-scan/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/version-scan/config.json,
/// or ./version-scan/config.json if neither is available.
pub fn config_path() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

/// Returns the path to the data directory for version-scan.
/// Uses $XDG_DATA_HOME/version-scan if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-scan,
/// or ./version-scan if neither is available.
pub fn data_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-scan.log")
}

fn app_dir_with_env(
    xdg_home: Option<String>,
    home_dir: Option<PathBuf>,
    home_relative: &str,
) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
