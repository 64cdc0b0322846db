//! Scan session owning the resolvers (and their caches) for one run

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::scan::import_map::{ImportMap, scan_import_map};
use crate::scan::manifest::{ManifestSection, parse_manifest, scan_manifest};
use crate::scan::text::scan_text;
use crate::scan::types::{ResolverKind, ScanError, ScanKind, ScanTarget};
use crate::version::cache::LatestVersionCache;
use crate::version::checker::VersionCheckSummaryItem;
use crate::version::registries::{
    DenoLandRegistry, DisabledRegistry, GitHubRegistry, NpmRegistry,
};
use crate::version::registry::{Registry, RegistryType};
use crate::version::resolver::DependencyResolver;
use crate::version::resolvers::{
    DenoLandResolver, GitHubResolver, NpmResolver, UnsupportedResolver, UrlResolver,
};

/// Resolvers shared by every file and repository scanned in one run
///
/// Each ecosystem resolver is created once, so its cache lives as long as the
/// session and a package is looked up at most once per run.
pub struct ScanSession {
    npm: Arc<NpmResolver>,
    deno_land: Arc<DenoLandResolver>,
    github: Arc<GitHubResolver>,
    url: UrlResolver,
    unsupported: UnsupportedResolver,
    manifest_sections: Vec<ManifestSection>,
}

impl ScanSession {
    pub fn new(
        npm_registry: Arc<dyn Registry>,
        deno_land_registry: Arc<dyn Registry>,
        github_registry: Arc<dyn Registry>,
    ) -> Self {
        let npm = Arc::new(NpmResolver::new(npm_registry));
        let deno_land = Arc::new(DenoLandResolver::new(deno_land_registry));
        let github = Arc::new(GitHubResolver::new(github_registry));
        let url = UrlResolver::new(npm.clone(), deno_land.clone(), github.clone());

        Self {
            npm,
            deno_land,
            github,
            url,
            unsupported: UnsupportedResolver,
            manifest_sections: vec![
                ManifestSection::Dependencies,
                ManifestSection::DevDependencies,
            ],
        }
    }

    /// Build a session talking to the registries named in `config`
    pub fn from_config(config: &ScanConfig, github_token: Option<String>) -> Self {
        let registries = &config.registries;

        let npm: Arc<dyn Registry> = if registries.npm.enabled {
            Arc::new(NpmRegistry::new(&registries.npm.url))
        } else {
            disabled(RegistryType::Npm)
        };
        let deno_land: Arc<dyn Registry> = if registries.deno_land.enabled {
            Arc::new(DenoLandRegistry::new(&registries.deno_land.url))
        } else {
            disabled(RegistryType::DenoLand)
        };
        let github: Arc<dyn Registry> = if registries.github.enabled {
            Arc::new(GitHubRegistry::new(&registries.github.url).with_token(github_token))
        } else {
            disabled(RegistryType::GitHub)
        };

        Self::new(npm, deno_land, github)
            .with_manifest_sections(config.manifest_sections.clone())
    }

    /// Dependency blocks read from manifest files
    pub fn with_manifest_sections(mut self, sections: Vec<ManifestSection>) -> Self {
        self.manifest_sections = sections;
        self
    }

    pub fn resolver(&self, kind: ResolverKind) -> &dyn DependencyResolver {
        match kind {
            ResolverKind::Npm => self.npm.as_ref(),
            ResolverKind::Url => &self.url,
            ResolverKind::Unsupported => &self.unsupported,
        }
    }

    pub fn npm_cache(&self) -> &LatestVersionCache {
        self.npm.cache()
    }

    pub fn deno_land_cache(&self) -> &LatestVersionCache {
        self.deno_land.cache()
    }

    pub fn github_cache(&self) -> &LatestVersionCache {
        self.github.cache()
    }

    /// Scan the raw content of one file with the extractor and resolver of `target`
    pub async fn scan_file(
        &self,
        target: &ScanTarget,
        content: &str,
    ) -> Result<Vec<VersionCheckSummaryItem>, ScanError> {
        let resolver = self.resolver(target.resolver);

        let results = match target.kind {
            ScanKind::Manifest => {
                let dependencies = parse_manifest(content, &self.manifest_sections)?;
                let declared = dependencies.iter().map(|(name, version)| (name, version));
                scan_manifest(declared, resolver).await?
            }
            ScanKind::ImportMap => {
                let import_map = ImportMap::parse(content)?;
                scan_import_map(&import_map, resolver).await?
            }
            ScanKind::Text => scan_text(content, resolver).await?,
        };

        Ok(results)
    }

    /// Scan every target present under `root`
    ///
    /// Files are read concurrently and scanned one after another in target
    /// order. Missing files are skipped and files whose content does not
    /// parse are logged and skipped; a transport fault aborts the scan.
    pub async fn scan_repository(
        &self,
        root: &Path,
        targets: &[ScanTarget],
    ) -> Result<Vec<VersionCheckSummaryItem>, ScanError> {
        let reads = targets.iter().map(|target| {
            let path = root.join(&target.path);
            async move {
                let content = tokio::fs::read_to_string(&path).await;
                (target, path, content)
            }
        });
        let files = join_all(reads).await;

        let mut results = Vec::new();
        for (target, path, content) in files {
            let content = match content {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Skipping missing file {:?}", path);
                    continue;
                }
                Err(source) => return Err(ScanError::Io { path, source }),
            };

            info!("Scanning {:?}", path);
            match self.scan_file(target, &content).await {
                Ok(items) => results.extend(items),
                Err(ScanError::Json(e)) => warn!("Skipping {:?}: {}", path, e),
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }
}

fn disabled(registry_type: RegistryType) -> Arc<dyn Registry> {
    info!("{} registry disabled", registry_type.as_str());
    Arc::new(DisabledRegistry::new(registry_type))
}
