//! Manifest (package.json) scanning

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::version::checker::{VersionCheckSummaryItem, check_version};
use crate::version::error::RegistryError;
use crate::version::resolver::DependencyResolver;

/// Dependency block of a package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManifestSection {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

/// The dependency blocks of a package.json, in declaration order
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageManifest {
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
    peer_dependencies: IndexMap<String, String>,
    optional_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    fn section(&self, section: ManifestSection) -> &IndexMap<String, String> {
        match section {
            ManifestSection::Dependencies => &self.dependencies,
            ManifestSection::DevDependencies => &self.dev_dependencies,
            ManifestSection::PeerDependencies => &self.peer_dependencies,
            ManifestSection::OptionalDependencies => &self.optional_dependencies,
        }
    }
}

/// Collect the name -> version mapping of the given sections of a package.json
///
/// Sections are concatenated in the order given; each keeps its declaration order.
pub fn parse_manifest(
    content: &str,
    sections: &[ManifestSection],
) -> Result<Vec<(String, String)>, serde_json::Error> {
    let manifest: PackageManifest = serde_json::from_str(content)?;

    Ok(sections
        .iter()
        .flat_map(|section| manifest.section(*section).clone())
        .collect())
}

/// Check every declared dependency against its latest version
///
/// The resolver is called with the bare package name; the declared version is
/// always used as the current version.
pub async fn scan_manifest<'a, I>(
    dependencies: I,
    resolver: &dyn DependencyResolver,
) -> Result<Vec<VersionCheckSummaryItem>, RegistryError>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut results = Vec::new();

    for (name, declared_version) in dependencies {
        let pair = resolver.resolve(name).await?;
        results.push(check_version(name, Some(declared_version.clone()), pair.latest));
    }

    Ok(results)
}
