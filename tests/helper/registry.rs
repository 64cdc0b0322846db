//! Registry test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use version_scan::scan::ScanSession;
use version_scan::version::error::RegistryError;
use version_scan::version::registry::{Registry, RegistryType};

/// In-memory registry that records every lookup
pub struct MockRegistry {
    registry_type: RegistryType,
    latest: HashMap<String, Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new(registry_type: RegistryType) -> Self {
        Self {
            registry_type,
            latest: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latest(mut self, package: &str, latest: &str) -> Self {
        self.latest
            .insert(package.to_string(), Some(latest.to_string()));
        self
    }

    /// Package that exists upstream but publishes no usable version
    pub fn with_no_latest(mut self, package: &str) -> Self {
        self.latest.insert(package.to_string(), None);
        self
    }

    /// Number of lookups performed for `package`
    pub fn call_count(&self, package: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| *name == package)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    async fn fetch_latest_version(
        &self,
        package_name: &str,
    ) -> Result<Option<String>, RegistryError> {
        self.calls.lock().unwrap().push(package_name.to_string());

        match self.latest.get(package_name) {
            Some(latest) => Ok(latest.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Mock registries for the three ecosystems
pub struct TestRegistries {
    pub npm: Arc<MockRegistry>,
    pub deno_land: Arc<MockRegistry>,
    pub github: Arc<MockRegistry>,
}

impl TestRegistries {
    pub fn new(npm: MockRegistry, deno_land: MockRegistry, github: MockRegistry) -> Self {
        Self {
            npm: Arc::new(npm),
            deno_land: Arc::new(deno_land),
            github: Arc::new(github),
        }
    }

    pub fn session(&self) -> ScanSession {
        ScanSession::new(
            self.npm.clone(),
            self.deno_land.clone(),
            self.github.clone(),
        )
    }
}

/// Create a repository directory holding the given files
pub fn create_test_repository(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();

    for (path, content) in files {
        let path = dir.path().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    dir
}
