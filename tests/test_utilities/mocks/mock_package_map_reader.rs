use pixi_build_ros::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock PackageMapReader serving maps from memory, keyed by path
#[derive(Default)]
pub struct MockPackageMapReader {
    maps: HashMap<PathBuf, String>,
}

impl MockPackageMapReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers YAML content for a path
    pub fn with_map(mut self, path: impl Into<PathBuf>, yaml: impl Into<String>) -> Self {
        self.maps.insert(path.into(), yaml.into());
        self
    }
}

impl PackageMapReader for MockPackageMapReader {
    fn read_package_map(&self, path: &Path) -> Result<PackageMap> {
        match self.maps.get(path) {
            Some(yaml) => PackageMap::from_yaml_str(yaml),
            None => anyhow::bail!("Mock error: package map not found: {}", path.display()),
        }
    }
}
