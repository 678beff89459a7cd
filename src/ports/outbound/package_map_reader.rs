use crate::ros_generation::domain::PackageMap;
use crate::shared::Result;
use std::path::Path;

/// PackageMapReader port for loading package map files
pub trait PackageMapReader {
    /// Reads and parses one package map YAML file
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or not a valid map
    fn read_package_map(&self, path: &Path) -> Result<PackageMap>;
}
