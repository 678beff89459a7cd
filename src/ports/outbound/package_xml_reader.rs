use crate::shared::Result;
use std::path::Path;

/// PackageXmlReader port for reading ROS package manifests
///
/// This port abstracts the file system operations needed to read
/// `package.xml` from a package directory.
pub trait PackageXmlReader {
    /// Reads the package.xml belonging to `manifest_path`
    ///
    /// # Arguments
    /// * `manifest_path` - Package directory, or the package.xml file itself
    ///
    /// # Returns
    /// The raw XML content
    ///
    /// # Errors
    /// Returns an error if:
    /// - package.xml does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_package_xml(&self, manifest_path: &Path) -> Result<String>;
}
