use crate::ports::outbound::{PackageMapReader, PackageXmlReader};
use crate::ros_generation::domain::PackageMap;
use crate::shared::error::RosBackendError;
use crate::shared::security::read_file_checked;
use crate::shared::Result;
use std::path::{Path, PathBuf};

const PACKAGE_XML: &str = "package.xml";

/// FileSystemReader adapter for reading files from the file system
///
/// This adapter implements both PackageXmlReader and PackageMapReader ports,
/// providing file system access for manifests and package map files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Location of package.xml for a directory or direct file path
    pub fn package_xml_path(manifest_path: &Path) -> PathBuf {
        if manifest_path.is_dir() {
            manifest_path.join(PACKAGE_XML)
        } else {
            manifest_path.to_path_buf()
        }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageXmlReader for FileSystemReader {
    fn read_package_xml(&self, manifest_path: &Path) -> Result<String> {
        let package_xml = Self::package_xml_path(manifest_path);

        if !package_xml.exists() {
            return Err(RosBackendError::ManifestNotFound {
                path: package_xml,
                suggestion: format!(
                    "package.xml does not exist in \"{}\".\n   \
                     Please point the backend at the root directory of a ROS package.",
                    manifest_path.display()
                ),
            }
            .into());
        }

        read_file_checked(&package_xml, PACKAGE_XML).map_err(|e| {
            RosBackendError::FileReadError {
                path: package_xml,
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl PackageMapReader for FileSystemReader {
    fn read_package_map(&self, path: &Path) -> Result<PackageMap> {
        if !path.exists() {
            return Err(RosBackendError::PackageMapNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = read_file_checked(path, "package map").map_err(|e| {
            anyhow::Error::from(RosBackendError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })
        })?;

        PackageMap::from_yaml_str(&content).map_err(|e| {
            RosBackendError::PackageMapParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
