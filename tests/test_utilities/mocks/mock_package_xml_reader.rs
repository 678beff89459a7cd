use pixi_build_ros::prelude::*;
use std::path::Path;

/// Mock PackageXmlReader for testing
pub struct MockPackageXmlReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockPackageXmlReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    #[allow(dead_code)]
    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl PackageXmlReader for MockPackageXmlReader {
    fn read_package_xml(&self, manifest_path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock error: package.xml not found in {}", manifest_path.display());
        }
        Ok(self.content.clone())
    }
}
