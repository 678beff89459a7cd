use crate::config::RosBackendConfig;
use crate::ros_generation::domain::{Platform, ProjectModel};
use std::path::PathBuf;

/// RecipeRequest - Input of the recipe generation use case
#[derive(Debug, Clone)]
pub struct RecipeRequest {
    /// Host project model supplying fallback metadata
    pub model: ProjectModel,
    pub config: RosBackendConfig,
    /// Package directory, or the package.xml inside it
    pub manifest_path: PathBuf,
    pub host_platform: Platform,
}

impl RecipeRequest {
    pub fn new(
        model: ProjectModel,
        config: RosBackendConfig,
        manifest_path: PathBuf,
        host_platform: Platform,
    ) -> Self {
        Self {
            model,
            config,
            manifest_path,
            host_platform,
        }
    }

    /// Directory containing package.xml
    ///
    /// Relative package map paths and the recipe source resolve against it.
    pub fn manifest_root(&self) -> PathBuf {
        let is_package_xml = self
            .manifest_path
            .file_name()
            .is_some_and(|name| name == "package.xml");
        if is_package_xml && !self.manifest_path.is_dir() {
            self.manifest_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default()
        } else {
            self.manifest_path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str) -> RecipeRequest {
        RecipeRequest::new(
            ProjectModel::new(),
            RosBackendConfig::new("noetic"),
            PathBuf::from(path),
            Platform::Linux64,
        )
    }

    #[test]
    fn test_manifest_root_for_directory() {
        assert_eq!(
            request("/ws/src/talker").manifest_root(),
            PathBuf::from("/ws/src/talker")
        );
    }

    #[test]
    fn test_manifest_root_for_package_xml() {
        assert_eq!(
            request("/ws/src/talker/package.xml").manifest_root(),
            PathBuf::from("/ws/src/talker")
        );
    }
}
