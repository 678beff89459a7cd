use crate::application::dto::GeneratedRecipe;
use crate::config::RosBackendConfig;
use crate::ros_generation::domain::{Platform, ProjectModel};
use crate::shared::Result;
use std::path::Path;

/// RecipeGenerator - Inbound port a host build orchestrator calls
///
/// This is the backend's plugin surface: given the host's project model, the
/// backend configuration and the location of a ROS package, produce a recipe.
pub trait RecipeGenerator {
    /// Generates a recipe for the package at `manifest_path`
    ///
    /// # Arguments
    /// * `model` - Host project model supplying fallback metadata
    /// * `config` - Backend configuration (`distro`, `noarch`, ...)
    /// * `manifest_path` - Package directory or its package.xml
    /// * `host_platform` - Platform the recipe is generated for
    ///
    /// # Errors
    /// Returns an error if:
    /// - package.xml cannot be read or parsed
    /// - The configured distro is unknown
    /// - A package map cannot be read or parsed
    fn generate_recipe(
        &self,
        model: &ProjectModel,
        config: &RosBackendConfig,
        manifest_path: &Path,
        host_platform: Platform,
    ) -> Result<GeneratedRecipe>;
}
