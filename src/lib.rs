//! pixi-build-ros - conda recipe generation for ROS packages
//!
//! This library turns a ROS package (a directory containing `package.xml`)
//! into a rattler-build recipe. Upstream dependency keys are translated
//! through a layered package map: the built-in RoboStack table first, then
//! user supplied map files, where later files replace earlier entries.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`ros_generation`): manifests, package maps, distros and recipes
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pixi_build_ros::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let use_case = GenerateRecipeUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Generate through the inbound port
//! let config = RosBackendConfig::new("noetic").with_extra_package_mapping("other_package_map.yaml");
//! let generated = use_case.generate_recipe(
//!     &ProjectModel::new(),
//!     &config,
//!     Path::new("src/custom_ros"),
//!     Platform::current(),
//! )?;
//!
//! // Format output
//! let output = YamlRecipeFormatter::new().format(&generated.recipe)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod ros_generation;
pub mod shared;

use adapters::outbound::filesystem::FileSystemReader;
use application::use_cases::merge_package_maps;
use ros_generation::domain::PackageMap;
use std::path::PathBuf;

/// Loads package map files from disk and merges them in order
///
/// # Examples
/// ```no_run
/// use pixi_build_ros::load_package_map_data;
/// use std::path::PathBuf;
///
/// let map = load_package_map_data(&[
///     PathBuf::from("robostack.yaml"),
///     PathBuf::from("other_package_map.yaml"),
/// ])
/// .unwrap();
/// assert!(map.contains("zlib"));
/// ```
pub fn load_package_map_data(sources: &[PathBuf]) -> shared::Result<PackageMap> {
    merge_package_maps(&FileSystemReader::new(), PackageMap::new(), sources, |_, _, _| {})
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonRecipeFormatter, YamlRecipeFormatter};
    pub use crate::application::dto::{GeneratedRecipe, OutputFormat, RecipeRequest};
    pub use crate::application::use_cases::GenerateRecipeUseCase;
    pub use crate::load_package_map_data;
    pub use crate::config::RosBackendConfig;
    pub use crate::ports::inbound::RecipeGenerator;
    pub use crate::ports::outbound::{
        OutputPresenter, PackageMapReader, PackageXmlReader, ProgressReporter, RecipeFormatter,
    };
    pub use crate::ros_generation::domain::{
        Distro, PackageMap, PackageMapEntry, Platform, ProjectModel, Recipe, RosPackageManifest,
    };
    pub use crate::ros_generation::services::{
        DependencyResolver, PackageXmlParser, RequirementsBuilder,
    };
    pub use crate::shared::Result;
}
