pub mod condition;
pub mod distro;
pub mod manifest;
pub mod package_map;
pub mod platform;
pub mod project_model;
pub mod recipe;

pub use condition::{Condition, ConditionContext};
pub use distro::{Distro, RosVersion};
pub use manifest::{BuildType, Person, RosDependency, RosPackageManifest, Url, VersionBounds};
pub use package_map::{CondaPackages, PackageMap, PackageMapEntry};
pub use platform::Platform;
pub use project_model::ProjectModel;
pub use recipe::{
    About, Build, Extra, NoArchKind, Recipe, RecipePackage, RequirementItem, Requirements,
    Script, Source, Value,
};
