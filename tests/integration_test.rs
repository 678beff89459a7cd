/// Integration tests for the application layer
mod test_utilities;

use pixi_build_ros::prelude::*;
use pixi_build_ros::ros_generation::domain::{CondaPackages, NoArchKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_utilities::mocks::*;

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> PathBuf {
    crate_root().join("tests").join("fixtures").join(name)
}

fn run_names(generated: &GeneratedRecipe) -> Vec<String> {
    generated
        .recipe
        .requirements
        .run
        .iter()
        .map(|item| item.name().to_string())
        .collect()
}

/// Copies a fixture package.xml into a fresh package directory
fn package_dir(xml_fixture: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::copy(
        fixture("package_xmls").join(xml_fixture),
        temp_dir.path().join("package.xml"),
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_merging_package_maps() {
    let package_map = load_package_map_data(&[
        crate_root().join("robostack.yaml"),
        fixture("other_package_map.yaml"),
    ])
    .unwrap();

    // Added by the later file
    let new_package = package_map.get("new_package").unwrap();
    assert_eq!(
        new_package.conda,
        Some(CondaPackages::All(vec!["new-package".to_string()]))
    );

    // Overridden by the later file
    let alsa_oss = package_map.get("alsa-oss").unwrap();
    assert_eq!(
        alsa_oss.conda,
        Some(CondaPackages::All(vec!["other-alsa-oss".to_string()]))
    );

    // Only in the earlier file
    assert!(package_map.contains("zlib"));
}

#[test]
fn test_merging_package_maps_order_matters() {
    let package_map = load_package_map_data(&[
        fixture("other_package_map.yaml"),
        crate_root().join("robostack.yaml"),
    ])
    .unwrap();

    let alsa_oss = package_map.get("alsa-oss").unwrap();
    assert_eq!(alsa_oss.conda_packages().unwrap().for_family(Some("linux")), vec!["alsa-oss"]);
    assert!(package_map.contains("new_package"));
}

#[test]
fn test_merging_package_maps_missing_file() {
    let result = load_package_map_data(&[
        crate_root().join("robostack.yaml"),
        fixture("does_not_exist.yaml"),
    ]);

    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("does_not_exist.yaml"));
}

#[test]
fn test_generate_recipe() {
    let package = package_dir("custom_ros.xml");
    let config = RosBackendConfig::new("noetic")
        .with_noarch(false)
        .with_extra_package_mapping(fixture("other_package_map.yaml"));

    let use_case = GenerateRecipeUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );
    let generated = use_case
        .generate_recipe(
            &ProjectModel::new(),
            &config,
            package.path(),
            Platform::Linux64,
        )
        .unwrap();

    assert_eq!(generated.package_name(), Some("ros-noetic-custom-ros"));

    let run = run_names(&generated);
    assert!(run.contains(&"ros-noetic-ros-package".to_string()));
    assert!(run.contains(&"ros-noetic-ros-package-msgs".to_string()));
    assert!(run.contains(&"ros-noetic-rospy".to_string()));
    assert!(!run.contains(&"ros-noetic-rclpy".to_string()));
    assert!(run.contains(&"zlib".to_string()));
    assert_eq!(generated.recipe.build.noarch, None);
}

#[test]
fn test_generate_recipe_relative_mapping_resolves_against_package() {
    let package = package_dir("custom_ros.xml");
    fs::copy(
        fixture("other_package_map.yaml"),
        package.path().join("maps.yaml"),
    )
    .unwrap();
    let config = RosBackendConfig::new("noetic").with_extra_package_mapping("maps.yaml");

    let use_case = GenerateRecipeUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );
    let generated = use_case
        .generate_recipe(&ProjectModel::new(), &config, package.path(), Platform::Linux64)
        .unwrap();

    assert!(run_names(&generated).contains(&"ros-noetic-ros-package-msgs".to_string()));
    assert_eq!(
        generated.metadata_input_globs,
        vec!["package.xml".to_string(), "maps.yaml".to_string()]
    );
}

#[test]
fn test_generate_recipe_with_mocks() {
    let xml = fs::read_to_string(fixture("package_xmls").join("custom_ros.xml")).unwrap();
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateRecipeUseCase::new(
        MockPackageXmlReader::new(xml),
        MockPackageMapReader::new().with_map(
            "/ws/src/custom_ros/extra.yaml",
            "ros_package:\n  conda: [ros-package-from-conda]\n",
        ),
        progress_reporter.clone(),
    );

    let config = RosBackendConfig::new("noetic")
        .with_noarch(true)
        .with_extra_package_mapping("extra.yaml");
    let generated = use_case
        .generate_recipe(
            &ProjectModel::new(),
            &config,
            Path::new("/ws/src/custom_ros"),
            Platform::Linux64,
        )
        .unwrap();

    let run = run_names(&generated);
    assert!(run.contains(&"ros-package-from-conda".to_string()));
    assert!(!run.contains(&"ros-noetic-ros-package".to_string()));
    assert_eq!(generated.recipe.build.noarch, Some(NoArchKind::Generic));

    let messages = progress_reporter.get_messages();
    assert!(messages
        .iter()
        .any(|m| m == "Progress: 1/1 - extra.yaml"));
    assert!(messages
        .iter()
        .any(|m| m.starts_with("Completed:") && m.contains("ros-noetic-custom-ros")));
}

#[test]
fn test_generate_recipe_manifest_read_failure() {
    let use_case = GenerateRecipeUseCase::new(
        MockPackageXmlReader::with_failure(),
        MockPackageMapReader::new(),
        MockProgressReporter::new(),
    );

    let result = use_case.generate_recipe(
        &ProjectModel::new(),
        &RosBackendConfig::new("noetic"),
        Path::new("/ws/src/missing"),
        Platform::Linux64,
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Mock error"));
}

#[test]
fn test_generate_recipe_ament_python() {
    let package = package_dir("talker_ament_python.xml");
    let use_case = GenerateRecipeUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );

    let generated = use_case
        .generate_recipe(
            &ProjectModel::new(),
            &RosBackendConfig::new("humble"),
            package.path(),
            Platform::Linux64,
        )
        .unwrap();

    let recipe = &generated.recipe;
    assert_eq!(generated.package_name(), Some("ros-humble-py-talker"));

    let host: Vec<&str> = recipe.requirements.host.iter().map(|i| i.name()).collect();
    assert!(host.contains(&"python"));
    assert!(host.contains(&"pip"));
    assert!(host.contains(&"setuptools"));
    assert!(recipe.requirements.build.is_empty());

    let run: Vec<String> = recipe
        .requirements
        .run
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(run.contains(&"ros-humble-rclpy".to_string()));
    assert!(run.contains(&"numpy".to_string()));
    assert!(run.contains(&"ros-humble-std-msgs >=2.0,<3.0".to_string()));
    assert!(!run.iter().any(|r| r.contains("pytest")));

    assert!(recipe
        .build
        .script
        .content
        .iter()
        .any(|line| line.contains("pip install")));
    assert_eq!(
        recipe.about.repository.as_deref(),
        Some("https://github.com/example/py_talker")
    );
    assert!(generated.build_input_globs.contains(&"setup.py".to_string()));
}

#[test]
fn test_generate_recipe_yaml_output() {
    let package = package_dir("custom_ros.xml");
    let use_case = GenerateRecipeUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );

    let generated = use_case
        .generate_recipe(
            &ProjectModel::new(),
            &RosBackendConfig::new("noetic"),
            package.path(),
            Platform::Linux64,
        )
        .unwrap();
    let yaml = YamlRecipeFormatter::new().format(&generated.recipe).unwrap();

    assert!(yaml.contains("name: ros-noetic-custom-ros"));
    assert!(yaml.contains("0.0.1"));
    assert!(yaml.contains("recipe-maintainers:"));
    assert!(yaml.contains("Demo Maintainer <maintainer@example.com>"));
}
