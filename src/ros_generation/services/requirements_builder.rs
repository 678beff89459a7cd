use super::DependencyResolver;
use crate::ros_generation::domain::{
    BuildType, ConditionContext, Distro, PackageMap, Platform, RequirementItem, Requirements,
    RosDependency, RosPackageManifest,
};
use std::collections::{BTreeMap, HashSet};

/// Python version advertised to `condition` expressions
const ROS_PYTHON_VERSION: &str = "3";

/// RequirementsBuilder service assembling build/host/run requirement lists
///
/// Pure logic: evaluates dependency conditions, resolves each name through
/// the package map and adds the toolchain the build type needs.
pub struct RequirementsBuilder;

impl RequirementsBuilder {
    /// Builds the recipe requirements for a manifest
    ///
    /// # Arguments
    /// * `manifest` - Parsed package.xml
    /// * `build_type` - Effective build type of the package
    /// * `distro` - Target distribution
    /// * `platform` - Host platform
    /// * `package_map` - Merged mapping table
    /// * `env` - Extra variables overlaid on the condition context
    pub fn build(
        manifest: &RosPackageManifest,
        build_type: &BuildType,
        distro: &Distro,
        platform: Platform,
        package_map: &PackageMap,
        env: &BTreeMap<String, String>,
    ) -> Requirements {
        let context = Self::condition_context(distro, env);
        let resolve = |groups: &[&[RosDependency]]| -> Vec<RequirementItem> {
            groups
                .iter()
                .flat_map(|deps| deps.iter())
                .filter(|dep| Self::is_active(dep, &context))
                .filter(|dep| dep.name != manifest.name)
                .flat_map(|dep| Self::resolve_dependency(dep, distro, platform, package_map))
                .collect()
        };

        let mut build = Self::build_toolchain(build_type, platform);
        build.extend(resolve(&[manifest.buildtool_depends.as_slice()]));

        let mut host = resolve(&[
            manifest.buildtool_depends.as_slice(),
            manifest.build_depends.as_slice(),
            manifest.buildtool_export_depends.as_slice(),
            manifest.build_export_depends.as_slice(),
        ]);
        if build_type.is_python() {
            host.extend(["python", "pip", "setuptools"].map(RequirementItem::new));
        }

        let mut run = resolve(&[
            manifest.exec_depends.as_slice(),
            manifest.build_export_depends.as_slice(),
            manifest.buildtool_export_depends.as_slice(),
        ]);
        if build_type.is_python() {
            run.push(RequirementItem::new("python"));
        }

        Requirements {
            build: dedup(build),
            host: dedup(host),
            run: dedup(run),
        }
    }

    /// Variables visible to `condition` attributes
    ///
    /// `ROS_VERSION`, `ROS_DISTRO` and `ROS_PYTHON_VERSION` are derived from
    /// the distro; entries of `env` override them.
    pub fn condition_context(distro: &Distro, env: &BTreeMap<String, String>) -> ConditionContext {
        let mut context = ConditionContext::from([
            (
                "ROS_VERSION".to_string(),
                distro.ros_version().as_env_value().to_string(),
            ),
            ("ROS_DISTRO".to_string(), distro.name().to_string()),
            (
                "ROS_PYTHON_VERSION".to_string(),
                ROS_PYTHON_VERSION.to_string(),
            ),
        ]);
        context.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        context
    }

    fn is_active(dep: &RosDependency, context: &ConditionContext) -> bool {
        let active = dep.applies(context);
        if !active {
            tracing::debug!(
                dependency = %dep.name,
                condition = %dep.condition.as_ref().map(|c| c.as_str()).unwrap_or_default(),
                "condition is false; skipping dependency"
            );
        }
        active
    }

    fn resolve_dependency(
        dep: &RosDependency,
        distro: &Distro,
        platform: Platform,
        package_map: &PackageMap,
    ) -> Vec<RequirementItem> {
        let names = DependencyResolver::resolve(&dep.name, distro, platform, package_map);
        // Version bounds refer to the ROS package; remapped names version differently.
        let constraint = if package_map.contains(&dep.name) {
            None
        } else {
            dep.version.to_constraint()
        };
        names
            .into_iter()
            .map(|name| RequirementItem::with_constraint(name, constraint.clone()))
            .collect()
    }

    fn build_toolchain(build_type: &BuildType, platform: Platform) -> Vec<RequirementItem> {
        if !build_type.is_cmake_based() {
            return Vec::new();
        }
        let mut toolchain: Vec<RequirementItem> = [
            "${{ compiler('c') }}",
            "${{ compiler('cxx') }}",
            "cmake",
            "ninja",
        ]
        .map(RequirementItem::new)
        .to_vec();
        if platform.is_unix() {
            toolchain.push(RequirementItem::new("pkg-config"));
        }
        toolchain
    }
}

/// Removes repeated package names, keeping the first occurrence
fn dedup(items: Vec<RequirementItem>) -> Vec<RequirementItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.name().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ros_generation::services::PackageXmlParser;

    fn names(items: &[RequirementItem]) -> Vec<String> {
        items.iter().map(|i| i.to_string()).collect()
    }

    fn map() -> PackageMap {
        PackageMap::from_yaml_str(
            r#"
boost:
  conda: [libboost-devel]
ros_package:
  ros: [ros_package, ros_package_msgs]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_catkin_package_requirements() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="2">
  <name>custom_ros</name>
  <version>0.0.1</version>
  <buildtool_depend>catkin</buildtool_depend>
  <depend>ros_package</depend>
  <build_depend>boost</build_depend>
  <exec_depend version_gte="1.14">roscpp</exec_depend>
</package>"#,
        )
        .unwrap();
        let distro = Distro::new("noetic").unwrap();

        let requirements = RequirementsBuilder::build(
            &manifest,
            &BuildType::Catkin,
            &distro,
            Platform::Linux64,
            &map(),
            &BTreeMap::new(),
        );

        assert_eq!(
            names(&requirements.build),
            vec![
                "${{ compiler('c') }}",
                "${{ compiler('cxx') }}",
                "cmake",
                "ninja",
                "pkg-config",
                "ros-noetic-catkin"
            ]
        );
        assert_eq!(
            names(&requirements.host),
            vec![
                "ros-noetic-catkin",
                "ros-noetic-ros-package",
                "ros-noetic-ros-package-msgs",
                "libboost-devel"
            ]
        );
        assert_eq!(
            names(&requirements.run),
            vec![
                "ros-noetic-ros-package",
                "ros-noetic-ros-package-msgs",
                "ros-noetic-roscpp >=1.14"
            ]
        );
    }

    #[test]
    fn test_conditions_filter_dependencies() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="3">
  <name>dual_pkg</name>
  <version>1.0.0</version>
  <exec_depend condition="$ROS_VERSION == 1">rospy</exec_depend>
  <exec_depend condition="$ROS_VERSION == 2">rclpy</exec_depend>
  <exec_depend condition="$WITH_EXTRAS == on">extras_pkg</exec_depend>
  <export><build_type>ament_python</build_type></export>
</package>"#,
        )
        .unwrap();
        let distro = Distro::new("humble").unwrap();
        let env = BTreeMap::from([("WITH_EXTRAS".to_string(), "on".to_string())]);

        let requirements = RequirementsBuilder::build(
            &manifest,
            &BuildType::AmentPython,
            &distro,
            Platform::Linux64,
            &PackageMap::new(),
            &env,
        );

        assert!(requirements.build.is_empty());
        assert_eq!(names(&requirements.host), vec!["python", "pip", "setuptools"]);
        assert_eq!(
            names(&requirements.run),
            vec!["ros-humble-rclpy", "ros-humble-extras-pkg", "python"]
        );
    }

    #[test]
    fn test_self_dependency_and_duplicates_are_dropped() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="2">
  <name>loop_pkg</name>
  <version>1.0.0</version>
  <exec_depend>loop_pkg</exec_depend>
  <exec_depend>std_msgs</exec_depend>
  <build_export_depend>std_msgs</build_export_depend>
</package>"#,
        )
        .unwrap();
        let distro = Distro::new("jazzy").unwrap();

        let requirements = RequirementsBuilder::build(
            &manifest,
            &BuildType::AmentCmake,
            &distro,
            Platform::Win64,
            &PackageMap::new(),
            &BTreeMap::new(),
        );

        assert_eq!(names(&requirements.run), vec!["ros-jazzy-std-msgs"]);
        assert!(!names(&requirements.build).contains(&"pkg-config".to_string()));
    }

    #[test]
    fn test_condition_context_env_overrides() {
        let distro = Distro::new("noetic").unwrap();
        let env = BTreeMap::from([("ROS_PYTHON_VERSION".to_string(), "2".to_string())]);
        let context = RequirementsBuilder::condition_context(&distro, &env);
        assert_eq!(context["ROS_VERSION"], "1");
        assert_eq!(context["ROS_DISTRO"], "noetic");
        assert_eq!(context["ROS_PYTHON_VERSION"], "2");
    }

    #[test]
    fn test_empty_version_attribute_renders_no_constraint() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="2">
  <name>custom_ros</name>
  <version>0.0.1</version>
  <exec_depend version_gte="">foo</exec_depend>
</package>"#,
        )
        .unwrap();
        let distro = Distro::new("noetic").unwrap();

        let requirements = RequirementsBuilder::build(
            &manifest,
            &BuildType::Catkin,
            &distro,
            Platform::Linux64,
            &map(),
            &BTreeMap::new(),
        );

        assert_eq!(names(&requirements.run), vec!["ros-noetic-foo"]);
    }
}
