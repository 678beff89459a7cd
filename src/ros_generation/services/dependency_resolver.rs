use crate::ros_generation::domain::{Distro, PackageMap, Platform};

/// Placeholder in package maps for "needs an OpenGL implementation"
const REQUIRE_OPENGL: &str = "REQUIRE_OPENGL";

/// Placeholder in package maps for "needs libGL"
const REQUIRE_GL: &str = "REQUIRE_GL";

/// DependencyResolver service translating package.xml dependency names
///
/// This service contains pure lookup logic over a merged PackageMap.
/// It has no I/O dependencies.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Resolves one dependency name into target package names
    ///
    /// # Arguments
    /// * `dep_name` - Name as written in package.xml (a ROS package or rosdep key)
    /// * `distro` - Distribution used to qualify ROS package names
    /// * `platform` - Host platform, selects per-platform map entries
    /// * `package_map` - Merged mapping table
    ///
    /// # Returns
    /// Zero or more package names. Unmapped names are assumed to be ROS
    /// packages and qualified with the distro.
    pub fn resolve(
        dep_name: &str,
        distro: &Distro,
        platform: Platform,
        package_map: &PackageMap,
    ) -> Vec<String> {
        let Some(entry) = package_map.get(dep_name) else {
            return vec![distro.package_name(dep_name)];
        };

        if let Some(ros_packages) = &entry.ros {
            tracing::debug!(dependency = dep_name, ?ros_packages, "mapped to ROS packages");
            return ros_packages
                .iter()
                .map(|name| distro.package_name(name))
                .collect();
        }

        if let Some(conda_packages) = entry.conda_packages() {
            let names = conda_packages.for_family(platform.family());
            tracing::debug!(dependency = dep_name, ?names, %platform, "mapped to conda packages");
            return Self::expand_markers(names, platform);
        }

        tracing::debug!(
            dependency = dep_name,
            "package map entry has neither 'ros' nor 'conda'; dropping dependency"
        );
        Vec::new()
    }

    /// Replaces graphics placeholders with platform specific packages
    fn expand_markers(names: Vec<String>, platform: Platform) -> Vec<String> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut additional = Vec::new();

        for name in names {
            match name.as_str() {
                REQUIRE_OPENGL => {
                    if platform.is_linux() {
                        additional.push("libgl-devel".to_string());
                        additional.push("libopengl-devel".to_string());
                    }
                    if platform.is_unix() {
                        additional.push("xorg-libx11".to_string());
                        additional.push("xorg-libxext".to_string());
                    }
                }
                REQUIRE_GL => {
                    if platform.is_linux() {
                        additional.push("libgl-devel".to_string());
                    }
                }
                _ => resolved.push(name),
            }
        }

        resolved.extend(additional);
        resolved
    }
}
