use crate::ros_generation::domain::{BuildType, Distro, Platform, Script};
use std::collections::BTreeMap;

/// BuildScriptGenerator service producing the recipe's build script
///
/// Scripts are bash on unix and cmd on Windows.
pub struct BuildScriptGenerator;

impl BuildScriptGenerator {
    pub fn generate(
        build_type: &BuildType,
        distro: &Distro,
        platform: Platform,
        env: &BTreeMap<String, String>,
    ) -> Script {
        let content = if build_type.is_python() {
            Self::python_script(platform)
        } else if build_type.is_cmake_based() {
            Self::cmake_script(build_type, distro, platform)
        } else {
            tracing::warn!(
                build_type = %build_type,
                "unsupported build type, falling back to a plain CMake build"
            );
            Self::cmake_script(&BuildType::Cmake, distro, platform)
        };

        Script {
            env: env.clone(),
            content,
        }
    }

    fn cmake_script(build_type: &BuildType, distro: &Distro, platform: Platform) -> Vec<String> {
        let windows = platform.is_windows();
        let (src, prefix, python) = if windows {
            ("%SRC_DIR%", "%LIBRARY_PREFIX%", "%PYTHON%")
        } else {
            ("$SRC_DIR", "$PREFIX", "$PYTHON")
        };

        let mut configure = vec![
            "cmake".to_string(),
            "-G Ninja".to_string(),
            format!("-S {}", src),
            "-B build".to_string(),
            "-DCMAKE_BUILD_TYPE=Release".to_string(),
            format!("-DCMAKE_INSTALL_PREFIX={}", prefix),
            format!("-DCMAKE_PREFIX_PATH={}", prefix),
            format!("-DPython_EXECUTABLE={}", python),
            format!("-DPython3_EXECUTABLE={}", python),
            "-DBUILD_TESTING=OFF".to_string(),
        ];
        match build_type {
            BuildType::Catkin => {
                configure.push("-DCATKIN_BUILD_BINARY_PACKAGE=ON".to_string());
                configure.push("-DSETUPTOOLS_DEB_LAYOUT=OFF".to_string());
            }
            BuildType::AmentCmake => {
                configure.push(format!("-DAMENT_PREFIX_PATH={}", prefix));
            }
            _ => {}
        }
        if !windows {
            configure.push("$CMAKE_ARGS".to_string());
        }

        let mut lines = Vec::new();
        if windows {
            lines.push("@echo on".to_string());
        } else {
            lines.push("set -euxo pipefail".to_string());
        }
        lines.push(format!("echo Building for ROS {}", distro.name()));
        lines.push(configure.join(" "));
        lines.push("cmake --build build --target install".to_string());
        if windows {
            lines.push("if errorlevel 1 exit 1".to_string());
        }
        lines
    }

    fn python_script(platform: Platform) -> Vec<String> {
        if platform.is_windows() {
            vec![
                "@echo on".to_string(),
                "%PYTHON% -m pip install . --no-deps --no-build-isolation -vv".to_string(),
                "if errorlevel 1 exit 1".to_string(),
            ]
        } else {
            vec![
                "set -euxo pipefail".to_string(),
                "$PYTHON -m pip install . --no-deps --no-build-isolation -vv".to_string(),
            ]
        }
    }
}
