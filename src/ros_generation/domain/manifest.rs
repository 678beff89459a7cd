use super::condition::{Condition, ConditionContext};
use std::fmt;
use std::str::FromStr;

/// How a ROS package is built, from `<export><build_type>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildType {
    Catkin,
    AmentCmake,
    AmentPython,
    Cmake,
    Other(String),
}

impl BuildType {
    pub fn as_str(&self) -> &str {
        match self {
            BuildType::Catkin => "catkin",
            BuildType::AmentCmake => "ament_cmake",
            BuildType::AmentPython => "ament_python",
            BuildType::Cmake => "cmake",
            BuildType::Other(name) => name,
        }
    }

    /// Whether the package is configured and installed through CMake
    pub fn is_cmake_based(&self) -> bool {
        matches!(
            self,
            BuildType::Catkin | BuildType::AmentCmake | BuildType::Cmake
        )
    }

    pub fn is_python(&self) -> bool {
        matches!(self, BuildType::AmentPython)
    }
}

impl FromStr for BuildType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "catkin" => BuildType::Catkin,
            "ament_cmake" => BuildType::AmentCmake,
            "ament_python" => BuildType::AmentPython,
            "cmake" => BuildType::Cmake,
            other => BuildType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version bounds a dependency may declare
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionBounds {
    pub version_lt: Option<String>,
    pub version_lte: Option<String>,
    pub version_eq: Option<String>,
    pub version_gte: Option<String>,
    pub version_gt: Option<String>,
}

impl VersionBounds {
    pub fn is_empty(&self) -> bool {
        self.to_constraint().is_none()
    }

    /// Renders the bounds as a conda match-spec version, e.g. `>=1.2,<2`
    pub fn to_constraint(&self) -> Option<String> {
        if let Some(eq) = &self.version_eq {
            return Some(format!("=={}", eq));
        }
        let parts: Vec<String> = [
            (">=", &self.version_gte),
            (">", &self.version_gt),
            ("<=", &self.version_lte),
            ("<", &self.version_lt),
        ]
        .into_iter()
        .filter_map(|(op, v)| v.as_ref().map(|v| format!("{}{}", op, v)))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        }
    }
}

/// A single dependency element of package.xml
#[derive(Debug, Clone, PartialEq)]
pub struct RosDependency {
    pub name: String,
    pub condition: Option<Condition>,
    pub version: VersionBounds,
}

impl RosDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            version: VersionBounds::default(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// True when the dependency has no condition or its condition holds
    pub fn applies(&self, context: &ConditionContext) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.evaluate(context))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub email: Option<String>,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub url: String,
    /// `website`, `repository` or `bugtracker`; website when absent
    pub kind: Option<String>,
}

/// Contents of a package.xml manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosPackageManifest {
    pub format: u32,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub maintainers: Vec<Person>,
    pub authors: Vec<Person>,
    pub licenses: Vec<String>,
    pub urls: Vec<Url>,
    /// Explicit `<build_type>`; `None` when the manifest does not declare one
    pub build_type: Option<BuildType>,
    pub buildtool_depends: Vec<RosDependency>,
    pub buildtool_export_depends: Vec<RosDependency>,
    pub build_depends: Vec<RosDependency>,
    pub build_export_depends: Vec<RosDependency>,
    pub exec_depends: Vec<RosDependency>,
    pub test_depends: Vec<RosDependency>,
    pub doc_depends: Vec<RosDependency>,
}

impl RosPackageManifest {
    /// First URL of the given kind; `website` also matches untyped URLs
    pub fn url(&self, kind: &str) -> Option<&str> {
        self.urls
            .iter()
            .find(|u| match u.kind.as_deref() {
                Some(k) => k == kind,
                None => kind == "website",
            })
            .map(|u| u.url.as_str())
    }

    /// Licenses joined into one expression
    pub fn license_expression(&self) -> Option<String> {
        if self.licenses.is_empty() {
            None
        } else {
            Some(self.licenses.join(" AND "))
        }
    }
}
