use crate::shared::error::RosBackendError;
use crate::shared::Result;
use std::fmt;

/// Major ROS generation a distribution belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosVersion {
    Ros1,
    Ros2,
}

impl RosVersion {
    /// Value of the `ROS_VERSION` condition variable
    pub fn as_env_value(self) -> &'static str {
        match self {
            RosVersion::Ros1 => "1",
            RosVersion::Ros2 => "2",
        }
    }
}

/// Distributions the backend knows how to target, oldest first
const KNOWN_DISTROS: &[(&str, RosVersion)] = &[
    ("kinetic", RosVersion::Ros1),
    ("lunar", RosVersion::Ros1),
    ("melodic", RosVersion::Ros1),
    ("noetic", RosVersion::Ros1),
    ("foxy", RosVersion::Ros2),
    ("galactic", RosVersion::Ros2),
    ("humble", RosVersion::Ros2),
    ("iron", RosVersion::Ros2),
    ("jazzy", RosVersion::Ros2),
    ("kilted", RosVersion::Ros2),
    ("rolling", RosVersion::Ros2),
];

/// A ROS distribution, e.g. `noetic` or `humble`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distro {
    name: String,
    ros_version: RosVersion,
}

impl Distro {
    /// Looks up a distribution by name (case-insensitive)
    ///
    /// # Errors
    /// Returns `RosBackendError::UnknownDistro` for names outside the known table
    pub fn new(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase();
        KNOWN_DISTROS
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(known, version)| Self {
                name: known.to_string(),
                ros_version: *version,
            })
            .ok_or_else(|| {
                RosBackendError::UnknownDistro {
                    name: name.to_string(),
                    known: Self::known_names().join(", "),
                }
                .into()
            })
    }

    pub fn known_names() -> Vec<&'static str> {
        KNOWN_DISTROS.iter().map(|(name, _)| *name).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ros_version(&self) -> RosVersion {
        self.ros_version
    }

    pub fn is_ros1(&self) -> bool {
        self.ros_version == RosVersion::Ros1
    }

    pub fn is_ros2(&self) -> bool {
        self.ros_version == RosVersion::Ros2
    }

    /// Conda name of a ROS package built for this distribution
    ///
    /// `custom_ros` on noetic becomes `ros-noetic-custom-ros`.
    pub fn package_name(&self, ros_name: &str) -> String {
        format!("ros-{}-{}", self.name, ros_name.replace('_', "-"))
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
