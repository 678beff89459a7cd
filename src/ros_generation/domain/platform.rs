use std::fmt;
use std::str::FromStr;

/// Conda platform (subdir) a recipe is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux64,
    LinuxAarch64,
    LinuxPpc64le,
    Osx64,
    OsxArm64,
    Win64,
    NoArch,
}

impl Platform {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(all(target_os = "linux", target_arch = "aarch64")) {
            Platform::LinuxAarch64
        } else if cfg!(all(target_os = "linux", target_arch = "powerpc64")) {
            Platform::LinuxPpc64le
        } else if cfg!(target_os = "linux") {
            Platform::Linux64
        } else if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
            Platform::OsxArm64
        } else if cfg!(target_os = "macos") {
            Platform::Osx64
        } else if cfg!(target_os = "windows") {
            Platform::Win64
        } else {
            Platform::NoArch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux64 => "linux-64",
            Platform::LinuxAarch64 => "linux-aarch64",
            Platform::LinuxPpc64le => "linux-ppc64le",
            Platform::Osx64 => "osx-64",
            Platform::OsxArm64 => "osx-arm64",
            Platform::Win64 => "win-64",
            Platform::NoArch => "noarch",
        }
    }

    /// Key used by per-platform package map entries
    pub fn family(&self) -> Option<&'static str> {
        if self.is_linux() {
            Some("linux")
        } else if self.is_osx() {
            Some("osx")
        } else if self.is_windows() {
            Some("win")
        } else {
            None
        }
    }

    pub fn is_linux(&self) -> bool {
        matches!(
            self,
            Platform::Linux64 | Platform::LinuxAarch64 | Platform::LinuxPpc64le
        )
    }

    pub fn is_osx(&self) -> bool {
        matches!(self, Platform::Osx64 | Platform::OsxArm64)
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Win64)
    }

    pub fn is_unix(&self) -> bool {
        self.is_linux() || self.is_osx()
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux-64" => Ok(Platform::Linux64),
            "linux-aarch64" => Ok(Platform::LinuxAarch64),
            "linux-ppc64le" => Ok(Platform::LinuxPpc64le),
            "osx-64" => Ok(Platform::Osx64),
            "osx-arm64" => Ok(Platform::OsxArm64),
            "win-64" => Ok(Platform::Win64),
            "noarch" => Ok(Platform::NoArch),
            _ => Err(format!(
                "Invalid platform: {}. Expected one of linux-64, linux-aarch64, linux-ppc64le, osx-64, osx-arm64, win-64, noarch",
                s
            )),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
