//! Backend configuration.
//!
//! The configuration comes from a YAML file (`pixi-build-ros.config.yml` or an
//! explicit path) or from the `[package.build.configuration]` table of a
//! `pixi.toml`. Keys are kebab-case in both formats.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::shared::error::RosBackendError;
use crate::shared::security::read_file_checked;
use crate::shared::Result;

const CONFIG_FILENAME: &str = "pixi-build-ros.config.yml";
const PIXI_MANIFEST: &str = "pixi.toml";

/// Configuration of the ROS build backend
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RosBackendConfig {
    /// Target ROS distribution, e.g. `noetic` or `humble`
    ///
    /// May be left out of the file when the command line supplies it.
    #[serde(default)]
    pub distro: String,
    /// Build an architecture independent package
    pub noarch: Option<bool>,
    /// Package map files layered over the built-in table, later files win
    #[serde(default)]
    pub extra_package_mappings: Vec<PathBuf>,
    /// Build script environment, also visible to package.xml conditions
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Directory receiving a copy of the rendered recipe
    pub debug_dir: Option<PathBuf>,
    /// Globs appended to the build input globs
    #[serde(default)]
    pub extra_input_globs: Vec<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl RosBackendConfig {
    pub fn new(distro: impl Into<String>) -> Self {
        Self {
            distro: distro.into(),
            ..Self::default()
        }
    }

    pub fn with_noarch(mut self, noarch: bool) -> Self {
        self.noarch = Some(noarch);
        self
    }

    pub fn with_extra_package_mapping(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_package_mappings.push(path.into());
        self
    }

    pub fn is_noarch(&self) -> bool {
        self.noarch.unwrap_or(false)
    }

    /// Validates the configuration
    ///
    /// # Errors
    /// Returns `RosBackendError::InvalidConfig` when `distro` is empty or an
    /// extra package mapping path is empty
    pub fn validate(&self) -> Result<()> {
        if self.distro.trim().is_empty() {
            return Err(RosBackendError::InvalidConfig {
                message: "'distro' must not be empty".to_string(),
                hint: "Set 'distro' to the target ROS distribution, e.g. \"noetic\" or \"humble\""
                    .to_string(),
            }
            .into());
        }
        for (i, path) in self.extra_package_mappings.iter().enumerate() {
            if path.as_os_str().is_empty() {
                return Err(RosBackendError::InvalidConfig {
                    message: format!("extra-package-mappings[{}] must not be empty", i),
                    hint: "Each entry must be a path to a package map YAML file".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
///
/// `.toml` files are read as pixi manifests; everything else as YAML.
pub fn load_config_from_path(path: &Path) -> Result<RosBackendConfig> {
    let content = read_file_checked(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config = if path.extension().is_some_and(|ext| ext == "toml") {
        parse_pixi_manifest(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No [package.build.configuration] table in {}\n\n💡 Hint: Add the backend configuration to the pixi manifest.",
                    path.display()
                )
            })?
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    finish_loading(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
///
/// `pixi-build-ros.config.yml` wins over `pixi.toml`; a pixi manifest without
/// a `[package.build.configuration]` table counts as not found.
pub fn discover_config(dir: &Path) -> Result<Option<RosBackendConfig>> {
    let yaml_path = dir.join(CONFIG_FILENAME);
    if yaml_path.exists() {
        return load_config_from_path(&yaml_path).map(Some);
    }

    let pixi_path = dir.join(PIXI_MANIFEST);
    if pixi_path.exists() {
        let content = read_file_checked(&pixi_path, PIXI_MANIFEST)?;
        let config = parse_pixi_manifest(&content)
            .with_context(|| format!("Failed to parse {}", pixi_path.display()))?;
        return config.map(finish_loading).transpose();
    }

    Ok(None)
}

/// Extracts `[package.build.configuration]` from a pixi manifest
fn parse_pixi_manifest(content: &str) -> Result<Option<RosBackendConfig>> {
    let manifest: toml::Table = toml::from_str(content)?;
    let Some(table) = manifest
        .get("package")
        .and_then(|p| p.get("build"))
        .and_then(|b| b.get("configuration"))
    else {
        return Ok(None);
    };

    // Route through YAML so unknown keys land in the same Value type.
    let yaml = serde_yaml_ng::to_value(table)?;
    Ok(Some(serde_yaml_ng::from_value(yaml)?))
}

/// Validation is left to the caller, after command-line overrides are applied.
fn finish_loading(config: RosBackendConfig) -> Result<RosBackendConfig> {
    warn_unknown_fields(&config);
    Ok(config)
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &RosBackendConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}
