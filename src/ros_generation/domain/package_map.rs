use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default RoboStack mapping table shipped with the backend
const BUILTIN_PACKAGE_MAP: &str = include_str!("../../../robostack.yaml");

/// Conda package names of a package map entry
///
/// Either a single list used on every platform, or a table keyed by
/// platform family (`linux`, `osx`, `win`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CondaPackages {
    All(Vec<String>),
    PerPlatform(BTreeMap<String, Vec<String>>),
}

impl CondaPackages {
    /// Package names for the given platform family
    ///
    /// A per-platform table without an entry for `family` yields nothing.
    pub fn for_family(&self, family: Option<&str>) -> Vec<String> {
        match self {
            CondaPackages::All(names) => names.clone(),
            CondaPackages::PerPlatform(table) => family
                .and_then(|f| table.get(f))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Translation of one upstream dependency key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMapEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conda: Option<CondaPackages>,
    /// Older spelling of `conda` found in RoboStack tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robostack: Option<CondaPackages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ros: Option<Vec<String>>,
}

impl PackageMapEntry {
    pub fn conda(names: &[&str]) -> Self {
        Self {
            conda: Some(CondaPackages::All(
                names.iter().map(|n| n.to_string()).collect(),
            )),
            ..Self::default()
        }
    }

    pub fn ros(names: &[&str]) -> Self {
        Self {
            ros: Some(names.iter().map(|n| n.to_string()).collect()),
            ..Self::default()
        }
    }

    /// The conda packages, preferring `conda` over `robostack`
    pub fn conda_packages(&self) -> Option<&CondaPackages> {
        self.conda.as_ref().or(self.robostack.as_ref())
    }
}

/// Layered table translating dependency names to target package names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageMap {
    entries: BTreeMap<String, PackageMapEntry>,
}

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one package map document
    ///
    /// An empty document (or one containing only comments) is an empty map.
    /// Entries without a body (`foo:`) are kept as empty entries.
    ///
    /// # Errors
    /// Returns an error if the YAML is malformed or the document is not a mapping
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml_ng::Value = if is_blank_document(content) {
            serde_yaml_ng::Value::Null
        } else {
            serde_yaml_ng::from_str(content)?
        };

        match value {
            serde_yaml_ng::Value::Null => Ok(Self::new()),
            serde_yaml_ng::Value::Mapping(_) => {
                let raw: BTreeMap<String, Option<PackageMapEntry>> =
                    serde_yaml_ng::from_value(value)?;
                let entries = raw
                    .into_iter()
                    .map(|(name, entry)| (name, entry.unwrap_or_default()))
                    .collect();
                Ok(Self { entries })
            }
            _ => anyhow::bail!("expected a mapping of package names at the top level"),
        }
    }

    /// The RoboStack table embedded in the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_PACKAGE_MAP)
    }

    /// Inserts or replaces a single entry
    pub fn insert(&mut self, name: impl Into<String>, entry: PackageMapEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Merges `other` on top of `self`
    ///
    /// Entries of `other` replace entries with the same key wholesale; keys
    /// only present in `self` are untouched. Returns the number of keys that
    /// were overridden.
    pub fn merge(&mut self, other: PackageMap) -> usize {
        let mut overridden = 0;
        for (name, entry) in other.entries {
            if let Some(previous) = self.entries.insert(name.clone(), entry) {
                tracing::trace!(package = %name, ?previous, "package map entry overridden");
                overridden += 1;
            }
        }
        overridden
    }

    pub fn get(&self, name: &str) -> Option<&PackageMapEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn is_blank_document(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}
