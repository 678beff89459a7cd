use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A recipe field that is either known now or left as a template expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value<T> {
    Concrete(T),
    Template(String),
}

impl<T> Value<T> {
    pub fn get_concrete(&self) -> Option<&T> {
        match self {
            Value::Concrete(value) => Some(value),
            Value::Template(_) => None,
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Concrete(value)
    }
}

/// One entry of a requirements list, rendered as `name[ constraint]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequirementItem {
    name: String,
    constraint: Option<String>,
}

impl RequirementItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    pub fn with_constraint(name: impl Into<String>, constraint: Option<String>) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }
}

impl fmt::Display for RequirementItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{} {}", self.name, constraint),
            None => f.write_str(&self.name),
        }
    }
}

impl Serialize for RequirementItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Requirements {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub build: Vec<RequirementItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<RequirementItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run: Vec<RequirementItem>,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.host.is_empty() && self.run.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePackage {
    pub name: Value<String>,
    pub version: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Source {
    Path { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoArchKind {
    Generic,
    Python,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Build {
    pub number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noarch: Option<NoArchKind>,
    pub script: Script,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct About {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extra {
    #[serde(
        rename = "recipe-maintainers",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub recipe_maintainers: Vec<String>,
}

/// Conda recipe in the rattler-build layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub package: RecipePackage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<Source>,
    pub build: Build,
    #[serde(skip_serializing_if = "Requirements::is_empty")]
    pub requirements: Requirements,
    pub about: About,
    pub extra: Extra,
}

impl Recipe {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: RecipePackage {
                name: Value::Concrete(name.into()),
                version: Value::Concrete(version.into()),
            },
            source: Vec::new(),
            build: Build::default(),
            requirements: Requirements::default(),
            about: About::default(),
            extra: Extra::default(),
        }
    }
}
