use serde::Deserialize;

/// Project description handed over by the host build orchestrator
///
/// The generator only reads metadata fields from it; values declared in
/// package.xml take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectModel {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub documentation: Option<String>,
}

impl ProjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> crate::shared::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
