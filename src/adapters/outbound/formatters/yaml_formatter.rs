use crate::ports::outbound::RecipeFormatter;
use crate::ros_generation::domain::Recipe;
use crate::shared::Result;

/// Renders a recipe as a rattler-build `recipe.yaml`
pub struct YamlRecipeFormatter;

impl YamlRecipeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlRecipeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeFormatter for YamlRecipeFormatter {
    fn format(&self, recipe: &Recipe) -> Result<String> {
        serde_yaml_ng::to_string(recipe)
            .map_err(|e| anyhow::anyhow!("Failed to serialize recipe to YAML: {}", e))
    }
}
