use crate::ports::outbound::RecipeFormatter;
use crate::ros_generation::domain::Recipe;
use crate::shared::Result;

/// Renders a recipe as pretty-printed JSON
pub struct JsonRecipeFormatter;

impl JsonRecipeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonRecipeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeFormatter for JsonRecipeFormatter {
    fn format(&self, recipe: &Recipe) -> Result<String> {
        let mut output = serde_json::to_string_pretty(recipe)
            .map_err(|e| anyhow::anyhow!("Failed to serialize recipe to JSON: {}", e))?;
        output.push('\n');
        Ok(output)
    }
}
