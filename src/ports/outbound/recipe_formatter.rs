use crate::ros_generation::domain::Recipe;
use crate::shared::Result;

/// RecipeFormatter port for rendering a generated recipe
///
/// Implementations exist for YAML (the rattler-build recipe file) and JSON.
pub trait RecipeFormatter {
    /// Renders the recipe
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, recipe: &Recipe) -> Result<String>;
}
