use crate::ros_generation::domain::Recipe;

/// GeneratedRecipe - Result handed back to the host build orchestrator
///
/// Besides the recipe itself it lists which files influence the recipe
/// metadata and which sources influence the build, so the host can decide
/// when to regenerate or rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    /// Globs whose changes invalidate the recipe metadata
    pub metadata_input_globs: Vec<String>,
    /// Globs whose changes invalidate the build output
    pub build_input_globs: Vec<String>,
}

impl GeneratedRecipe {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            metadata_input_globs: Vec::new(),
            build_input_globs: Vec::new(),
        }
    }

    /// Concrete package name of the recipe
    pub fn package_name(&self) -> Option<&str> {
        self.recipe.package.name.get_concrete().map(String::as_str)
    }
}
