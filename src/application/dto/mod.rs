/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod generated_recipe;
mod output_format;
mod recipe_request;

pub use generated_recipe::GeneratedRecipe;
pub use output_format::OutputFormat;
pub use recipe_request::RecipeRequest;
