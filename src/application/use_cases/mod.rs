/// Use cases module containing application business logic orchestration
mod generate_recipe;
mod load_package_maps;

pub use generate_recipe::GenerateRecipeUseCase;
pub use load_package_maps::merge_package_maps;
