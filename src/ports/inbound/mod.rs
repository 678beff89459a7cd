/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that a host build orchestrator or the
/// CLI uses to interact with the application core.
pub mod recipe_generator;

pub use recipe_generator::RecipeGenerator;
