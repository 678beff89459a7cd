/// Formatter adapters for the supported recipe output formats
mod json_formatter;
mod yaml_formatter;

pub use json_formatter::JsonRecipeFormatter;
pub use yaml_formatter::YamlRecipeFormatter;
