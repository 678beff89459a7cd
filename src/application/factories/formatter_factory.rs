use crate::adapters::outbound::formatters::{JsonRecipeFormatter, YamlRecipeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::RecipeFormatter;

/// Factory for creating recipe formatters
///
/// Selects the infrastructure adapter for an output format; it belongs in
/// the application layer because the choice is an application concern.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use pixi_build_ros::application::dto::OutputFormat;
    /// use pixi_build_ros::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Yaml);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn RecipeFormatter> {
        match format {
            OutputFormat::Yaml => Box::new(YamlRecipeFormatter::new()),
            OutputFormat::Json => Box::new(JsonRecipeFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Yaml => "📝 Rendering recipe as YAML...",
            OutputFormat::Json => "📝 Rendering recipe as JSON...",
        }
    }
}
