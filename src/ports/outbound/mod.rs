/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, etc.).
pub mod output_presenter;
pub mod package_map_reader;
pub mod package_xml_reader;
pub mod progress_reporter;
pub mod recipe_formatter;

pub use output_presenter::OutputPresenter;
pub use package_map_reader::PackageMapReader;
pub use package_xml_reader::PackageXmlReader;
pub use progress_reporter::ProgressReporter;
pub use recipe_formatter::RecipeFormatter;
