mod build_script;
mod dependency_resolver;
mod package_xml_parser;
mod requirements_builder;

pub use build_script::BuildScriptGenerator;
pub use dependency_resolver::DependencyResolver;
pub use package_xml_parser::PackageXmlParser;
pub use requirements_builder::RequirementsBuilder;
