/// Mock implementations for testing
mod mock_package_map_reader;
mod mock_package_xml_reader;
mod mock_progress_reporter;

pub use mock_package_map_reader::MockPackageMapReader;
pub use mock_package_xml_reader::MockPackageXmlReader;
pub use mock_progress_reporter::MockProgressReporter;
