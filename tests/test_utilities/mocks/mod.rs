/// Mock implementations for testing
mod mock_host_probe;
mod mock_package_database;
mod mock_progress_reporter;
mod mock_service_probe;

pub use mock_host_probe::MockHostProbe;
pub use mock_package_database::MockPackageDatabase;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_service_probe::MockServiceProbe;
