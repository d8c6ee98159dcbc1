/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package database, file system,
/// processes, console, etc.).
pub mod formatter;
pub mod host_probe;
pub mod output_presenter;
pub mod package_database;
pub mod progress_reporter;
pub mod service_definition_reader;
pub mod service_probe;
pub mod state_file_reader;

pub use formatter::StatusFormatter;
pub use host_probe::HostProbe;
pub use output_presenter::OutputPresenter;
pub use package_database::PackageDatabase;
pub use progress_reporter::ProgressReporter;
pub use service_definition_reader::ServiceDefinitionReader;
pub use service_probe::ServiceProbe;
pub use state_file_reader::StateFileReader;
