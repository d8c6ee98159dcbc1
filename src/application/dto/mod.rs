/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod status_request;
mod status_response;

pub use output_format::OutputFormat;
pub use status_request::StatusRequest;
pub use status_response::StatusResponse;
