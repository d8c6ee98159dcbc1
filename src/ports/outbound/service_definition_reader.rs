use crate::shared::Result;
use crate::status_collection::domain::ServiceDefinition;
use std::path::Path;

/// ServiceDefinitionReader port for loading the services handled on a host
pub trait ServiceDefinitionReader {
    /// Reads the service definitions document
    ///
    /// # Arguments
    /// * `path` - Path to the service definitions file
    ///
    /// # Returns
    /// Service definitions in declaration order
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or malformed.
    /// The collector degrades to an empty service set in that case.
    fn read_service_definitions(&self, path: &Path) -> Result<Vec<ServiceDefinition>>;
}
