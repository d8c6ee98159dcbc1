use crate::shared::Result;
use crate::status_collection::domain::StatusSnapshot;

/// StatusFormatter port for serializing the status snapshot
///
/// This port abstracts the wire format (JSON, YAML) handed to the
/// orchestrator.
pub trait StatusFormatter {
    /// Formats the snapshot
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, snapshot: &StatusSnapshot) -> Result<String>;
}
