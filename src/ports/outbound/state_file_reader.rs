use crate::shared::Result;
use serde_yaml_ng::Value;
use std::path::Path;

/// StateFileReader port for optional state documents (host lock, ignore files)
pub trait StateFileReader {
    /// Reads and parses an optional YAML state document
    ///
    /// # Returns
    /// `Ok(None)` if the file does not exist, the parsed document otherwise
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    fn read_state(&self, path: &Path) -> Result<Option<Value>>;
}
