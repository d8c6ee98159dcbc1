use crate::ports::outbound::StatusFormatter;
use crate::shared::Result;
use crate::status_collection::domain::StatusSnapshot;

/// JsonFormatter adapter rendering the snapshot as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFormatter for JsonFormatter {
    fn format(&self, snapshot: &StatusSnapshot) -> Result<String> {
        serde_json::to_string_pretty(snapshot).map_err(Into::into)
    }
}
