use crate::ports::outbound::StatusFormatter;
use crate::shared::Result;
use crate::status_collection::domain::StatusSnapshot;

/// YamlFormatter adapter rendering the snapshot as a YAML document
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFormatter for YamlFormatter {
    fn format(&self, snapshot: &StatusSnapshot) -> Result<String> {
        serde_yaml_ng::to_string(snapshot).map_err(Into::into)
    }
}
