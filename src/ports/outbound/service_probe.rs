use crate::shared::Result;
use serde_yaml_ng::Value;
use std::path::Path;

/// ServiceProbe port for querying the live state of services
pub trait ServiceProbe {
    /// Runs `[status_command] <init_script> status` and returns its exit code
    ///
    /// # Arguments
    /// * `status_command` - Optional privilege-escalation prefix, e.g. `sudo`
    /// * `init_script` - The service's init script
    ///
    /// # Errors
    /// Returns an error only if the process could not be started
    fn status_code(&self, status_command: Option<&str>, init_script: &Path) -> Result<i32>;

    /// Whether `script` is a regular file with any execute permission bit set
    fn is_executable(&self, script: &Path) -> bool;

    /// Runs an extra status script without arguments and parses its
    /// standard output as YAML
    fn run_extra_script(&self, script: &Path) -> Result<Value>;
}
