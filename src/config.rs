//! Host configuration for yadt-status.
//!
//! Settings come from the `/etc/default/yadt` shell fragment shared with the
//! other yadt tools, with built-in defaults for everything it leaves out.

use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use yadt_status::application::dto::StatusRequest;
use yadt_status::shared::error::StatusError;
use yadt_status::shared::Result;
use yadt_status::status_collection::services::ArtefactFilter;

pub const DEFAULTS_FILE: &str = "/etc/default/yadt";

const ARTEFACT_FILTER_KEY: &str = "YADT_ARTEFACT_FILTER";
const SERVICES_FILE_KEY: &str = "YADT_SERVICES_FILE";
const STATUS_COMMAND_KEY: &str = "YADT_YUM_COMMAND";
const LOCK_DIR_KEY: &str = "YADT_LOCK_DIR";
const INIT_DIR_KEY: &str = "YADT_INIT_DIR";
const EXTRA_SCRIPT_DIR_KEY: &str = "YADT_EXTRA_SCRIPT_DIR";

const KNOWN_KEYS: &[&str] = &[
    ARTEFACT_FILTER_KEY,
    SERVICES_FILE_KEY,
    STATUS_COMMAND_KEY,
    LOCK_DIR_KEY,
    INIT_DIR_KEY,
    EXTRA_SCRIPT_DIR_KEY,
];

/// Sources the defaults file and prints every `YADT_*` variable as a
/// NUL-terminated `name=value` record. The file path is passed as `$1`.
const DUMP_SCRIPT: &str =
    r#". "$1" || exit 1; for v in ${!YADT_*}; do printf '%s=%s\0' "$v" "${!v}"; done"#;

/// Resolved settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub artefact_filter: String,
    pub services_file: PathBuf,
    /// Prefix for init script status checks; `None` runs them directly.
    pub status_command: Option<String>,
    pub lock_dir: PathBuf,
    pub init_dir: PathBuf,
    pub extra_script_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artefact_filter: ".*".to_string(),
            services_file: PathBuf::from("/etc/yadt.services"),
            status_command: Some("sudo".to_string()),
            lock_dir: PathBuf::from("/var/lock/yadt"),
            init_dir: PathBuf::from("/etc/init.d"),
            extra_script_dir: PathBuf::from("/usr/bin"),
        }
    }
}

impl Settings {
    /// Built-in defaults overlaid with the values of a defaults file.
    /// A missing file yields the built-in defaults.
    pub fn load(defaults_file: &Path) -> Result<Self> {
        if !defaults_file.exists() {
            return Ok(Self::default());
        }

        let values = load_defaults_file(defaults_file)?;
        warn_unknown_keys(&values);
        Ok(Self::from_values(&values))
    }

    /// Applies `YADT_*` values on top of the built-in defaults.
    pub fn from_values(values: &BTreeMap<String, String>) -> Self {
        let mut settings = Self::default();

        if let Some(filter) = values.get(ARTEFACT_FILTER_KEY) {
            settings.artefact_filter = filter.clone();
        }
        if let Some(path) = values.get(SERVICES_FILE_KEY) {
            settings.services_file = PathBuf::from(path);
        }
        if let Some(command) = values.get(STATUS_COMMAND_KEY) {
            settings.status_command = non_empty(command);
        }
        if let Some(path) = values.get(LOCK_DIR_KEY) {
            settings.lock_dir = PathBuf::from(path);
        }
        if let Some(path) = values.get(INIT_DIR_KEY) {
            settings.init_dir = PathBuf::from(path);
        }
        if let Some(path) = values.get(EXTRA_SCRIPT_DIR_KEY) {
            settings.extra_script_dir = PathBuf::from(path);
        }

        settings
    }

    /// Validates the settings and turns them into a use case request.
    ///
    /// Compiles the artefact filter and resolves a relative services file
    /// against `working_dir`.
    pub fn into_request(self, working_dir: &Path) -> Result<StatusRequest> {
        self.validate()?;
        let artefact_filter = ArtefactFilter::new(&self.artefact_filter)?;

        let services_file = if self.services_file.is_relative() {
            working_dir.join(&self.services_file)
        } else {
            self.services_file
        };

        Ok(StatusRequest::new(
            services_file,
            self.lock_dir,
            self.init_dir,
            self.extra_script_dir,
            self.status_command,
            artefact_filter,
        ))
    }

    fn validate(&self) -> Result<()> {
        let paths = [
            (SERVICES_FILE_KEY, &self.services_file),
            (LOCK_DIR_KEY, &self.lock_dir),
            (INIT_DIR_KEY, &self.init_dir),
            (EXTRA_SCRIPT_DIR_KEY, &self.extra_script_dir),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(StatusError::InvalidConfiguration {
                    message: format!(
                        "{} must not be empty.\n\n💡 Hint: Set it to a path in {} or on the command line.",
                        key, DEFAULTS_FILE
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// An empty value disables the status command prefix.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Sources a defaults file with bash and collects its `YADT_*` variables.
pub fn load_defaults_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let output = Command::new("bash")
        .args(["-c", DUMP_SCRIPT, "yadt-status"])
        .arg(path)
        .output()
        .with_context(|| {
            format!(
                "Failed to run bash to read defaults file: {}\n\n💡 Hint: bash must be installed to read shell style defaults files.",
                path.display()
            )
        })?;

    if !output.status.success() {
        bail!(
            "Failed to read defaults file: {}\n{}\n💡 Hint: Check that the file is readable and valid shell syntax.",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_variable_dump(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_variable_dump(dump: &str) -> BTreeMap<String, String> {
    dump.split('\0')
        .filter_map(|record| record.split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Warn about `YADT_*` variables this tool does not use.
fn warn_unknown_keys(values: &BTreeMap<String, String>) {
    for key in values.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            eprintln!(
                "⚠️  Warning: Unknown defaults variable '{}' will be ignored.",
                key
            );
        }
    }
}
