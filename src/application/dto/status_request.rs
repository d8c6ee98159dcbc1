use crate::status_collection::services::ArtefactFilter;
use std::path::PathBuf;

/// Host lock file inside the lock directory
pub const HOST_LOCK_FILE: &str = "host.lock";

/// Prefix of per-service ignore files inside the lock directory
pub const IGNORE_FILE_PREFIX: &str = "ignore.";

/// Prefix of per-service extra status scripts
pub const EXTRA_SCRIPT_PREFIX: &str = "yadt-status-service-";

/// StatusRequest - Internal request DTO for the status collection use case
///
/// Carries the resolved settings of one run, including the already
/// compiled artefact filter.
#[derive(Debug, Clone)]
pub struct StatusRequest {
    /// Service definitions document
    pub services_file: PathBuf,
    /// Directory holding `host.lock` and `ignore.<service>` files
    pub lock_dir: PathBuf,
    /// Directory holding the init scripts
    pub init_dir: PathBuf,
    /// Directory searched for `yadt-status-service-<service>` scripts
    pub extra_script_dir: PathBuf,
    /// Prefix for the status check, e.g. `sudo`; `None` runs the script directly
    pub status_command: Option<String>,
    pub artefact_filter: ArtefactFilter,
}

impl StatusRequest {
    pub fn new(
        services_file: PathBuf,
        lock_dir: PathBuf,
        init_dir: PathBuf,
        extra_script_dir: PathBuf,
        status_command: Option<String>,
        artefact_filter: ArtefactFilter,
    ) -> Self {
        Self {
            services_file,
            lock_dir,
            init_dir,
            extra_script_dir,
            status_command,
            artefact_filter,
        }
    }

    pub fn lock_file(&self) -> PathBuf {
        self.lock_dir.join(HOST_LOCK_FILE)
    }

    pub fn ignore_file(&self, service: &str) -> PathBuf {
        self.lock_dir.join(format!("{}{}", IGNORE_FILE_PREFIX, service))
    }

    pub fn init_script(&self, service: &str) -> PathBuf {
        self.init_dir.join(service)
    }

    pub fn extra_script(&self, service: &str) -> PathBuf {
        self.extra_script_dir
            .join(format!("{}{}", EXTRA_SCRIPT_PREFIX, service))
    }
}
