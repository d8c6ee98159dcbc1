use clap::Parser;
use std::path::PathBuf;

use crate::config::{non_empty, Settings, DEFAULTS_FILE};
use yadt_status::application::dto::OutputFormat;

/// Collect the deployment status of this host for the yadt orchestrator
#[derive(Parser, Debug)]
#[command(name = "yadt-status")]
#[command(version)]
#[command(
    about = "Collect the deployment status of this host for the yadt orchestrator",
    long_about = None
)]
pub struct Args {
    /// Shell style defaults file holding YADT_* settings
    #[arg(long, value_name = "FILE", default_value = DEFAULTS_FILE)]
    pub defaults_file: PathBuf,

    /// Regular expression selecting the artefacts to report on (matched at the start)
    #[arg(long, value_name = "REGEX")]
    pub artefact_filter: Option<String>,

    /// Service definitions file (relative paths resolve against the working directory)
    #[arg(long, value_name = "FILE")]
    pub services_file: Option<PathBuf>,

    /// Prefix for init script status checks, e.g. "sudo"; empty runs them directly
    #[arg(long, value_name = "COMMAND")]
    pub status_command: Option<String>,

    /// Directory holding host.lock and ignore.<service> files
    #[arg(long, value_name = "DIR")]
    pub lock_dir: Option<PathBuf>,

    /// Directory holding the service init scripts
    #[arg(long, value_name = "DIR")]
    pub init_dir: Option<PathBuf>,

    /// Directory searched for yadt-status-service-<service> scripts
    #[arg(long, value_name = "DIR")]
    pub extra_script_dir: Option<PathBuf>,

    /// Output format: json or yaml
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command line values take precedence over the defaults file
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(filter) = &self.artefact_filter {
            settings.artefact_filter = filter.clone();
        }
        if let Some(path) = &self.services_file {
            settings.services_file = path.clone();
        }
        if let Some(command) = &self.status_command {
            settings.status_command = non_empty(command);
        }
        if let Some(path) = &self.lock_dir {
            settings.lock_dir = path.clone();
        }
        if let Some(path) = &self.init_dir {
            settings.init_dir = path.clone();
        }
        if let Some(path) = &self.extra_script_dir {
            settings.extra_script_dir = path.clone();
        }
    }
}
