use crate::ports::outbound::ServiceProbe;
use crate::shared::error::StatusError;
use crate::shared::Result;
use serde_yaml_ng::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Argument passed to init scripts to query the service state
const STATUS_ARGUMENT: &str = "status";

/// InitScriptProbe adapter running init scripts and extra status scripts
///
/// This adapter implements the ServiceProbe port with blocking subprocess
/// calls. Child standard error is inherited so script diagnostics reach the
/// operator.
pub struct InitScriptProbe;

impl InitScriptProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InitScriptProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceProbe for InitScriptProbe {
    fn status_code(&self, status_command: Option<&str>, init_script: &Path) -> Result<i32> {
        let mut argv: Vec<&OsStr> = status_command
            .map(|prefix| prefix.split_whitespace().map(OsStr::new).collect())
            .unwrap_or_default();
        argv.push(init_script.as_os_str());
        argv.push(OsStr::new(STATUS_ARGUMENT));

        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("empty status command"))?;

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| StatusError::CommandFailed {
                program: describe(&argv),
                details: e.to_string(),
            })?;

        Ok(exit_code(status))
    }

    fn is_executable(&self, script: &Path) -> bool {
        let Ok(metadata) = fs::metadata(script) else {
            return false;
        };
        metadata.is_file() && has_execute_bit(&metadata)
    }

    fn run_extra_script(&self, script: &Path) -> Result<Value> {
        let output = Command::new(script)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| StatusError::CommandFailed {
                program: script.display().to_string(),
                details: e.to_string(),
            })?;

        // The exit status is not part of the contract; only stdout is
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_yaml_ng::from_str(&stdout).map_err(|e| {
            StatusError::CommandFailed {
                program: script.display().to_string(),
                details: format!("output is not valid YAML: {}", e),
            }
            .into()
        })
    }
}

/// Any of the owner, group or other execute bits
#[cfg(unix)]
fn has_execute_bit(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_execute_bit(_metadata: &fs::Metadata) -> bool {
    true
}

/// Exit code of a finished child; termination by signal `n` yields `-n`
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

fn describe(argv: &[&OsStr]) -> String {
    argv.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
