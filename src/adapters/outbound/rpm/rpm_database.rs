use super::check_update::{parse_check_update, UPDATES_AVAILABLE_EXIT_CODE};
use super::installed_index::{InstalledIndex, QUERY_FORMAT};
use crate::ports::outbound::PackageDatabase;
use crate::shared::error::StatusError;
use crate::shared::Result;
use crate::status_collection::domain::{InstalledPackage, PackageRecord, PendingUpdate};
use std::cell::OnceCell;
use std::path::Path;
use std::process::{Command, Output};

/// RpmPackageDatabase adapter querying the host's rpm database and yum
///
/// The installed package set is read with a single `rpm -qa` query on first
/// use and kept in memory; pending updates come from `yum check-update`.
pub struct RpmPackageDatabase {
    rpm_program: String,
    yum_program: String,
    installed: OnceCell<InstalledIndex>,
}

impl RpmPackageDatabase {
    pub fn new() -> Self {
        Self::with_programs("rpm", "yum")
    }

    pub fn with_programs(rpm_program: impl Into<String>, yum_program: impl Into<String>) -> Self {
        Self {
            rpm_program: rpm_program.into(),
            yum_program: yum_program.into(),
            installed: OnceCell::new(),
        }
    }

    fn installed(&self) -> Result<&InstalledIndex> {
        if let Some(index) = self.installed.get() {
            return Ok(index);
        }

        let args = ["-qa", "--queryformat", QUERY_FORMAT];
        let output = run(&self.rpm_program, &args)?;
        let command = describe(&self.rpm_program, &["-qa", "--queryformat", "..."]);

        if !output.status.success() {
            return Err(StatusError::PackageDatabase {
                command,
                details: failure_details(&output),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let index = InstalledIndex::parse(&stdout).map_err(|e| StatusError::PackageDatabaseOutput {
            command,
            details: e.to_string(),
        })?;

        Ok(self.installed.get_or_init(|| index))
    }
}

impl Default for RpmPackageDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageDatabase for RpmPackageDatabase {
    fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
        Ok(self.installed()?.installed_packages())
    }

    fn resolve_dependency(&self, dependency: &str) -> Result<Vec<PackageRecord>> {
        Ok(self.installed()?.resolve(dependency))
    }

    fn file_owners(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        Ok(self.installed()?.owners(&path.to_string_lossy()))
    }

    fn available_updates(&self) -> Result<Vec<PendingUpdate>> {
        let args = ["-q", "check-update"];
        let output = run(&self.yum_program, &args)?;
        let command = describe(&self.yum_program, &args);

        match output.status.code() {
            Some(0) => return Ok(vec![]),
            Some(UPDATES_AVAILABLE_EXIT_CODE) => {}
            _ => {
                return Err(StatusError::PackageDatabase {
                    command,
                    details: failure_details(&output),
                }
                .into())
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let available = parse_check_update(&stdout).map_err(|e| {
            StatusError::PackageDatabaseOutput {
                command,
                details: e.to_string(),
            }
        })?;

        let installed = self.installed()?;
        Ok(available
            .into_iter()
            .map(|update| PendingUpdate {
                replaces: installed
                    .find(update.record.name(), update.record.arch())
                    .cloned(),
                available: update.record,
                replaces_raw: update.name_arch,
            })
            .collect())
    }
}

fn run(program: &str, args: &[&str]) -> Result<Output> {
    Command::new(program).args(args).output().map_err(|e| {
        StatusError::PackageDatabase {
            command: describe(program, args),
            details: e.to_string(),
        }
        .into()
    })
}

fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn failure_details(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    match output.status.code() {
        Some(code) if stderr.is_empty() => format!("exited with status {}", code),
        Some(code) => format!("exited with status {}: {}", code, stderr),
        None => format!("terminated by signal: {}", stderr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe("yum", &["-q", "check-update"]), "yum -q check-update");
        assert_eq!(describe("rpm", &[]), "rpm");
    }

    #[test]
    fn test_missing_rpm_binary_is_database_error() {
        let db = RpmPackageDatabase::with_programs("/nonexistent/bin/rpm", "/nonexistent/bin/yum");

        let result = db.installed_packages();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Package database query failed"));
        assert!(err.contains("/nonexistent/bin/rpm"));
    }

    #[test]
    fn test_missing_yum_binary_is_database_error() {
        let db = RpmPackageDatabase::with_programs("/nonexistent/bin/rpm", "/nonexistent/bin/yum");

        let result = db.available_updates();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("/nonexistent/bin/yum -q check-update"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_query_reports_exit_status() {
        // `false` exits 1 without output, standing in for a broken rpmdb
        let db = RpmPackageDatabase::with_programs("false", "false");

        let result = db.installed_packages();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exited with status 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_check_update_without_updates() {
        // `true` exits 0, which yum uses for "no updates"
        let db = RpmPackageDatabase::with_programs("false", "true");

        assert!(db.available_updates().unwrap().is_empty());
    }
}
