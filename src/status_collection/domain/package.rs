use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for the epoch/version/release/arch fields (security limit)
const MAX_FIELD_LENGTH: usize = 128;

/// PackageRecord - the NEVRA of one installed (or available) RPM
///
/// Field values are taken verbatim from the package database. An empty
/// or `"0"` epoch means "no epoch".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRecord {
    name: String,
    epoch: Option<String>,
    version: String,
    release: String,
    arch: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        epoch: Option<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        arch: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        let release = release.into();
        let arch = arch.into();

        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }
        // The bare name must be recoverable from an artefact identifier
        if name.contains(super::artefact::NAME_VERSION_SEPARATOR) {
            anyhow::bail!(
                "Package name '{}' contains the reserved separator '{}'",
                name,
                super::artefact::NAME_VERSION_SEPARATOR
            );
        }

        for (field, value) in [("version", &version), ("release", &release), ("arch", &arch)] {
            if value.is_empty() {
                anyhow::bail!("Package {} of '{}' cannot be empty", field, name);
            }
            if value.len() > MAX_FIELD_LENGTH {
                anyhow::bail!(
                    "Package {} of '{}' is too long ({} bytes). Maximum allowed: {} bytes",
                    field,
                    name,
                    value.len(),
                    MAX_FIELD_LENGTH
                );
            }
        }

        let epoch = epoch.filter(|e| !e.is_empty() && e != "0");

        Ok(Self {
            name,
            epoch,
            version,
            release,
            arch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> Option<&str> {
        self.epoch.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }
}

/// InstalledPackage - an installed package with its declared requirements
///
/// `requires` holds the raw dependency expressions (capability names,
/// sonames, file paths) exactly as the package database reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    record: PackageRecord,
    requires: Vec<String>,
}

impl InstalledPackage {
    pub fn new(record: PackageRecord, requires: Vec<String>) -> Self {
        Self { record, requires }
    }

    pub fn record(&self) -> &PackageRecord {
        &self.record
    }

    pub fn requires(&self) -> &[String] {
        &self.requires
    }
}

/// PendingUpdate - one available update as reported by the package manager
///
/// `replaces` is `None` when the installed package being replaced could not
/// be looked up; `replaces_raw` then carries the package manager's own
/// description of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub available: PackageRecord,
    pub replaces: Option<PackageRecord>,
    pub replaces_raw: String,
}
