use crate::shared::Result;
use crate::status_collection::domain::{InstalledPackage, PackageRecord, PendingUpdate};
use std::path::Path;

/// PackageDatabase port for read-only queries against the host's package
/// database
///
/// This port abstracts the package manager (rpm/yum) so the dependency
/// graph can be built and tested without a real RPM database.
pub trait PackageDatabase {
    /// Enumerates every installed package with its declared requirements
    ///
    /// # Errors
    /// Returns an error if the package database cannot be opened or queried.
    /// Callers treat this as fatal: no snapshot can be produced without a
    /// complete index.
    fn installed_packages(&self) -> Result<Vec<InstalledPackage>>;

    /// Resolves one dependency expression to the installed packages that
    /// satisfy it
    ///
    /// # Returns
    /// Zero, one or many packages; several providers are normal
    fn resolve_dependency(&self, dependency: &str) -> Result<Vec<PackageRecord>>;

    /// Looks up the installed packages owning a file
    ///
    /// # Returns
    /// An empty vector when the file is not managed by the package system
    fn file_owners(&self, path: &Path) -> Result<Vec<PackageRecord>>;

    /// Computes the updates available for installed packages
    fn available_updates(&self) -> Result<Vec<PendingUpdate>>;
}
