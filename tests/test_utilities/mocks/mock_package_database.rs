use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yadt_status::prelude::*;

/// Mock PackageDatabase for testing, standing in for rpm and yum
#[derive(Default)]
pub struct MockPackageDatabase {
    packages: Vec<InstalledPackage>,
    providers: HashMap<String, Vec<PackageRecord>>,
    owners: HashMap<PathBuf, Vec<PackageRecord>>,
    updates: Vec<PendingUpdate>,
    error: Option<String>,
}

impl MockPackageDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `name-version-1.x86_64`, which also provides its own name
    pub fn with_package(mut self, name: &str, version: &str, requires: &[&str]) -> Self {
        let package = record(name, version);
        self.providers
            .entry(name.to_string())
            .or_default()
            .push(package.clone());
        self.packages.push(InstalledPackage::new(
            package,
            requires.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    pub fn with_owner(mut self, path: &str, name: &str, version: &str) -> Self {
        self.owners
            .entry(PathBuf::from(path))
            .or_default()
            .push(record(name, version));
        self
    }

    pub fn with_update(mut self, name: &str, from: &str, to: &str) -> Self {
        self.updates.push(PendingUpdate {
            available: record(name, to),
            replaces: Some(record(name, from)),
            replaces_raw: format!("{}.x86_64", name),
        });
        self
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }
}

pub fn record(name: &str, version: &str) -> PackageRecord {
    PackageRecord::new(name, None, version, "1", "x86_64").unwrap()
}

impl PackageDatabase for MockPackageDatabase {
    fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
        if let Some(message) = &self.error {
            anyhow::bail!("{}", message);
        }
        Ok(self.packages.clone())
    }

    fn resolve_dependency(&self, dependency: &str) -> Result<Vec<PackageRecord>> {
        let name = dependency.split_whitespace().next().unwrap_or(dependency);
        Ok(self.providers.get(name).cloned().unwrap_or_default())
    }

    fn file_owners(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        Ok(self.owners.get(path).cloned().unwrap_or_default())
    }

    fn available_updates(&self) -> Result<Vec<PendingUpdate>> {
        Ok(self.updates.clone())
    }
}
