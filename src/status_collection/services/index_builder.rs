use crate::ports::outbound::{PackageDatabase, ProgressReporter};
use crate::shared::Result;
use crate::status_collection::domain::{ArtefactId, PackageIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Dependency expressions with this prefix belong to rpm itself and never
/// resolve to an installed package
pub const INTERNAL_DEPENDENCY_PREFIX: &str = "rpmlib";

/// PackageIndexBuilder service building the requires/whatrequires index
/// from the installed package database
pub struct PackageIndexBuilder;

impl PackageIndexBuilder {
    /// Builds the PackageIndex
    ///
    /// # Arguments
    /// * `database` - Package database to query
    /// * `reporter` - Receives progress while packages are indexed
    ///
    /// # Errors
    /// Any package database error is returned unchanged; the index is
    /// either complete or not built at all.
    pub fn build<DB, PR>(database: &DB, reporter: &PR) -> Result<PackageIndex>
    where
        DB: PackageDatabase,
        PR: ProgressReporter,
    {
        let packages = database.installed_packages()?;
        let total = packages.len();

        // Many packages share expressions such as libc.so.6 or /bin/sh
        let mut resolved: HashMap<String, Vec<ArtefactId>> = HashMap::new();
        let mut requires: BTreeMap<ArtefactId, BTreeSet<ArtefactId>> = BTreeMap::new();

        for (i, package) in packages.iter().enumerate() {
            let artefact = ArtefactId::from_package(package.record());
            reporter.report_progress(i + 1, total, Some(package.record().name()));

            let mut deps = BTreeSet::new();
            for dependency in package.requires() {
                if dependency.starts_with(INTERNAL_DEPENDENCY_PREFIX) {
                    continue;
                }
                if !resolved.contains_key(dependency) {
                    let providers = database
                        .resolve_dependency(dependency)?
                        .iter()
                        .map(ArtefactId::from_package)
                        .collect();
                    resolved.insert(dependency.clone(), providers);
                }
                if let Some(providers) = resolved.get(dependency) {
                    deps.extend(providers.iter().cloned());
                }
            }

            requires.entry(artefact).or_default().extend(deps);
        }

        let index = PackageIndex::from_requires(requires);
        reporter.report_completion(&format!(
            "✅ Indexed {} artefact(s) with {} dependency edge(s)",
            index.artefact_count(),
            index.edge_count()
        ));

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status_collection::domain::{InstalledPackage, PackageRecord, PendingUpdate};
    use std::cell::RefCell;
    use std::path::Path;

    fn record(name: &str) -> PackageRecord {
        PackageRecord::new(name, None, "1", "1", "x86_64").unwrap()
    }

    struct FakeDatabase {
        packages: Vec<InstalledPackage>,
        providers: HashMap<String, Vec<PackageRecord>>,
        queries: RefCell<Vec<String>>,
        fail: bool,
    }

    impl FakeDatabase {
        fn new(packages: &[(&str, &[&str])], providers: &[(&str, &[&str])]) -> Self {
            Self {
                packages: packages
                    .iter()
                    .map(|(name, reqs)| {
                        InstalledPackage::new(
                            record(name),
                            reqs.iter().map(|r| r.to_string()).collect(),
                        )
                    })
                    .collect(),
                providers: providers
                    .iter()
                    .map(|(dep, pkgs)| (dep.to_string(), pkgs.iter().map(|p| record(p)).collect()))
                    .collect(),
                queries: RefCell::new(Vec::new()),
                fail: false,
            }
        }
    }

    impl PackageDatabase for FakeDatabase {
        fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
            if self.fail {
                anyhow::bail!("rpmdb open failed");
            }
            Ok(self.packages.clone())
        }

        fn resolve_dependency(&self, dependency: &str) -> Result<Vec<PackageRecord>> {
            self.queries.borrow_mut().push(dependency.to_string());
            Ok(self.providers.get(dependency).cloned().unwrap_or_default())
        }

        fn file_owners(&self, _path: &Path) -> Result<Vec<PackageRecord>> {
            Ok(vec![])
        }

        fn available_updates(&self) -> Result<Vec<PendingUpdate>> {
            Ok(vec![])
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn id(name: &str) -> ArtefactId {
        ArtefactId::from_package(&record(name))
    }

    #[test]
    fn test_build_resolves_dependencies() {
        let db = FakeDatabase::new(
            &[
                ("httpd", &["libc.so.6()(64bit)", "/bin/sh", "httpd-tools"]),
                ("bash", &["libc.so.6()(64bit)"]),
                ("glibc", &[]),
                ("httpd-tools", &[]),
            ],
            &[
                ("libc.so.6()(64bit)", &["glibc"]),
                ("/bin/sh", &["bash"]),
                ("httpd-tools", &["httpd-tools"]),
            ],
        );

        let index = PackageIndexBuilder::build(&db, &SilentReporter).unwrap();

        assert_eq!(index.artefact_count(), 4);
        assert_eq!(
            index.requires_of(&id("httpd")),
            &[id("bash"), id("glibc"), id("httpd-tools")]
        );
        assert_eq!(index.requires_of(&id("bash")), &[id("glibc")]);
        assert!(index.requires_of(&id("glibc")).is_empty());
        assert_eq!(index.whatrequires_of(&id("glibc")), &[id("bash"), id("httpd")]);
    }

    #[test]
    fn test_build_skips_internal_dependencies() {
        let db = FakeDatabase::new(
            &[(
                "bash",
                &["rpmlib(CompressedFileNames) <= 3.0.4-1", "rpmlib(PayloadIsXz)", "glibc"],
            ), ("glibc", &[])],
            &[("glibc", &["glibc"])],
        );

        let index = PackageIndexBuilder::build(&db, &SilentReporter).unwrap();

        assert_eq!(index.requires_of(&id("bash")), &[id("glibc")]);
        assert!(db.queries.borrow().iter().all(|q| !q.starts_with("rpmlib")));
    }

    #[test]
    fn test_build_deduplicates_multiple_providers() {
        let db = FakeDatabase::new(
            &[
                ("app", &["libssl.so", "openssl-libs", "libcrypto.so"]),
                ("openssl-libs", &[]),
                ("compat-openssl", &[]),
            ],
            &[
                ("libssl.so", &["openssl-libs", "compat-openssl"]),
                ("openssl-libs", &["openssl-libs"]),
                ("libcrypto.so", &["openssl-libs"]),
            ],
        );

        let index = PackageIndexBuilder::build(&db, &SilentReporter).unwrap();

        assert_eq!(
            index.requires_of(&id("app")),
            &[id("compat-openssl"), id("openssl-libs")]
        );
    }

    #[test]
    fn test_build_unresolvable_dependency_is_not_an_error() {
        let db = FakeDatabase::new(&[("app", &["not-installed"])], &[]);

        let index = PackageIndexBuilder::build(&db, &SilentReporter).unwrap();

        assert!(index.requires_of(&id("app")).is_empty());
        assert!(index.whatrequires().is_empty());
    }

    #[test]
    fn test_build_queries_each_expression_once() {
        let db = FakeDatabase::new(
            &[("a", &["libc.so.6"]), ("b", &["libc.so.6"]), ("glibc", &[])],
            &[("libc.so.6", &["glibc"])],
        );

        PackageIndexBuilder::build(&db, &SilentReporter).unwrap();

        assert_eq!(db.queries.borrow().as_slice(), &["libc.so.6".to_string()]);
    }

    #[test]
    fn test_build_propagates_database_failure() {
        let mut db = FakeDatabase::new(&[], &[]);
        db.fail = true;

        let result = PackageIndexBuilder::build(&db, &SilentReporter);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rpmdb open failed"));
    }
}
