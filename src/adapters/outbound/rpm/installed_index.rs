use super::version::Constraint;
use crate::shared::Result;
use crate::status_collection::domain::{InstalledPackage, PackageRecord};
use std::collections::HashMap;

/// rpm query format emitting one header line per package followed by
/// tagged requirement, capability and file lines. Requirements and
/// capabilities carry their comparison flags and version.
pub const QUERY_FORMAT: &str = "@@PKG\t%{NAME}\t%{EPOCH}\t%{VERSION}\t%{RELEASE}\t%{ARCH}\n\
[R\t%{REQUIRENAME}\t%{REQUIREFLAGS:depflags}\t%{REQUIREVERSION}\n]\
[P\t%{PROVIDENAME}\t%{PROVIDEFLAGS:depflags}\t%{PROVIDEVERSION}\n]\
[F\t%{FILENAMES}\n]";

const HEADER_MARKER: &str = "@@PKG";

/// rpm's rendering of an unset tag
const NONE_VALUE: &str = "(none)";

/// Boolean (rich) dependencies such as `(foo if bar)` open with this
const RICH_DEPENDENCY_PREFIX: char = '(';

#[derive(Debug, Clone)]
struct IndexedPackage {
    record: PackageRecord,
    requires: Vec<String>,
}

#[derive(Debug, Clone)]
struct Provide {
    package: usize,
    constraint: Option<Constraint>,
}

/// InstalledIndex - in-memory view of the rpm database
///
/// Built from a single `rpm -qa --queryformat` run; answers capability and
/// file lookups without further rpm invocations.
#[derive(Debug, Clone, Default)]
pub struct InstalledIndex {
    packages: Vec<IndexedPackage>,
    provides: HashMap<String, Vec<Provide>>,
    files: HashMap<String, Vec<usize>>,
}

impl InstalledIndex {
    /// Parses the output of `rpm -qa --queryformat QUERY_FORMAT`
    ///
    /// # Errors
    /// Returns an error on malformed header lines or lines appearing
    /// before the first package header
    pub fn parse(output: &str) -> Result<Self> {
        let mut index = InstalledIndex::default();

        for (line_no, line) in output.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let (tag, value) = line.split_once('\t').unwrap_or((line, ""));

            if tag == HEADER_MARKER {
                let record = parse_header(value).map_err(|e| {
                    anyhow::anyhow!("line {}: {}", line_no + 1, e)
                })?;
                index.packages.push(IndexedPackage {
                    record,
                    requires: Vec::new(),
                });
                continue;
            }

            let Some(current) = index.packages.len().checked_sub(1) else {
                anyhow::bail!("line {}: data before first package header", line_no + 1);
            };

            let mut fields = value.splitn(3, '\t');
            let name = fields.next().unwrap_or_default();
            let flags = fields.next().unwrap_or_default();
            let version = fields.next().unwrap_or_default();
            if name.is_empty() || name == NONE_VALUE {
                continue;
            }

            match tag {
                "R" => index.packages[current]
                    .requires
                    .push(dependency_expression(name, flags, version)),
                "P" => index
                    .provides
                    .entry(name.to_string())
                    .or_default()
                    .push(Provide {
                        package: current,
                        constraint: Constraint::new(flags, version),
                    }),
                "F" => push_unique(&mut index.files, name, current),
                other => anyhow::bail!("line {}: unknown tag '{}'", line_no + 1, other),
            }
        }

        Ok(index)
    }

    pub fn installed_packages(&self) -> Vec<InstalledPackage> {
        self.packages
            .iter()
            .map(|p| InstalledPackage::new(p.record.clone(), p.requires.clone()))
            .collect()
    }

    /// Installed packages satisfying the dependency expression
    ///
    /// `name`, `name <op> [epoch:]version[-release]` or a file path.
    /// Versioned requirements are matched against the provided versions
    /// with rpm's comparison rules; an unversioned provide satisfies any
    /// version. Rich dependencies are not evaluated and resolve to nothing.
    pub fn resolve(&self, dependency: &str) -> Vec<PackageRecord> {
        if dependency.starts_with(RICH_DEPENDENCY_PREFIX) {
            return Vec::new();
        }

        let (name, requirement) = parse_dependency(dependency);
        let mut hits: Vec<usize> = Vec::new();

        if name.starts_with('/') {
            hits.extend(self.files.get(name).into_iter().flatten());
        }
        hits.extend(
            self.provides
                .get(name)
                .into_iter()
                .flatten()
                .filter(|provide| match (&provide.constraint, &requirement) {
                    (Some(provided), Some(required)) => provided.overlaps(required),
                    _ => true,
                })
                .map(|provide| provide.package),
        );

        self.records(hits)
    }

    /// Installed packages owning `path`, either as a file or as a provide
    pub fn owners(&self, path: &str) -> Vec<PackageRecord> {
        let hits: Vec<usize> = self
            .files
            .get(path)
            .into_iter()
            .flatten()
            .copied()
            .chain(
                self.provides
                    .get(path)
                    .into_iter()
                    .flatten()
                    .map(|provide| provide.package),
            )
            .collect();

        self.records(hits)
    }

    /// The installed package with the given name and architecture
    ///
    /// With several installed versions (kernels) the last one listed wins.
    pub fn find(&self, name: &str, arch: &str) -> Option<&PackageRecord> {
        self.packages
            .iter()
            .rev()
            .map(|p| &p.record)
            .find(|r| r.name() == name && r.arch() == arch)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn records(&self, mut hits: Vec<usize>) -> Vec<PackageRecord> {
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter()
            .map(|i| self.packages[i].record.clone())
            .collect()
    }
}

fn push_unique(map: &mut HashMap<String, Vec<usize>>, key: &str, package: usize) {
    let entry = map.entry(key.to_string()).or_default();
    if entry.last() != Some(&package) {
        entry.push(package);
    }
}

fn parse_header(value: &str) -> Result<PackageRecord> {
    let fields: Vec<&str> = value.split('\t').collect();
    let [name, epoch, version, release, arch] = fields.as_slice() else {
        anyhow::bail!(
            "expected 5 header fields (name, epoch, version, release, arch), found {}",
            fields.len()
        );
    };

    let epoch = Some(*epoch)
        .filter(|e| *e != NONE_VALUE)
        .map(str::to_string);

    PackageRecord::new(*name, epoch, *version, *release, *arch)
}

/// Renders a requirement the way rpm prints it: `name`, or
/// `name <op> version` when it is versioned
fn dependency_expression(name: &str, flags: &str, version: &str) -> String {
    let (flags, version) = (flags.trim(), version.trim());
    if flags.is_empty() || version.is_empty() || version == NONE_VALUE {
        name.to_string()
    } else {
        format!("{} {} {}", name, flags, version)
    }
}

/// Splits a dependency expression into its capability name and optional
/// version constraint (`bash >= 4.0` -> `bash`, `>= 4.0`)
fn parse_dependency(dependency: &str) -> (&str, Option<Constraint>) {
    let mut parts = dependency.split_whitespace();
    let name = parts.next().unwrap_or(dependency);
    let constraint = match (parts.next(), parts.next()) {
        (Some(flags), Some(version)) => Constraint::new(flags, version),
        _ => None,
    };
    (name, constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "@@PKG\tbash\t(none)\t4.2.46\t34.el7\tx86_64
R\t/bin/sh
R\tlibc.so.6()(64bit)
R\trpmlib(PayloadIsXz)
P\tbash\t=\t4.2.46-34.el7
P\tbash(x86-64)\t=\t4.2.46-34.el7
F\t/bin/bash
F\t/bin/sh
@@PKG\tglibc\t(none)\t2.17\t317.el7\tx86_64
P\tlibc.so.6()(64bit)\t\t
P\tglibc\t=\t2.17-317.el7
F\t/lib64/libc.so.6
@@PKG\tgpg-pubkey\t(none)\tf4a80eb5\t53a7ff4b\t(none)
@@PKG\topenssl-libs\t1\t1.0.2k\t19.el7\tx86_64
R\tlibc.so.6()(64bit)\t\t
R\tglibc\t>=\t2.12
P\tlibssl.so.10()(64bit)
F\t/etc/init.d/shared
@@PKG\tcompat-openssl\t(none)\t1.0.2k\t1.el7\tx86_64
P\tlibssl.so.10()(64bit)
F\t/etc/init.d/shared
";

    fn names(records: &[PackageRecord]) -> Vec<&str> {
        records.iter().map(PackageRecord::name).collect()
    }

    #[test]
    fn test_parse_packages() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(index.len(), 5);

        let packages = index.installed_packages();
        assert_eq!(packages[0].record().name(), "bash");
        assert_eq!(packages[0].record().epoch(), None);
        assert_eq!(
            packages[0].requires(),
            &["/bin/sh", "libc.so.6()(64bit)", "rpmlib(PayloadIsXz)"]
        );
        assert_eq!(packages[3].record().epoch(), Some("1"));
        assert!(packages[2].requires().is_empty());
    }

    #[test]
    fn test_resolve_capability() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(names(&index.resolve("libc.so.6()(64bit)")), vec!["glibc"]);
    }

    #[test]
    fn test_resolve_multiple_providers() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(
            names(&index.resolve("libssl.so.10()(64bit)")),
            vec!["openssl-libs", "compat-openssl"]
        );
    }

    #[test]
    fn test_resolve_file_dependency() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(names(&index.resolve("/bin/sh")), vec!["bash"]);
    }

    #[test]
    fn test_resolve_checks_version_constraint() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(names(&index.resolve("glibc >= 2.12")), vec!["glibc"]);
        assert_eq!(names(&index.resolve("glibc = 2.17-317.el7")), vec!["glibc"]);
        assert!(index.resolve("glibc >= 2.28").is_empty());
        assert!(index.resolve("glibc < 2.17").is_empty());
    }

    #[test]
    fn test_unversioned_provide_satisfies_versioned_requirement() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(
            names(&index.resolve("libc.so.6()(64bit) >= 99")),
            vec!["glibc"]
        );
    }

    #[test]
    fn test_versioned_requirement_picks_matching_kernel() {
        let output = "@@PKG\tkernel\t(none)\t3.10.0\t1127.el7\tx86_64
P\tkernel\t=\t3.10.0-1127.el7
P\tkernel-uname-r\t=\t3.10.0-1127.el7.x86_64
@@PKG\tkernel\t(none)\t3.10.0\t1160.el7\tx86_64
P\tkernel\t=\t3.10.0-1160.el7
P\tkernel-uname-r\t=\t3.10.0-1160.el7.x86_64
@@PKG\tkmod-foo\t(none)\t1.0\t1.el7\tx86_64
R\tkernel-uname-r\t=\t3.10.0-1160.el7.x86_64
R\tkernel\t>=\t3.10.0
";
        let index = InstalledIndex::parse(output).unwrap();
        let packages = index.installed_packages();

        let kmod = &packages[2];
        assert_eq!(
            kmod.requires(),
            &["kernel-uname-r = 3.10.0-1160.el7.x86_64", "kernel >= 3.10.0"]
        );

        let providers = index.resolve(&kmod.requires()[0]);
        let releases: Vec<&str> = providers.iter().map(PackageRecord::release).collect();
        assert_eq!(releases, vec!["1160.el7"]);

        assert_eq!(index.resolve(&kmod.requires()[1]).len(), 2);
    }

    #[test]
    fn test_rich_dependency_resolves_to_nothing() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert!(index.resolve("(glibc if bash)").is_empty());
    }

    #[test]
    fn test_resolve_unknown() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert!(index.resolve("perl").is_empty());
    }

    #[test]
    fn test_owners() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        assert_eq!(names(&index.owners("/bin/bash")), vec!["bash"]);
        assert_eq!(
            names(&index.owners("/etc/init.d/shared")),
            vec!["openssl-libs", "compat-openssl"]
        );
        assert!(index.owners("/etc/init.d/unknown").is_empty());
    }

    #[test]
    fn test_find_by_name_and_arch() {
        let index = InstalledIndex::parse(SAMPLE).unwrap();
        let glibc = index.find("glibc", "x86_64").unwrap();
        assert_eq!(glibc.version(), "2.17");
        assert!(index.find("glibc", "i686").is_none());
    }

    #[test]
    fn test_parse_rejects_data_before_header() {
        let result = InstalledIndex::parse("R\tglibc\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("before first package header"));
    }

    #[test]
    fn test_parse_rejects_short_header() {
        let result = InstalledIndex::parse("@@PKG\tbash\t(none)\t4.2\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("expected 5 header fields"));
    }

    #[test]
    fn test_parse_empty_output() {
        let index = InstalledIndex::parse("").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_parse_dependency() {
        let (name, constraint) = parse_dependency("bash >= 4.0");
        assert_eq!(name, "bash");
        assert_eq!(constraint, Constraint::new(">=", "4.0"));

        let (name, constraint) = parse_dependency("libc.so.6()(64bit)");
        assert_eq!(name, "libc.so.6()(64bit)");
        assert!(constraint.is_none());
    }

    #[test]
    fn test_dependency_expression() {
        assert_eq!(dependency_expression("bash", "", ""), "bash");
        assert_eq!(dependency_expression("bash", ">=", "4.0"), "bash >= 4.0");
        assert_eq!(dependency_expression("bash", "", "(none)"), "bash");
    }
}
