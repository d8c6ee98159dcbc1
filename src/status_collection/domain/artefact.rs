use super::PackageRecord;
use serde::Serialize;

/// Separator between the bare package name and the version-bearing suffix
pub const NAME_VERSION_SEPARATOR: char = '/';

/// ArtefactId - unique key of one installed package version
///
/// Formatted as `name/[epoch:]version-release.arch`. Two identifiers are
/// equal iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtefactId(String);

impl ArtefactId {
    /// Wraps an already formatted identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_package(pkg: &PackageRecord) -> Self {
        let id = match pkg.epoch() {
            Some(epoch) => format!(
                "{}{}{}:{}-{}.{}",
                pkg.name(),
                NAME_VERSION_SEPARATOR,
                epoch,
                pkg.version(),
                pkg.release(),
                pkg.arch()
            ),
            None => format!(
                "{}{}{}-{}.{}",
                pkg.name(),
                NAME_VERSION_SEPARATOR,
                pkg.version(),
                pkg.release(),
                pkg.arch()
            ),
        };
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare package name of this artefact
    pub fn bare_name(&self) -> &str {
        strip_version(&self.0)
    }
}

impl std::fmt::Display for ArtefactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&PackageRecord> for ArtefactId {
    fn from(pkg: &PackageRecord) -> Self {
        Self::from_package(pkg)
    }
}

/// Returns everything before the first name/version separator
pub fn strip_version(artefact: &str) -> &str {
    artefact
        .split_once(NAME_VERSION_SEPARATOR)
        .map_or(artefact, |(name, _)| name)
}
