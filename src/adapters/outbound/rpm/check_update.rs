use crate::shared::Result;
use crate::status_collection::domain::PackageRecord;

/// `yum check-update` exit code signalling that updates are listed
pub const UPDATES_AVAILABLE_EXIT_CODE: i32 = 100;

/// Header of the obsoletes section, which is not part of the update list
const OBSOLETING_HEADER: &str = "Obsoleting Packages";

/// One line of `yum check-update` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableUpdate {
    pub record: PackageRecord,
    /// `name.arch` as printed by yum
    pub name_arch: String,
}

/// Parses the update list printed by `yum -q check-update`
///
/// Entries are `name.arch  [epoch:]version-release  repository`. yum wraps
/// long package names onto their own line, so entries are assembled from
/// whitespace separated tokens rather than from lines.
pub fn parse_check_update(output: &str) -> Result<Vec<AvailableUpdate>> {
    let mut tokens: Vec<&str> = Vec::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(OBSOLETING_HEADER) {
            break;
        }
        if trimmed.is_empty() || is_notice(trimmed) {
            continue;
        }
        tokens.extend(trimmed.split_whitespace());
    }

    if tokens.len() % 3 != 0 {
        anyhow::bail!(
            "unexpected check-update output: {} token(s) do not form name/version/repository triples",
            tokens.len()
        );
    }

    tokens
        .chunks(3)
        .map(|entry| parse_entry(entry[0], entry[1]))
        .collect()
}

fn is_notice(line: &str) -> bool {
    line.starts_with("Loaded plugins")
        || line.starts_with("Security:")
        || line.starts_with("Loading mirror speeds")
        || line.starts_with("* ")
}

fn parse_entry(name_arch: &str, evr: &str) -> Result<AvailableUpdate> {
    let (name, arch) = name_arch
        .rsplit_once('.')
        .ok_or_else(|| anyhow::anyhow!("'{}' is not of the form name.arch", name_arch))?;

    let (epoch, version_release) = match evr.split_once(':') {
        Some((epoch, rest)) => (Some(epoch.to_string()), rest),
        None => (None, evr),
    };
    let (version, release) = version_release
        .rsplit_once('-')
        .ok_or_else(|| anyhow::anyhow!("'{}' is not of the form version-release", evr))?;

    Ok(AvailableUpdate {
        record: PackageRecord::new(name, epoch, version, release, arch)?,
        name_arch: name_arch.to_string(),
    })
}
