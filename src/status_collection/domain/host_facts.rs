use std::collections::BTreeMap;
use std::path::PathBuf;

/// HostFacts - identity and network facts of the local host
#[derive(Debug, Clone, PartialEq)]
pub struct HostFacts {
    /// Short host name (everything before the first dot)
    pub host: String,
    pub fqdn: String,
    /// Address the host name resolves to, if it resolves at all
    pub ip: Option<String>,
    /// Seconds since boot
    pub uptime: f64,
    /// Local time formatted as `YYYY-MM-DD HH:MM:SS.ffffff`
    pub date: String,
    /// Seconds since the Unix epoch, rounded
    pub epoch: i64,
    /// Interface name -> space separated IPv4 addresses, loopback excluded
    pub interface: BTreeMap<String, String>,
    pub pwd: PathBuf,
}

/// Cuts a host name down to its first label
pub fn short_hostname(hostname: &str) -> &str {
    hostname
        .split_once('.')
        .map_or(hostname, |(short, _)| short)
}
