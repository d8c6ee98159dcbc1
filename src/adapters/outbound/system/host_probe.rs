use crate::ports::outbound::HostProbe;
use crate::shared::Result;
use crate::status_collection::domain::{short_hostname, HostFacts};
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::net::{IpAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use sysinfo::{Networks, System};

const PROC_UPTIME: &str = "/proc/uptime";
const LOOPBACK_INTERFACE: &str = "lo";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// SystemHostProbe adapter reading identity and network facts of the host
///
/// Host name, uptime fallback and interfaces come from `sysinfo`; the fully
/// qualified name from `hostname --fqdn`; the address from the system
/// resolver.
pub struct SystemHostProbe {
    uptime_path: PathBuf,
}

impl SystemHostProbe {
    pub fn new() -> Self {
        Self {
            uptime_path: PathBuf::from(PROC_UPTIME),
        }
    }

    /// Reads uptime from `path` instead of `/proc/uptime`
    pub fn with_uptime_path(path: PathBuf) -> Self {
        Self { uptime_path: path }
    }

    fn uptime(&self) -> f64 {
        fs::read_to_string(&self.uptime_path)
            .ok()
            .and_then(|content| parse_uptime(&content))
            .unwrap_or_else(|| System::uptime() as f64)
    }
}

impl Default for SystemHostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SystemHostProbe {
    fn facts(&self) -> Result<HostFacts> {
        let hostname = System::host_name()
            .ok_or_else(|| anyhow::anyhow!("Failed to determine the host name"))?;
        let now = Local::now();

        Ok(HostFacts {
            host: short_hostname(&hostname).to_string(),
            fqdn: fully_qualified_name().unwrap_or_else(|| hostname.clone()),
            ip: resolve_ipv4(&hostname),
            uptime: self.uptime(),
            date: now.format(DATE_FORMAT).to_string(),
            epoch: now.timestamp(),
            interface: interface_addresses(),
            pwd: std::env::current_dir()?,
        })
    }
}

/// First field of `/proc/uptime`: seconds since boot
fn parse_uptime(content: &str) -> Option<f64> {
    content.split_whitespace().next()?.parse().ok()
}

fn fully_qualified_name() -> Option<String> {
    let output = Command::new("hostname")
        .arg("--fqdn")
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let fqdn = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!fqdn.is_empty()).then_some(fqdn)
}

fn resolve_ipv4(hostname: &str) -> Option<String> {
    (hostname, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .find(IpAddr::is_ipv4)
        .map(|ip| ip.to_string())
}

/// Interface name -> space separated IPv4 addresses
///
/// Interfaces without an IPv4 address are listed with an empty string.
fn interface_addresses() -> BTreeMap<String, String> {
    let networks = Networks::new_with_refreshed_list();

    networks
        .iter()
        .filter(|(name, _)| name.as_str() != LOOPBACK_INTERFACE)
        .map(|(name, data)| {
            let addresses: Vec<String> = data
                .ip_networks()
                .iter()
                .filter(|network| network.addr.is_ipv4())
                .map(|network| network.addr.to_string())
                .collect();
            (name.clone(), addresses.join(" "))
        })
        .collect()
}
