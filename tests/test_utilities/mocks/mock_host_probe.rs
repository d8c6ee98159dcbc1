use std::collections::BTreeMap;
use std::path::PathBuf;
use yadt_status::prelude::*;

/// Mock HostProbe for testing with fixed facts
pub struct MockHostProbe;

impl MockHostProbe {
    pub fn new() -> Self {
        Self
    }
}

impl HostProbe for MockHostProbe {
    fn facts(&self) -> Result<HostFacts> {
        let mut interface = BTreeMap::new();
        interface.insert("eth0".to_string(), "10.1.2.3".to_string());
        interface.insert("eth1".to_string(), String::new());

        Ok(HostFacts {
            host: "app01".to_string(),
            fqdn: "app01.dc1.example.com".to_string(),
            ip: Some("10.1.2.3".to_string()),
            uptime: 4711.5,
            date: "2024-03-01 08:15:00.123456".to_string(),
            epoch: 1_709_280_900,
            interface,
            pwd: PathBuf::from("/home/deploy"),
        })
    }
}
