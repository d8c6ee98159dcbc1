use super::{ArtefactId, HostFacts, ServiceDescriptor};
use serde::Serialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// New artefact -> the artefact (or raw package manager description) it replaces
pub type UpdateMap = BTreeMap<ArtefactId, String>;

/// Overall deployment state of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallState {
    UpdateNeeded,
    Uptodate,
}

impl OverallState {
    pub fn from_updates(updates: &UpdateMap) -> Self {
        if updates.is_empty() {
            OverallState::Uptodate
        } else {
            OverallState::UpdateNeeded
        }
    }
}

impl std::fmt::Display for OverallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallState::UpdateNeeded => write!(f, "update_needed"),
            OverallState::Uptodate => write!(f, "uptodate"),
        }
    }
}

/// StatusSnapshot - the structured status payload handed to the orchestrator
///
/// Holds plain data only: no package database handle, raw index, service
/// definition source or compiled filter leaks into it.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub services: Vec<ServiceDescriptor>,
    pub handled_artefacts: Vec<ArtefactId>,
    pub current_artefacts: Vec<ArtefactId>,
    pub updates: UpdateMap,
    /// Same as `updates`, absent when nothing is pending
    pub next_artefacts: Option<UpdateMap>,
    pub state: OverallState,
    pub host: String,
    pub hostname: String,
    pub fqdn: String,
    pub ip: Option<String>,
    pub uptime: f64,
    pub date: String,
    pub epoch: i64,
    pub interface: BTreeMap<String, String>,
    pub pwd: PathBuf,
    pub lockstate: Option<Value>,
}

impl StatusSnapshot {
    pub fn new(
        services: Vec<ServiceDescriptor>,
        handled_artefacts: Vec<ArtefactId>,
        current_artefacts: Vec<ArtefactId>,
        updates: UpdateMap,
        host_facts: HostFacts,
        lockstate: Option<Value>,
    ) -> Self {
        let state = OverallState::from_updates(&updates);
        let next_artefacts = if updates.is_empty() {
            None
        } else {
            Some(updates.clone())
        };

        Self {
            services,
            handled_artefacts,
            current_artefacts,
            updates,
            next_artefacts,
            state,
            hostname: host_facts.host.clone(),
            host: host_facts.host,
            fqdn: host_facts.fqdn,
            ip: host_facts.ip,
            uptime: host_facts.uptime,
            date: host_facts.date,
            epoch: host_facts.epoch,
            interface: host_facts.interface,
            pwd: host_facts.pwd,
            lockstate,
        }
    }
}
