use super::ArtefactId;
use serde::Serialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Keys the collector writes itself; definition metadata may not shadow them
const RESERVED_KEYS: &[&str] = &[
    "name",
    "init_script",
    "service_artefact",
    "toplevel_artefacts",
    "needs_artefacts",
    "state_handling",
    "state",
    "ignored",
    "extra_script",
    "extra",
];

/// ServiceDefinition - one entry of the service definitions document
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    pub name: String,
    pub metadata: BTreeMap<String, Value>,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(name: impl Into<String>, metadata: BTreeMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateHandling {
    /// Status is managed by the orchestrator, not through the package graph
    Serverside,
}

/// How a service's artefacts are tracked
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceTracking {
    /// The init script is owned by exactly one installed package
    Tracked {
        init_script: PathBuf,
        service_artefact: ArtefactId,
        toplevel_artefacts: Vec<ArtefactId>,
        needs_artefacts: Vec<String>,
    },
    /// No single owning package could be determined
    External { state_handling: StateHandling },
}

impl ServiceTracking {
    pub fn external() -> Self {
        ServiceTracking::External {
            state_handling: StateHandling::Serverside,
        }
    }
}

/// ServiceDescriptor - everything the snapshot reports about one service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub tracking: ServiceTracking,
    /// Exit code of the init script's `status` action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_script: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl ServiceDescriptor {
    pub fn new(definition: ServiceDefinition, tracking: ServiceTracking) -> Self {
        let mut metadata = definition.metadata;
        metadata.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        Self {
            name: definition.name,
            metadata,
            tracking,
            state: None,
            ignored: None,
            extra_script: None,
            extra: None,
        }
    }

    pub fn init_script(&self) -> Option<&PathBuf> {
        match &self.tracking {
            ServiceTracking::Tracked { init_script, .. } => Some(init_script),
            ServiceTracking::External { .. } => None,
        }
    }

    pub fn service_artefact(&self) -> Option<&ArtefactId> {
        match &self.tracking {
            ServiceTracking::Tracked {
                service_artefact, ..
            } => Some(service_artefact),
            ServiceTracking::External { .. } => None,
        }
    }

    pub fn toplevel_artefacts(&self) -> &[ArtefactId] {
        match &self.tracking {
            ServiceTracking::Tracked {
                toplevel_artefacts, ..
            } => toplevel_artefacts,
            ServiceTracking::External { .. } => &[],
        }
    }

    pub fn needs_artefacts(&self) -> &[String] {
        match &self.tracking {
            ServiceTracking::Tracked {
                needs_artefacts, ..
            } => needs_artefacts,
            ServiceTracking::External { .. } => &[],
        }
    }

    pub fn is_externally_managed(&self) -> bool {
        matches!(self.tracking, ServiceTracking::External { .. })
    }
}
