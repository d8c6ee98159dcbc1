pub mod artefact;
pub mod host_facts;
pub mod package;
pub mod package_index;
pub mod service;
pub mod status_snapshot;

pub use artefact::{strip_version, ArtefactId, NAME_VERSION_SEPARATOR};
pub use host_facts::{short_hostname, HostFacts};
pub use package::{InstalledPackage, PackageRecord, PendingUpdate};
pub use package_index::{ArtefactMap, PackageIndex};
pub use service::{ServiceDefinition, ServiceDescriptor, ServiceTracking, StateHandling};
pub use status_snapshot::{OverallState, StatusSnapshot, UpdateMap};
