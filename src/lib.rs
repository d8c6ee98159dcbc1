//! yadt-status - deployment status collector for yadt managed hosts
//!
//! This library builds a snapshot of an RPM based host for the yadt
//! orchestrator: the installed package dependency graph, the configured
//! services and the artefacts they depend on, pending updates, lock and
//! ignore state, and host identity facts. It follows hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`status_collection`): Package graph, services and artefact filtering
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use yadt_status::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create use case
//! let use_case = CollectStatusUseCase::new(
//!     RpmPackageDatabase::new(),
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     InitScriptProbe::new(),
//!     SystemHostProbe::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = StatusRequest::new(
//!     PathBuf::from("/etc/yadt.services"),
//!     PathBuf::from("/var/lock/yadt"),
//!     PathBuf::from("/etc/init.d"),
//!     PathBuf::from("/usr/bin"),
//!     Some("sudo".to_string()),
//!     ArtefactFilter::new("yadt-")?,
//! );
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let output = YamlFormatter::new().format(&response.snapshot)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod status_collection;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
    pub use crate::adapters::outbound::rpm::RpmPackageDatabase;
    pub use crate::adapters::outbound::system::{InitScriptProbe, SystemHostProbe};
    pub use crate::application::dto::{OutputFormat, StatusRequest, StatusResponse};
    pub use crate::application::use_cases::CollectStatusUseCase;
    pub use crate::ports::outbound::{
        HostProbe, OutputPresenter, PackageDatabase, ProgressReporter, ServiceDefinitionReader,
        ServiceProbe, StateFileReader, StatusFormatter,
    };
    pub use crate::status_collection::domain::{
        ArtefactId, HostFacts, InstalledPackage, OverallState, PackageIndex, PackageRecord,
        PendingUpdate, ServiceDefinition, ServiceDescriptor, ServiceTracking, StatusSnapshot,
    };
    pub use crate::status_collection::services::{
        ArtefactFilter, ClosureWalker, PackageIndexBuilder, ServiceResolver, UpdateCatalog,
    };
    pub use crate::shared::Result;
}
