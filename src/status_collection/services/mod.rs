mod artefact_filter;
mod closure_walker;
mod index_builder;
mod service_resolver;
mod update_catalog;

pub use artefact_filter::ArtefactFilter;
pub use closure_walker::ClosureWalker;
pub use index_builder::{PackageIndexBuilder, INTERNAL_DEPENDENCY_PREFIX};
pub use service_resolver::ServiceResolver;
pub use update_catalog::UpdateCatalog;
