use super::{ArtefactFilter, ClosureWalker};
use crate::ports::outbound::{PackageDatabase, ProgressReporter};
use crate::shared::Result;
use crate::status_collection::domain::{
    ArtefactId, PackageIndex, ServiceDefinition, ServiceDescriptor, ServiceTracking,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// ServiceResolver service mapping services onto the package graph
///
/// A service is tracked through the package graph when its init script is
/// owned by exactly one installed package; otherwise its state is handled
/// by the orchestrator.
pub struct ServiceResolver<'a, DB, PR> {
    database: &'a DB,
    index: &'a PackageIndex,
    filter: &'a ArtefactFilter,
    reporter: &'a PR,
}

impl<'a, DB, PR> ServiceResolver<'a, DB, PR>
where
    DB: PackageDatabase,
    PR: ProgressReporter,
{
    pub fn new(
        database: &'a DB,
        index: &'a PackageIndex,
        filter: &'a ArtefactFilter,
        reporter: &'a PR,
    ) -> Self {
        Self {
            database,
            index,
            filter,
            reporter,
        }
    }

    /// Resolves one service definition into its descriptor
    ///
    /// # Arguments
    /// * `definition` - The service as declared in the definitions file
    /// * `init_script` - Path of the service's init script
    ///
    /// # Errors
    /// Returns an error only if the package database query fails
    pub fn resolve(
        &self,
        definition: ServiceDefinition,
        init_script: PathBuf,
    ) -> Result<ServiceDescriptor> {
        let tracking = match self.service_artefact(&init_script)? {
            Some(artefact) => {
                let walker = ClosureWalker::new(self.index);
                let toplevel_artefacts = walker.all_whatrequires(&artefact);
                // Bare names may repeat when several versions are installed
                let needs_artefacts = walker
                    .all_requires(&toplevel_artefacts)
                    .iter()
                    .filter(|a| self.filter.matches(a.as_str()))
                    .map(|a| a.bare_name().to_string())
                    .collect();

                ServiceTracking::Tracked {
                    init_script,
                    service_artefact: artefact,
                    toplevel_artefacts,
                    needs_artefacts,
                }
            }
            None => ServiceTracking::external(),
        };

        Ok(ServiceDescriptor::new(definition, tracking))
    }

    /// Finds the single artefact owning `init_script`
    ///
    /// # Returns
    /// `None` if no package owns the file, or if several do; the latter is
    /// reported as an error to the operator.
    pub fn service_artefact(&self, init_script: &Path) -> Result<Option<ArtefactId>> {
        let owners: BTreeSet<ArtefactId> = self
            .database
            .file_owners(init_script)?
            .iter()
            .map(ArtefactId::from_package)
            .collect();

        if owners.len() > 1 {
            let owners: Vec<&str> = owners.iter().map(ArtefactId::as_str).collect();
            self.reporter.report_error(&format!(
                "ERROR: {} cannot be mapped to exactly one package: {}",
                init_script.display(),
                owners.join(", ")
            ));
            return Ok(None);
        }

        Ok(owners.into_iter().next())
    }
}
