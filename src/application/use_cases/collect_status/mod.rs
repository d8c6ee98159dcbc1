use crate::application::dto::{StatusRequest, StatusResponse};
use crate::ports::outbound::{
    HostProbe, PackageDatabase, ProgressReporter, ServiceDefinitionReader, ServiceProbe,
    StateFileReader,
};
use crate::shared::Result;
use crate::status_collection::domain::{
    ArtefactId, PackageIndex, ServiceDefinition, ServiceDescriptor, StatusSnapshot,
};
use crate::status_collection::services::{PackageIndexBuilder, ServiceResolver, UpdateCatalog};
use serde_yaml_ng::Value;
use std::path::Path;

/// CollectStatusUseCase - Core use case collecting the host status snapshot
///
/// This use case orchestrates the status collection workflow using
/// generic dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `PDB` - PackageDatabase implementation
/// * `SDR` - ServiceDefinitionReader implementation
/// * `SFR` - StateFileReader implementation
/// * `SP` - ServiceProbe implementation
/// * `HP` - HostProbe implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectStatusUseCase<PDB, SDR, SFR, SP, HP, PR> {
    package_database: PDB,
    service_definition_reader: SDR,
    state_file_reader: SFR,
    service_probe: SP,
    host_probe: HP,
    progress_reporter: PR,
}

impl<PDB, SDR, SFR, SP, HP, PR> CollectStatusUseCase<PDB, SDR, SFR, SP, HP, PR>
where
    PDB: PackageDatabase,
    SDR: ServiceDefinitionReader,
    SFR: StateFileReader,
    SP: ServiceProbe,
    HP: HostProbe,
    PR: ProgressReporter,
{
    /// Creates a new CollectStatusUseCase with injected dependencies
    pub fn new(
        package_database: PDB,
        service_definition_reader: SDR,
        state_file_reader: SFR,
        service_probe: SP,
        host_probe: HP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            package_database,
            service_definition_reader,
            state_file_reader,
            service_probe,
            host_probe,
            progress_reporter,
        }
    }

    /// Executes the status collection use case
    ///
    /// # Arguments
    /// * `request` - Resolved settings of this run
    ///
    /// # Returns
    /// StatusResponse wrapping the complete snapshot
    ///
    /// # Errors
    /// Returns an error if the package database cannot be queried or the
    /// host facts cannot be gathered. Problems with individual services,
    /// lock or ignore files are reported and degrade the snapshot instead.
    pub fn execute(&self, request: StatusRequest) -> Result<StatusResponse> {
        // Step 1: Load service definitions
        let definitions = self.load_service_definitions(&request.services_file);

        // Step 2: Read the host lock
        let lockstate = self.read_optional_state(&request.lock_file());

        // Step 3: Build the package index
        let index = self.build_index()?;

        // Step 4: Map services onto the package graph
        let mut services = self.resolve_services(definitions, &index, &request)?;

        // Step 5-7: Per-service ignore state, live status, extra status
        self.add_ignore_state(&mut services, &request);
        self.add_live_status(&mut services, &request);
        self.add_extra_status(&mut services, &request);

        // Step 8: Installed artefacts
        let current_artefacts: Vec<ArtefactId> = index.artefacts().cloned().collect();
        let handled_artefacts = request.artefact_filter.filter_artefacts(index.artefacts());

        // Step 9: Pending updates
        self.progress_reporter.report(&format!(
            "🔄 Checking for pending updates matching '{}'...",
            request.artefact_filter.pattern()
        ));
        let updates = UpdateCatalog::new(&self.package_database)
            .filtered_updates(&request.artefact_filter)?;

        // Step 10: Host identity and network facts
        let host_facts = self.host_probe.facts()?;

        let snapshot = StatusSnapshot::new(
            services,
            handled_artefacts,
            current_artefacts,
            updates,
            host_facts,
            lockstate,
        );
        self.progress_reporter.report_completion(&format!(
            "✅ Status collected: {} service(s), {} artefact(s), state {}",
            snapshot.services.len(),
            snapshot.current_artefacts.len(),
            snapshot.state
        ));

        Ok(StatusResponse::new(snapshot))
    }

    /// Loads the service definitions; an unreadable source means no services
    fn load_service_definitions(&self, path: &Path) -> Vec<ServiceDefinition> {
        self.progress_reporter.report(&format!(
            "📖 Loading service definitions from: {}",
            path.display()
        ));

        match self.service_definition_reader.read_service_definitions(path) {
            Ok(definitions) => {
                self.progress_reporter
                    .report(&format!("✅ Found {} service(s)", definitions.len()));
                definitions
            }
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: cannot read {}, skipping service handling\n{}",
                    path.display(),
                    e
                ));
                Vec::new()
            }
        }
    }

    /// Reads an optional state document; read or parse failures are reported
    /// and treated as absent
    fn read_optional_state(&self, path: &Path) -> Option<Value> {
        match self.state_file_reader.read_state(path) {
            Ok(state) => state,
            Err(e) => {
                self.progress_reporter.report_error(&e.to_string());
                None
            }
        }
    }

    fn build_index(&self) -> Result<PackageIndex> {
        self.progress_reporter
            .report("📦 Indexing installed packages...");
        PackageIndexBuilder::build(&self.package_database, &self.progress_reporter)
    }

    fn resolve_services(
        &self,
        definitions: Vec<ServiceDefinition>,
        index: &PackageIndex,
        request: &StatusRequest,
    ) -> Result<Vec<ServiceDescriptor>> {
        let resolver = ServiceResolver::new(
            &self.package_database,
            index,
            &request.artefact_filter,
            &self.progress_reporter,
        );

        definitions
            .into_iter()
            .map(|definition| {
                let init_script = request.init_script(&definition.name);
                resolver.resolve(definition, init_script)
            })
            .collect()
    }

    fn add_ignore_state(&self, services: &mut [ServiceDescriptor], request: &StatusRequest) {
        for service in services.iter_mut() {
            service.ignored = self.read_optional_state(&request.ignore_file(&service.name));
        }
    }

    /// Runs the status action of every tracked service's init script
    fn add_live_status(&self, services: &mut [ServiceDescriptor], request: &StatusRequest) {
        let status_command = request.status_command.as_deref();

        for service in services.iter_mut() {
            let Some(init_script) = service.init_script() else {
                continue;
            };

            match self.service_probe.status_code(status_command, init_script) {
                Ok(code) => service.state = Some(code),
                Err(e) => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: status check of service '{}' failed: {}",
                    service.name, e
                )),
            }
        }
    }

    /// Runs `yadt-status-service-<name>` for every service that has one
    fn add_extra_status(&self, services: &mut [ServiceDescriptor], request: &StatusRequest) {
        for service in services.iter_mut() {
            let script = request.extra_script(&service.name);
            if !self.service_probe.is_executable(&script) {
                continue;
            }

            match self.service_probe.run_extra_script(&script) {
                Ok(extra) => service.extra = Some(extra),
                Err(e) => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: extra status script of service '{}' failed: {}",
                    service.name, e
                )),
            }
            service.extra_script = Some(script);
        }
    }
}
