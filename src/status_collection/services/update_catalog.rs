use super::ArtefactFilter;
use crate::ports::outbound::PackageDatabase;
use crate::shared::Result;
use crate::status_collection::domain::{ArtefactId, UpdateMap};
use std::cell::OnceCell;

/// UpdateCatalog - pending updates of the host, computed on first access
///
/// The package manager's update computation is expensive, so the full map
/// is cached for the lifetime of the catalog.
pub struct UpdateCatalog<'a, DB> {
    database: &'a DB,
    all_updates: OnceCell<UpdateMap>,
}

impl<'a, DB> UpdateCatalog<'a, DB>
where
    DB: PackageDatabase,
{
    pub fn new(database: &'a DB) -> Self {
        Self {
            database,
            all_updates: OnceCell::new(),
        }
    }

    /// All pending updates, new artefact -> replaced artefact
    pub fn all_updates(&self) -> Result<&UpdateMap> {
        if let Some(updates) = self.all_updates.get() {
            return Ok(updates);
        }

        let mut updates = UpdateMap::new();
        for update in self.database.available_updates()? {
            let replaced = match &update.replaces {
                Some(old) => ArtefactId::from_package(old).to_string(),
                None => update.replaces_raw.clone(),
            };
            updates.insert(ArtefactId::from_package(&update.available), replaced);
        }

        Ok(self.all_updates.get_or_init(|| updates))
    }

    /// Pending updates whose new artefact matches `filter`
    ///
    /// Only the new side is filtered; the replaced artefact is kept as is.
    pub fn filtered_updates(&self, filter: &ArtefactFilter) -> Result<UpdateMap> {
        Ok(self
            .all_updates()?
            .iter()
            .filter(|(new, _)| filter.matches(new.as_str()))
            .map(|(new, old)| (new.clone(), old.clone()))
            .collect())
    }
}
