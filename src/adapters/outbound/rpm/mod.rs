/// rpm/yum adapters implementing the PackageDatabase port
mod check_update;
mod installed_index;
mod rpm_database;
mod version;

pub use installed_index::InstalledIndex;
pub use rpm_database::RpmPackageDatabase;
