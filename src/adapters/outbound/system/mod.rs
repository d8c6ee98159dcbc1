/// System adapters probing services and the host itself
mod host_probe;
mod init_script_probe;

pub use host_probe::SystemHostProbe;
pub use init_script_probe::InitScriptProbe;
