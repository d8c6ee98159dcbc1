use crate::shared::Result;
use crate::status_collection::domain::HostFacts;

/// HostProbe port for gathering identity and network facts of the host
pub trait HostProbe {
    fn facts(&self) -> Result<HostFacts>;
}
