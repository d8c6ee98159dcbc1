use crate::status_collection::domain::StatusSnapshot;

/// StatusResponse - Internal response DTO from the status collection use case
///
/// Wraps the snapshot so formatters and presenters stay independent of how
/// it was collected.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub snapshot: StatusSnapshot,
}

impl StatusResponse {
    pub fn new(snapshot: StatusSnapshot) -> Self {
        Self { snapshot }
    }
}
