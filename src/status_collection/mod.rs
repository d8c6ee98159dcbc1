/// Status collection domain
///
/// Pure domain model (`domain`) and I/O-free services (`services`) for the
/// package dependency graph, service resolution and artefact filtering.
pub mod domain;
pub mod services;
