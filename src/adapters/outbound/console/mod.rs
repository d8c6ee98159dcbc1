/// Console adapters writing operator-facing output to stderr
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
