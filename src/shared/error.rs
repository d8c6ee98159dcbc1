use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let the orchestrator distinguish a produced snapshot from
/// the different kinds of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Snapshot produced
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (package database, configuration, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for status collection.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Package database query failed: {command}\nDetails: {details}\n\n💡 Hint: Please verify that rpm/yum are installed and the package database is not locked or corrupt")]
    PackageDatabase { command: String, details: String },

    #[error("Failed to parse package database output of: {command}\nDetails: {details}")]
    PackageDatabaseOutput { command: String, details: String },

    #[error("Invalid artefact filter: {pattern}\nDetails: {details}\n\n💡 Hint: The filter is a regular expression matched against the start of each artefact identifier")]
    InvalidArtefactFilter { pattern: String, details: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to parse file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains valid YAML")]
    FileParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to run {program}\nDetails: {details}")]
    CommandFailed { program: String, details: String },
}
