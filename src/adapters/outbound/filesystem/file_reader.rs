use crate::ports::outbound::{ServiceDefinitionReader, StateFileReader};
use crate::shared::error::StatusError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use crate::status_collection::domain::ServiceDefinition;
use serde::Deserialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// One entry of the service definitions document
///
/// Either a bare service name or a single-key mapping from the name to its
/// metadata (which may be empty).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServiceEntry {
    Name(String),
    Mapping(BTreeMap<String, Option<BTreeMap<String, Value>>>),
}

/// FileSystemReader adapter for reading YAML documents from the file system
///
/// This adapter implements both ServiceDefinitionReader and StateFileReader
/// ports, providing file system access for the services file and the
/// lock/ignore files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Reads a file with security checks:
    /// - Validate file is a regular file
    /// - Check file size limits
    ///
    /// `NotFound` is passed through untouched so callers can treat a missing
    /// file as absent.
    fn safe_read_file(&self, path: &Path) -> io::Result<String> {
        let metadata = validate_regular_file(path)?;

        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        fs::read_to_string(path)
    }

    fn parse_yaml<T>(&self, path: &Path, content: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_yaml_ng::from_str(content).map_err(|e| {
            StatusError::FileParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl ServiceDefinitionReader for FileSystemReader {
    fn read_service_definitions(&self, path: &Path) -> Result<Vec<ServiceDefinition>> {
        let content = self.safe_read_file(path).map_err(|e| StatusError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        // An empty document declares no services
        let entries: Option<Vec<ServiceEntry>> = self.parse_yaml(path, &content)?;

        entries
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                ServiceEntry::Name(name) => Ok(ServiceDefinition::new(name)),
                ServiceEntry::Mapping(map) if map.len() == 1 => {
                    let (name, metadata) = map.into_iter().next().unwrap_or_default();
                    Ok(ServiceDefinition::with_metadata(
                        name,
                        metadata.unwrap_or_default(),
                    ))
                }
                ServiceEntry::Mapping(map) => Err(StatusError::FileParseError {
                    path: path.to_path_buf(),
                    details: format!(
                        "entry {} must map exactly one service name, found {} keys",
                        i,
                        map.len()
                    ),
                }
                .into()),
            })
            .collect()
    }
}

impl StateFileReader for FileSystemReader {
    fn read_state(&self, path: &Path) -> Result<Option<Value>> {
        let content = match self.safe_read_file(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StatusError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        let value: Value = self.parse_yaml(path, &content)?;
        Ok(Some(value))
    }
}
