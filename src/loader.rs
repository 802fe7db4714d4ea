//! JSON document and registry loading for the CLI.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::registry::Registry;

/// Read a file as text.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or
/// `LoadError::ReadError` if it cannot be read.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON document from a file.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a registry description from a JSON file.
///
/// # Errors
///
/// Returns `LoadError::InvalidRegistry` if the file doesn't match the
/// registry shape.
pub fn load_registry(path: &Path) -> Result<Registry, LoadError> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidRegistry {
        path: path.to_path_buf(),
        source,
    })
}
