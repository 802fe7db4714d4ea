//! Error types for the enrichment pipelines and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Failure inside an externally-supplied metadata provider.
///
/// Expected absences (unknown type, no such field, no declared operations)
/// are encoded in the provider return values, never as this error; a
/// `ProviderError` always means the lookup itself broke, e.g. an unreachable
/// metadata backend or a corrupt type map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider lookup failed for `{type_id}`: {message}")]
pub struct ProviderError {
    pub type_id: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(type_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            message: message.into(),
        }
    }
}

/// Errors during schema decoration or operation enrichment.
///
/// Expected no-ops (non-input schema, unknown type, skipped response) are
/// not errors; they surface as unchanged values or
/// [`Enrichment::Skipped`](crate::Enrichment::Skipped).
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to serialize enriched response: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl EnrichError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while loading JSON documents or registry files from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Data errors (exit code 2)
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid registry in {path}: {source}")]
    InvalidRegistry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } | LoadError::InvalidRegistry { .. } => 2,
        }
    }
}
