//! Error types for settings persistence

use std::path::PathBuf;

/// Errors reading or writing a settings values file
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// File could not be read or written
    #[error("io error on {path}: {source}")]
    Io {
        /// Values file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a JSON object of strings
    #[error("invalid settings file {path}: {source}")]
    Json {
        /// Values file
        path: PathBuf,
        /// Parse or encode failure
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create JSON error for path
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for settings persistence
pub type RegistryResult<T> = Result<T, RegistryError>;
