//! Error types for MUTCOST Core
//!
//! Provides error handling for:
//! - Configuration loading
//! - Controller activation and regeneration

use mutcost_catalog::{LoadError, WriteError};
use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config file
        path: PathBuf,
        /// TOML decode failure
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse_error(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Controller errors
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Host options are not populated yet
    #[error("settings registry is not ready")]
    RegistryNotReady,

    /// Trigger received before a successful activation
    #[error("controller is not active")]
    NotActive,

    /// Baseline could not be loaded
    #[error("failed to load baseline: {0}")]
    Load(#[from] LoadError),

    /// Generated dataset could not be written
    #[error("failed to write dataset: {0}")]
    Write(#[from] WriteError),
}

/// Result alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;
