//! Generator configuration
//!
//! Loaded from TOML; every field has a default so a partial file works.
//!
//! ```toml
//! baseline = "Base/Mutations.xml"
//! output_dir = "Mods/MutableMutations"
//! include_prerelease = false
//!
//! [monitor]
//! idle_interval_ms = 1000
//! open_interval_ms = 200
//! options_view = "Options"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default name of the generated dataset
pub const DEFAULT_OUTPUT_FILE: &str = "Mutations.xml";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutcostConfig {
    /// Baseline Mutations.xml
    pub baseline: PathBuf,
    /// Directory the generated dataset is written to
    pub output_dir: PathBuf,
    /// File name of the generated dataset
    pub output_file: String,
    /// Force prerelease entries on or off instead of asking the host
    pub include_prerelease: Option<bool>,
    /// Options screen polling
    pub monitor: MonitorConfig,
}

impl MutcostConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| ConfigError::parse_error(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values a TOML file could get wrong
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::Invalid("output_file must not be empty".into()));
        }
        if self.monitor.idle_interval_ms == 0 || self.monitor.open_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "monitor intervals must be positive".into(),
            ));
        }
        Ok(())
    }

    /// With baseline path
    #[inline]
    #[must_use]
    pub fn with_baseline(mut self, path: impl Into<PathBuf>) -> Self {
        self.baseline = path.into();
        self
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With output file name
    #[inline]
    #[must_use]
    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = name.into();
        self
    }

    /// With prerelease override
    #[inline]
    #[must_use]
    pub fn with_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = Some(include);
        self
    }

    /// With monitor settings
    #[inline]
    #[must_use]
    pub fn with_monitor(mut self, monitor: MonitorConfig) -> Self {
        self.monitor = monitor;
        self
    }

    /// Full path of the generated dataset
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

impl Default for MutcostConfig {
    fn default() -> Self {
        Self {
            baseline: PathBuf::from("Base").join(DEFAULT_OUTPUT_FILE),
            output_dir: PathBuf::from("mod"),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            include_prerelease: None,
            monitor: MonitorConfig::default(),
        }
    }
}

/// Options screen polling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Poll interval while the options screen is closed
    pub idle_interval_ms: u64,
    /// Poll interval while the options screen is open
    pub open_interval_ms: u64,
    /// View name of the options screen
    pub options_view: String,
}

impl MonitorConfig {
    /// Idle poll interval
    #[inline]
    #[must_use]
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    /// Open poll interval
    #[inline]
    #[must_use]
    pub fn open_interval(&self) -> Duration {
        Duration::from_millis(self.open_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            idle_interval_ms: 1000,
            open_interval_ms: 200,
            options_view: "Options".to_string(),
        }
    }
}
