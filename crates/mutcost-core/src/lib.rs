//! MUTCOST Core
//!
//! Keeps a generated Mutations.xml in step with the host's cost settings.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  closed   ┌────────────────────────┐
//! │OptionsMonitor│ ────────▶ │ RegenerationController │
//! └──────────────┘           │  catalog · cache       │
//!                            └──────────┬─────────────┘
//!                                       │ write
//!                                       ▼
//!                               mod/Mutations.xml
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mutcost_core::{MutcostConfig, RegenerationController};
//! use mutcost_options::InMemoryRegistry;
//!
//! let config = MutcostConfig::from_file("mutcost.toml")?;
//! let mut controller = RegenerationController::new(config, InMemoryRegistry::new());
//! controller.activate()?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod controller;
pub mod error;
pub mod monitor;
pub mod writer;

pub use config::{MonitorConfig, MutcostConfig, DEFAULT_OUTPUT_FILE};
pub use controller::{
    ControllerState, RegenerationController, SharedController, TriggerOutcome, PRERELEASE_FLAG,
};
pub use error::{ConfigError, ControllerError, ControllerResult};
pub use monitor::{trigger_controller, OptionsMonitor, ViewEvent, ViewProbe, ViewTracker};
pub use writer::CatalogWriter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
