//! MUTCOST Options
//!
//! Everything between the catalog and the host options screen.
//!
//! # Modules
//!
//! - [`range`]: selectable values for a baseline cost
//! - [`label`]: fixed-width setting labels and color markup stripping
//! - [`registry`]: the host registry seam and an in-memory implementation
//! - [`synthesizer`]: registers one setting per adjustable entry
//! - [`cache`]: detects when the generated file no longer matches the settings
//! - [`store`]: JSON-backed registry used outside the host

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod label;
pub mod range;
pub mod registry;
pub mod store;
pub mod synthesizer;

pub use cache::{resolve_setting, CachedValue, SettingsCache};
pub use error::{RegistryError, RegistryResult};
pub use label::{category_label, setting_label, strip_formatting};
pub use range::{derive_range, format_cost};
pub use registry::{InMemoryRegistry, SettingDefinition, SettingKind, SettingsRegistry, NO, YES};
pub use store::SettingsStore;
pub use synthesizer::{
    is_adjustable, setting_id, OptionSynthesizer, SynthesisReport, OPTIONS_CATEGORY,
    OPTION_PREFIX, RESET_OPTION_ID,
};
