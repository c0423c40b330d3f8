//! Option synthesis
//!
//! Walks a [`Catalog`] and registers one multi-choice setting per
//! adjustable entry, plus a reset checkbox at the top of the category.

use crate::label::setting_label;
use crate::range::{derive_range, format_cost};
use crate::registry::{SettingDefinition, SettingsRegistry};
use mutcost_catalog::{Catalog, MutationEntry};

/// Options screen category holding every cost setting
pub const OPTIONS_CATEGORY: &str = "Mutation Costs";

macro_rules! option_prefix {
    () => {
        "MutableMutationsMod:MutationCost:"
    };
}

/// Prefix of every setting id
pub const OPTION_PREFIX: &str = option_prefix!();

/// Id of the reset checkbox
pub const RESET_OPTION_ID: &str = concat!(option_prefix!(), "RESETVALUES");

/// Label of the reset checkbox
pub const RESET_OPTION_TEXT: &str = "Reset all mutation costs to default (after closing Options)";

/// Setting id for an entry
#[inline]
#[must_use]
pub fn setting_id(entry: &MutationEntry) -> String {
    format!("{OPTION_PREFIX}{}", entry.display_name)
}

/// Whether an entry gets a cost setting
///
/// Only fixed (zero) costs are excluded; an entry without a declared cost
/// keeps its sentinel value as the default.
#[inline]
#[must_use]
pub fn is_adjustable(entry: &MutationEntry) -> bool {
    entry.cost != 0
}

/// Outcome of one synthesis pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Id of every adjustable entry, in catalog order
    pub option_ids: Vec<String>,
    /// Settings newly registered by this pass (reset checkbox included)
    pub registered: usize,
    /// Adjustable entries whose id already existed
    pub skipped: usize,
}

/// Registers cost settings for a catalog
#[derive(Debug, Clone)]
pub struct OptionSynthesizer {
    category: String,
}

impl OptionSynthesizer {
    /// Create synthesizer for the default category
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: OPTIONS_CATEGORY.to_string(),
        }
    }

    /// With a different options category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Options category in use
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Register the reset checkbox and one setting per adjustable entry
    ///
    /// Running it again registers nothing new.
    pub fn synthesize<R>(&self, catalog: &Catalog, registry: &mut R) -> SynthesisReport
    where
        R: SettingsRegistry + ?Sized,
    {
        let mut report = SynthesisReport::default();

        if registry.register(SettingDefinition::boolean(
            RESET_OPTION_ID,
            &self.category,
            RESET_OPTION_TEXT,
            false,
        )) {
            report.registered += 1;
        }

        for (category, entry) in catalog.entries() {
            if !is_adjustable(entry) {
                tracing::debug!("No setting for fixed-cost mutation {}", entry.display_name);
                continue;
            }

            let id = setting_id(entry);
            report.option_ids.push(id.clone());

            if registry.contains(&id) {
                report.skipped += 1;
                continue;
            }

            let definition = SettingDefinition::choice(
                id,
                &self.category,
                setting_label(&entry.display_name, &category.display_name),
                derive_range(entry.cost),
                format_cost(entry.cost),
            );
            if registry.register(definition) {
                report.registered += 1;
            }
        }

        tracing::info!(
            "Synthesized {} cost settings ({} registered, {} already present)",
            report.option_ids.len(),
            report.registered,
            report.skipped
        );
        report
    }
}

impl Default for OptionSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
