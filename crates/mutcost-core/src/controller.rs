//! Regeneration controller
//!
//! Owns the catalog, the settings cache and the host registry. The
//! lifecycle is one-way:
//!
//! ```text
//! Uninitialized --activate()--> Active
//!                                 |
//!                          on_trigger() (repeatedly)
//! ```
//!
//! Activation loads the baseline, registers settings and writes the first
//! dataset. Each trigger afterwards either applies a requested reset or
//! rewrites the dataset when the settings no longer match what was written.

use crate::config::MutcostConfig;
use crate::error::{ControllerError, ControllerResult};
use crate::writer::CatalogWriter;
use mutcost_catalog::{Catalog, CatalogLoader};
use mutcost_options::{
    format_cost, is_adjustable, setting_id, OptionSynthesizer, SettingsCache, SettingsRegistry,
    SynthesisReport, NO, RESET_OPTION_ID, YES,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Host flag enabling prerelease content
pub const PRERELEASE_FLAG: &str = "OptionEnablePrereleaseContent";

/// Controller shared between the monitor task and other callers
pub type SharedController<R> = Arc<Mutex<RegenerationController<R>>>;

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Not activated yet, or activation failed before the catalog loaded
    Uninitialized,
    /// Catalog loaded and settings registered
    Active,
}

/// What a trigger did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Reset requested; defaults restored and dataset rewritten
    Reset,
    /// Settings changed; dataset rewritten
    Regenerated,
    /// Settings match the dataset on disk
    Unchanged,
}

#[derive(Debug)]
enum State {
    Uninitialized,
    Active {
        catalog: Catalog,
        cache: SettingsCache,
    },
}

/// Drives load, synthesis and regeneration against a host registry
#[derive(Debug)]
pub struct RegenerationController<R> {
    config: MutcostConfig,
    registry: R,
    synthesizer: OptionSynthesizer,
    writer: CatalogWriter,
    state: State,
}

impl<R: SettingsRegistry> RegenerationController<R> {
    /// Create an uninitialized controller
    #[must_use]
    pub fn new(config: MutcostConfig, registry: R) -> Self {
        Self {
            config,
            registry,
            synthesizer: OptionSynthesizer::new(),
            writer: CatalogWriter::new(),
            state: State::Uninitialized,
        }
    }

    /// With a custom synthesizer
    #[inline]
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: OptionSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Wrap for sharing with an [`OptionsMonitor`](crate::monitor::OptionsMonitor)
    #[must_use]
    pub fn into_shared(self) -> SharedController<R> {
        Arc::new(Mutex::new(self))
    }

    /// Load, synthesize and write the first dataset
    ///
    /// Calling it again once active does nothing. If the registry is not
    /// ready or the baseline fails to load the controller stays
    /// uninitialized and activation may be retried. A failed first write
    /// still activates with an empty cache, so the next trigger retries
    /// the write.
    ///
    /// # Errors
    /// Returns `ControllerError` if any step fails.
    pub fn activate(&mut self) -> ControllerResult<SynthesisReport> {
        if self.is_active() {
            tracing::debug!("Controller already active");
            return Ok(SynthesisReport::default());
        }

        if !self.registry.is_ready() {
            tracing::error!("Settings registry not ready, activation aborted");
            return Err(ControllerError::RegistryNotReady);
        }

        let include_prerelease = self.include_prerelease();
        let catalog = CatalogLoader::new()
            .with_prerelease(include_prerelease)
            .load_path(&self.config.baseline)
            .map_err(|e| {
                tracing::error!(
                    "Failed to load baseline {}: {}",
                    self.config.baseline.display(),
                    e
                );
                ControllerError::from(e)
            })?;

        tracing::info!(
            "Loaded baseline: {} categories, {} entries (prerelease: {})",
            catalog.len(),
            catalog.entry_count(),
            include_prerelease
        );

        let report = self.synthesizer.synthesize(&catalog, &mut self.registry);

        self.state = State::Active {
            catalog,
            cache: SettingsCache::new(),
        };
        self.regenerate()?;
        Ok(report)
    }

    /// React to the options screen closing
    ///
    /// # Errors
    /// Returns `ControllerError::NotActive` before activation, or the
    /// write error if regeneration fails.
    pub fn on_trigger(&mut self) -> ControllerResult<TriggerOutcome> {
        if !self.is_active() {
            return Err(ControllerError::NotActive);
        }

        if self.registry.get(RESET_OPTION_ID).as_deref() == Some(YES) {
            let reset = self.reset_to_defaults()?;
            tracing::info!("Reset {} mutation costs to defaults", reset);
            self.regenerate()?;
            return Ok(TriggerOutcome::Reset);
        }

        let valid = match &self.state {
            State::Active { cache, .. } => cache.validate(&self.registry),
            State::Uninitialized => false,
        };
        if valid {
            tracing::debug!("Settings unchanged, dataset is current");
            return Ok(TriggerOutcome::Unchanged);
        }

        self.regenerate()?;
        tracing::info!("Regenerated dataset after settings change");
        Ok(TriggerOutcome::Regenerated)
    }

    /// Restore every cost setting to its baseline and clear the reset flag
    ///
    /// Returns the number of settings restored. The cache is invalidated so
    /// the next trigger rewrites the dataset.
    ///
    /// # Errors
    /// Returns `ControllerError::NotActive` before activation.
    pub fn reset_to_defaults(&mut self) -> ControllerResult<usize> {
        let State::Active { catalog, cache } = &mut self.state else {
            return Err(ControllerError::NotActive);
        };

        self.registry.set(RESET_OPTION_ID, NO);
        let mut restored = 0;
        for (_, entry) in catalog.entries().filter(|(_, e)| is_adjustable(e)) {
            self.registry.set(&setting_id(entry), &format_cost(entry.cost));
            restored += 1;
        }
        cache.invalidate();
        Ok(restored)
    }

    fn regenerate(&mut self) -> ControllerResult<()> {
        let State::Active { catalog, cache } = &mut self.state else {
            return Err(ControllerError::NotActive);
        };

        let path = self.config.output_path();
        match self.writer.write(catalog, &self.registry, &path) {
            Ok(fresh) => {
                *cache = fresh;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Dataset write to {} failed: {}", path.display(), e);
                cache.invalidate();
                Err(e.into())
            }
        }
    }

    fn include_prerelease(&self) -> bool {
        self.config
            .include_prerelease
            .unwrap_or_else(|| self.registry.get(PRERELEASE_FLAG).as_deref() == Some(YES))
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> ControllerState {
        match self.state {
            State::Uninitialized => ControllerState::Uninitialized,
            State::Active { .. } => ControllerState::Active,
        }
    }

    /// Check if activation succeeded
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Loaded catalog, once active
    #[must_use]
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            State::Active { catalog, .. } => Some(catalog),
            State::Uninitialized => None,
        }
    }

    /// Cache of the last written dataset, once active
    #[must_use]
    pub fn cache(&self) -> Option<&SettingsCache> {
        match &self.state {
            State::Active { cache, .. } => Some(cache),
            State::Uninitialized => None,
        }
    }

    /// Host registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Host registry, mutably
    #[inline]
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MutcostConfig {
        &self.config
    }
}
