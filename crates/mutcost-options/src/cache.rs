//! Change detection
//!
//! [`SettingsCache`] remembers the cost text last written for every
//! setting id. Comparing it against the registry tells the controller
//! whether the generated file is stale.

use crate::registry::SettingsRegistry;
use std::collections::BTreeMap;

/// Cost text to write for a setting
///
/// The trimmed host value wins; a blank or missing one falls back to the
/// baseline cost.
#[must_use]
pub fn resolve_setting(host_value: Option<&str>, baseline: i32) -> String {
    match host_value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => baseline.to_string(),
    }
}

/// One cached setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    /// Resolved text that was written
    pub value: String,
    /// Baseline cost it was resolved against
    pub baseline: i32,
}

/// Snapshot of the last written setting values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsCache {
    values: BTreeMap<String, CachedValue>,
}

impl SettingsCache {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the value written for `id`; a repeated id keeps the last one
    pub fn record(&mut self, id: impl Into<String>, value: impl Into<String>, baseline: i32) {
        self.values.insert(
            id.into(),
            CachedValue {
                value: value.into(),
                baseline,
            },
        );
    }

    /// Plain id to value view
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(id, cached)| (id.clone(), cached.value.clone()))
            .collect()
    }

    /// Check whether every cached setting still resolves to what was written
    ///
    /// An empty cache is never valid. Settings the cache does not know
    /// about are not consulted.
    pub fn validate<R>(&self, registry: &R) -> bool
    where
        R: SettingsRegistry + ?Sized,
    {
        if self.values.is_empty() {
            tracing::debug!("Settings cache empty");
            return false;
        }

        let changed = self.values.iter().find(|(id, cached)| {
            let current = resolve_setting(registry.get(id).as_deref(), cached.baseline);
            current != cached.value
        });

        match changed {
            Some((id, cached)) => {
                tracing::debug!("Setting {} changed since \"{}\" was written", id, cached.value);
                false
            }
            None => true,
        }
    }

    /// Drop everything
    #[inline]
    pub fn invalidate(&mut self) {
        self.values.clear();
    }

    /// Cached value for an id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CachedValue> {
        self.values.get(id)
    }

    /// Number of cached settings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is cached
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryRegistry;

    #[test]
    fn resolve_prefers_trimmed_host_value() {
        assert_eq!(resolve_setting(Some(" 5"), 3), "5");
        assert_eq!(resolve_setting(Some("-2 "), 3), "-2");
    }

    #[test]
    fn resolve_falls_back_to_baseline() {
        assert_eq!(resolve_setting(None, 3), "3");
        assert_eq!(resolve_setting(Some("   "), -1), "-1");
        assert_eq!(resolve_setting(None, -999), "-999");
    }

    #[test]
    fn empty_cache_is_invalid() {
        assert!(!SettingsCache::new().validate(&InMemoryRegistry::new()));
    }

    #[test]
    fn unchanged_registry_validates() {
        let registry = InMemoryRegistry::new().with_value("a", " 4");
        let mut cache = SettingsCache::new();
        cache.record("a", "4", 4);
        cache.record("b", "2", 2);
        assert!(cache.validate(&registry));
    }

    #[test]
    fn changed_value_invalidates() {
        let mut registry = InMemoryRegistry::new().with_value("a", " 4");
        let mut cache = SettingsCache::new();
        cache.record("a", "4", 4);
        registry.set("a", " 5");
        assert!(!cache.validate(&registry));
    }

    #[test]
    fn blanked_value_compares_against_baseline() {
        let mut registry = InMemoryRegistry::new().with_value("a", " 6");
        let mut cache = SettingsCache::new();
        cache.record("a", "6", 4);
        registry.set("a", "");
        assert!(!cache.validate(&registry));

        cache.record("a", "4", 4);
        assert!(cache.validate(&registry));
    }

    #[test]
    fn unknown_settings_are_ignored() {
        let registry = InMemoryRegistry::new()
            .with_value("a", "1")
            .with_value("other", "9");
        let mut cache = SettingsCache::new();
        cache.record("a", "1", 1);
        assert!(cache.validate(&registry));
    }

    #[test]
    fn invalidate_clears() {
        let mut cache = SettingsCache::new();
        cache.record("a", "1", 1);
        assert_eq!(cache.snapshot().get("a").map(String::as_str), Some("1"));
        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
