//! File-backed settings registry
//!
//! Stands in for the host registry outside the game: definitions live in
//! memory, values persist to a flat JSON object of strings. Values edited
//! on disk by another process are picked up with [`SettingsStore::reload`].

use crate::error::{RegistryError, RegistryResult};
use crate::registry::{InMemoryRegistry, SettingDefinition, SettingsRegistry};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings registry persisted to a JSON values file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    registry: InMemoryRegistry,
}

impl SettingsStore {
    /// Open a values file; a missing file starts empty
    ///
    /// # Errors
    /// Returns `RegistryError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        let mut store = Self {
            path: path.into(),
            registry: InMemoryRegistry::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Values file location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registered definitions and values
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &InMemoryRegistry {
        &self.registry
    }

    /// Replace in-memory values with what is on disk
    ///
    /// # Errors
    /// Returns `RegistryError` if the file exists but cannot be read or parsed.
    pub fn reload(&mut self) -> RegistryResult<()> {
        let values = read_values(&self.path)?;
        tracing::debug!(
            "Loaded {} settings from {}",
            values.len(),
            self.path.display()
        );
        self.registry.replace_values(values);
        Ok(())
    }

    /// Write every effective value, defaults included, to disk
    ///
    /// # Errors
    /// Returns `RegistryError` if the file cannot be written.
    pub fn save(&self) -> RegistryResult<()> {
        let values = self.registry.effective_values();
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| RegistryError::json_error(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RegistryError::io_error(parent, e))?;
        }
        fs::write(&self.path, json).map_err(|e| RegistryError::io_error(&self.path, e))?;

        tracing::info!(
            "Saved {} settings to {}",
            values.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn read_values(path: &Path) -> RegistryResult<BTreeMap<String, String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(RegistryError::io_error(path, e)),
    };
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&text).map_err(|e| RegistryError::json_error(path, e))
}

impl SettingsRegistry for SettingsStore {
    fn is_ready(&self) -> bool {
        self.registry.is_ready()
    }

    fn get(&self, id: &str) -> Option<String> {
        self.registry.get(id)
    }

    fn set(&mut self, id: &str, value: &str) {
        self.registry.set(id, value);
    }

    fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    fn register(&mut self, definition: SettingDefinition) -> bool {
        self.registry.register(definition)
    }

    fn in_category(&self, category: &str) -> Vec<&SettingDefinition> {
        self.registry.in_category(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NO;
    use tempfile::TempDir;

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert!(store.registry().stored_values().is_empty());
    }

    #[test]
    fn save_then_open_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::open(&path).unwrap();
        store.register(SettingDefinition::boolean("reset", "c", "Reset", false));
        store.set("cost", " 5");
        store.save().unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get("cost").as_deref(), Some(" 5"));
        assert_eq!(reopened.get("reset").as_deref(), Some(NO));
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::open(&path).unwrap();
        store.set("cost", " 5");
        store.save().unwrap();

        fs::write(&path, r#"{ "cost": " 7" }"#).unwrap();
        assert_eq!(store.get("cost").as_deref(), Some(" 5"));
        store.reload().unwrap();
        assert_eq!(store.get("cost").as_deref(), Some(" 7"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            SettingsStore::open(&path),
            Err(RegistryError::Json { .. })
        ));
    }
}
