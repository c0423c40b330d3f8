//! Host settings registry
//!
//! [`SettingsRegistry`] is the seam to the host's option system: string
//! values keyed by setting id, plus definitions that tell the host how to
//! present each setting. [`InMemoryRegistry`] is the reference
//! implementation used by tests and the CLI.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of an enabled boolean setting
pub const YES: &str = "Yes";
/// Value of a disabled boolean setting
pub const NO: &str = "No";

/// How the host presents a setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingKind {
    /// Checkbox holding [`YES`] or [`NO`]
    Boolean,
    /// Pick one of a fixed list of values
    Choice {
        /// Selectable values in display order
        values: Vec<String>,
    },
}

/// Everything the host needs to show one setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDefinition {
    /// Unique setting id
    pub id: String,
    /// Options screen category
    pub category: String,
    /// Label shown to the user
    pub display_text: String,
    /// Presentation kind
    pub kind: SettingKind,
    /// Value used until the user picks one
    pub default: String,
}

impl SettingDefinition {
    /// Create checkbox setting
    #[must_use]
    pub fn boolean(
        id: impl Into<String>,
        category: impl Into<String>,
        display_text: impl Into<String>,
        default: bool,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            display_text: display_text.into(),
            kind: SettingKind::Boolean,
            default: if default { YES } else { NO }.to_string(),
        }
    }

    /// Create multi-choice setting
    #[must_use]
    pub fn choice(
        id: impl Into<String>,
        category: impl Into<String>,
        display_text: impl Into<String>,
        values: Vec<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            display_text: display_text.into(),
            kind: SettingKind::Choice { values },
            default: default.into(),
        }
    }

    /// Selectable values (empty for checkboxes)
    #[must_use]
    pub fn values(&self) -> &[String] {
        match &self.kind {
            SettingKind::Boolean => &[],
            SettingKind::Choice { values } => values,
        }
    }
}

/// Host option registry
pub trait SettingsRegistry {
    /// Whether the host has finished populating its options
    fn is_ready(&self) -> bool {
        true
    }

    /// Current value, falling back to the definition default
    fn get(&self, id: &str) -> Option<String>;

    /// Current value or `fallback`
    fn get_or(&self, id: &str, fallback: &str) -> String {
        self.get(id).unwrap_or_else(|| fallback.to_string())
    }

    /// Store a value (the id need not be registered)
    fn set(&mut self, id: &str, value: &str);

    /// Check if a definition with this id exists
    fn contains(&self, id: &str) -> bool;

    /// Add a definition; returns `false` if the id is already taken
    fn register(&mut self, definition: SettingDefinition) -> bool;

    /// Definitions in a category, in registration order
    fn in_category(&self, category: &str) -> Vec<&SettingDefinition>;
}

/// Registry kept entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    definitions: IndexMap<String, SettingDefinition>,
    values: BTreeMap<String, String>,
    ready: bool,
}

impl InMemoryRegistry {
    /// Create empty, ready registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: IndexMap::new(),
            values: BTreeMap::new(),
            ready: true,
        }
    }

    /// Create registry the host has not populated yet
    #[inline]
    #[must_use]
    pub fn unready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Mark the host as populated
    #[inline]
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// With a stored value
    #[inline]
    #[must_use]
    pub fn with_value(mut self, id: &str, value: &str) -> Self {
        self.set(id, value);
        self
    }

    /// Explicitly stored values
    #[inline]
    #[must_use]
    pub fn stored_values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Replace all stored values
    pub fn replace_values(&mut self, values: BTreeMap<String, String>) {
        self.values = values;
    }

    /// Effective value of every registered setting plus any stored extras
    #[must_use]
    pub fn effective_values(&self) -> BTreeMap<String, String> {
        let mut all = self.values.clone();
        for definition in self.definitions.values() {
            all.entry(definition.id.clone())
                .or_insert_with(|| definition.default.clone());
        }
        all
    }

    /// Look up a definition
    #[inline]
    #[must_use]
    pub fn definition(&self, id: &str) -> Option<&SettingDefinition> {
        self.definitions.get(id)
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if no definitions are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRegistry for InMemoryRegistry {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn get(&self, id: &str) -> Option<String> {
        self.values
            .get(id)
            .or_else(|| self.definitions.get(id).map(|d| &d.default))
            .cloned()
    }

    fn set(&mut self, id: &str, value: &str) {
        self.values.insert(id.to_string(), value.to_string());
    }

    fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    fn register(&mut self, definition: SettingDefinition) -> bool {
        if self.definitions.contains_key(&definition.id) {
            return false;
        }
        self.definitions.insert(definition.id.clone(), definition);
        true
    }

    fn in_category(&self, category: &str) -> Vec<&SettingDefinition> {
        self.definitions
            .values()
            .filter(|d| d.category == category)
            .collect()
    }
}
