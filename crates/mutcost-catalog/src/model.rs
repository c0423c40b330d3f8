//! Catalog data model
//!
//! Categories are keyed by name and kept in load order. Entries are owned
//! by exactly one category and carry that category's name as a
//! back-reference.

use indexmap::IndexMap;

/// Leading character on a category name that retracts an earlier category
pub const REMOVAL_MARKER: char = '-';

/// Cost recorded for entries whose `Cost` attribute is absent
pub const UNSPECIFIED_COST: i32 = -999;

/// A single selectable mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEntry {
    /// Display name, unique within the category
    pub display_name: String,
    /// Baseline point cost
    pub cost: i32,
    /// Name of the owning category
    pub category: String,
    /// Stat annotation
    pub stat: String,
    /// Property annotation
    pub property: String,
    /// Force-property annotation
    pub force_property: String,
    /// `MaxSelected`, if declared
    pub max_selected: Option<i32>,
    /// `MaxLevel`, if declared
    pub max_level: Option<i32>,
    /// Comma-separated exclusions
    pub exclusions: String,
    /// Mutation code
    pub code: String,
    /// Implementing class
    pub class: String,
    /// Constructor arguments
    pub constructor: String,
    /// Prerelease content flag
    pub prerelease: bool,
    /// Bearer description
    pub bearer_description: String,
}

impl MutationEntry {
    /// Create entry with a display name and cost
    #[must_use]
    pub fn new(display_name: impl Into<String>, cost: i32) -> Self {
        Self {
            display_name: display_name.into(),
            cost,
            category: String::new(),
            stat: String::new(),
            property: String::new(),
            force_property: String::new(),
            max_selected: None,
            max_level: None,
            exclusions: String::new(),
            code: String::new(),
            class: String::new(),
            constructor: String::new(),
            prerelease: false,
            bearer_description: String::new(),
        }
    }

    /// With implementing class
    #[inline]
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Mark as prerelease content
    #[inline]
    #[must_use]
    pub fn prerelease(mut self) -> Self {
        self.prerelease = true;
        self
    }
}

/// A named group of mutation entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationCategory {
    /// Stable key
    pub name: String,
    /// Display name (may contain color codes)
    pub display_name: String,
    /// Help text
    pub help: String,
    /// Stat annotation
    pub stat: String,
    /// Property annotation
    pub property: String,
    /// Force-property annotation
    pub force_property: String,
    entries: Vec<MutationEntry>,
}

impl MutationCategory {
    /// Create empty category
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Add entry, claiming ownership of it
    pub fn push_entry(&mut self, mut entry: MutationEntry) {
        entry.category.clone_from(&self.name);
        self.entries.push(entry);
    }

    /// With entry (builder form of [`push_entry`](Self::push_entry))
    #[must_use]
    pub fn with_entry(mut self, entry: MutationEntry) -> Self {
        self.push_entry(entry);
        self
    }

    /// Entries in declaration order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[MutationEntry] {
        &self.entries
    }

    /// Name of the category this one retracts, if it carries the removal marker
    #[inline]
    #[must_use]
    pub fn removal_target(&self) -> Option<&str> {
        self.name.strip_prefix(REMOVAL_MARKER)
    }

    /// Append another definition's entries (no deduplication)
    pub fn merge_with(&mut self, other: MutationCategory) {
        for entry in other.entries {
            self.push_entry(entry);
        }
    }
}

/// What [`Catalog::apply`] did with a category definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// New category appended
    Inserted,
    /// Entries appended to an existing category
    Merged,
    /// Earlier category of the unprefixed name dropped
    Removed,
    /// Removal marker named a category that was never loaded
    Ignored,
}

/// Ordered set of categories keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: IndexMap<String, MutationCategory>,
}

impl Catalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a category definition into the catalog
    ///
    /// A removal-marked name drops the earlier category with the unprefixed
    /// name; a repeated name merges; anything else is inserted at the end.
    pub fn apply(&mut self, category: MutationCategory) -> MergeAction {
        if let Some(target) = category.removal_target() {
            return match self.categories.shift_remove(target) {
                Some(removed) => {
                    tracing::debug!(
                        "Removed category {} ({} entries)",
                        target,
                        removed.entries.len()
                    );
                    MergeAction::Removed
                }
                None => MergeAction::Ignored,
            };
        }

        if let Some(existing) = self.categories.get_mut(&category.name) {
            existing.merge_with(category);
            return MergeAction::Merged;
        }

        self.categories.insert(category.name.clone(), category);
        MergeAction::Inserted
    }

    /// Look up category by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MutationCategory> {
        self.categories.get(name)
    }

    /// Categories in load order
    pub fn categories(&self) -> impl Iterator<Item = &MutationCategory> {
        self.categories.values()
    }

    /// Every entry paired with its owning category
    pub fn entries(&self) -> impl Iterator<Item = (&MutationCategory, &MutationEntry)> {
        self.categories
            .values()
            .flat_map(|category| category.entries.iter().map(move |entry| (category, entry)))
    }

    /// Number of categories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if catalog has no categories
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total entries across all categories
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.categories.values().map(|c| c.entries.len()).sum()
    }
}

impl FromIterator<MutationCategory> for Catalog {
    fn from_iter<I: IntoIterator<Item = MutationCategory>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for category in iter {
            catalog.apply(category);
        }
        catalog
    }
}
