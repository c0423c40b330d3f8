//! Baseline dataset loader
//!
//! Streams `<mutations>/<category>/<mutation>` elements out of a
//! Mutations.xml document and folds each category into a [`Catalog`].

use crate::error::LoadError;
use crate::model::{Catalog, MergeAction, MutationCategory, MutationEntry, UNSPECIFIED_COST};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

/// Root element name
pub const ROOT_ELEMENT: &str = "mutations";
/// Category element name
pub const CATEGORY_ELEMENT: &str = "category";
/// Entry element name
pub const MUTATION_ELEMENT: &str = "mutation";

/// Loads the baseline dataset into a [`Catalog`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    include_prerelease: bool,
}

impl CatalogLoader {
    /// Create loader that skips prerelease entries
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether prerelease entries are admitted
    #[inline]
    #[must_use]
    pub fn with_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    /// Load catalog from a file
    ///
    /// # Errors
    /// - `LoadError::Io` if the file cannot be read
    /// - any error from [`load_str`](Self::load_str)
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        tracing::debug!("Loading baseline mutations from {}", path.display());
        self.load_str(&content)
    }

    /// Load catalog from document text
    ///
    /// # Errors
    /// - `LoadError::Xml` / `LoadError::Attribute` on malformed markup
    /// - `LoadError::MissingRoot` if there is no `<mutations>` element
    /// - `LoadError::MissingAttribute` for a category without a name
    pub fn load_str(&self, xml: &str) -> Result<Catalog, LoadError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut catalog = Catalog::new();
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                    self.read_categories(&mut reader, &mut catalog)?;
                    return Ok(catalog);
                }
                Event::Empty(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                    return Ok(catalog);
                }
                Event::Eof => return Err(LoadError::MissingRoot),
                _ => {}
            }
        }
    }

    fn read_categories(
        &self,
        reader: &mut Reader<&[u8]>,
        catalog: &mut Catalog,
    ) -> Result<(), LoadError> {
        loop {
            let category = match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == CATEGORY_ELEMENT.as_bytes() => {
                    let mut category = read_category_header(&e)?;
                    self.read_entries(reader, &mut category)?;
                    category
                }
                Event::Empty(e) if e.name().as_ref() == CATEGORY_ELEMENT.as_bytes() => {
                    read_category_header(&e)?
                }
                Event::End(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => return Ok(()),
                Event::Eof => return Err(LoadError::UnexpectedEof(ROOT_ELEMENT)),
                _ => continue,
            };

            let name = category.name.clone();
            match catalog.apply(category) {
                MergeAction::Merged => tracing::debug!("Merged repeated category {}", name),
                MergeAction::Ignored => {
                    tracing::debug!("Removal marker {} matched no loaded category", name);
                }
                MergeAction::Inserted | MergeAction::Removed => {}
            }
        }
    }

    fn read_entries(
        &self,
        reader: &mut Reader<&[u8]>,
        category: &mut MutationCategory,
    ) -> Result<(), LoadError> {
        loop {
            let entry = match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == MUTATION_ELEMENT.as_bytes() => {
                    let entry = read_entry(&e)?;
                    reader.read_to_end(e.name())?;
                    entry
                }
                Event::Empty(e) if e.name().as_ref() == MUTATION_ELEMENT.as_bytes() => {
                    read_entry(&e)?
                }
                Event::End(e) if e.name().as_ref() == CATEGORY_ELEMENT.as_bytes() => {
                    return Ok(());
                }
                Event::Eof => return Err(LoadError::UnexpectedEof(CATEGORY_ELEMENT)),
                _ => continue,
            };

            let Some(entry) = entry else { continue };
            if entry.prerelease && !self.include_prerelease {
                tracing::debug!("Skipping prerelease mutation {}", entry.display_name);
                continue;
            }
            category.push_entry(entry);
        }
    }
}

fn read_category_header(start: &BytesStart<'_>) -> Result<MutationCategory, LoadError> {
    let mut attrs = Attributes::collect(start)?;
    let name = attrs
        .take("Name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| LoadError::missing_attribute(CATEGORY_ELEMENT, "Name"))?;

    let mut category = MutationCategory::new(name, attrs.text("DisplayName"));
    category.help = attrs.text("Help");
    category.stat = attrs.text("Stat");
    category.property = attrs.text("Property");
    category.force_property = attrs.text("ForceProperty");
    Ok(category)
}

/// Returns `None` for nameless entries, which cannot be keyed to a setting.
fn read_entry(start: &BytesStart<'_>) -> Result<Option<MutationEntry>, LoadError> {
    let mut attrs = Attributes::collect(start)?;
    let Some(name) = attrs.take("Name").filter(|n| !n.is_empty()) else {
        tracing::warn!("Ignoring <mutation> without a Name attribute");
        return Ok(None);
    };

    let mut entry = MutationEntry::new(name, attrs.number("Cost").unwrap_or(UNSPECIFIED_COST));
    entry.stat = attrs.text("Stat");
    entry.property = attrs.text("Property");
    entry.force_property = attrs.text("ForceProperty");
    entry.bearer_description = attrs.text("BearerDescription");
    entry.max_selected = attrs.number("MaxSelected");
    entry.max_level = attrs.number("MaxLevel");
    entry.exclusions = attrs.text("Exclusions");
    entry.code = attrs.text("Code");
    entry.class = attrs.text("Class");
    entry.constructor = attrs.text("Constructor");
    entry.prerelease = attrs
        .take("Prerelease")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
    Ok(Some(entry))
}

/// Unescaped attributes of one element; absent keys read as empty
struct Attributes(HashMap<String, String>);

impl Attributes {
    fn collect(start: &BytesStart<'_>) -> Result<Self, LoadError> {
        let mut map = HashMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            map.insert(key, value);
        }
        Ok(Self(map))
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    fn text(&mut self, name: &str) -> String {
        self.take(name).unwrap_or_default()
    }

    fn number(&mut self, name: &str) -> Option<i32> {
        let raw = self.take(name)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring non-numeric {}=\"{}\"", name, raw);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASELINE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<mutations>
  <category Name="Physical" DisplayName="{{G|Physical Mutations}}" Help="Body stuff">
    <mutation Name="Carapace" Cost="4" MaxSelected="1" Class="Carapace" Exclusions="Quills" Code="ba" MaxLevel="10"></mutation>
    <mutation Name="Quills" Cost="3" Class="Quills" Exclusions="Carapace" Code="bb" />
    <mutation Name="Beta Wings" Cost="5" Class="Wings" Prerelease="True" />
  </category>
  <category Name="Defects" DisplayName="Physical Defects">
    <mutation Name="Albino" Cost="-2" Class="Albino" Code="ca" BearerDescription="pale &amp; frail" />
    <mutation Name="Unknown" Class="Mystery" />
  </category>
  <category Name="Physical" DisplayName="dup">
    <mutation Name="Horns" Cost="3" Class="Horns" />
  </category>
</mutations>
"#;

    fn names(catalog: &Catalog, category: &str) -> Vec<String> {
        catalog
            .get(category)
            .map(|c| c.entries().iter().map(|e| e.display_name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn loads_categories_in_order() {
        let catalog = CatalogLoader::new().load_str(BASELINE).unwrap();
        let order: Vec<_> = catalog.categories().map(|c| c.name.as_str()).collect();
        assert_eq!(order, ["Physical", "Defects"]);
    }

    #[test]
    fn merges_repeated_category() {
        let catalog = CatalogLoader::new().load_str(BASELINE).unwrap();
        assert_eq!(names(&catalog, "Physical"), ["Carapace", "Quills", "Horns"]);
        assert_eq!(
            catalog.get("Physical").unwrap().display_name,
            "{{G|Physical Mutations}}"
        );
    }

    #[test]
    fn reads_entry_attributes() {
        let catalog = CatalogLoader::new().load_str(BASELINE).unwrap();
        let carapace = &catalog.get("Physical").unwrap().entries()[0];
        assert_eq!(carapace.cost, 4);
        assert_eq!(carapace.max_selected, Some(1));
        assert_eq!(carapace.max_level, Some(10));
        assert_eq!(carapace.exclusions, "Quills");
        assert_eq!(carapace.code, "ba");
        assert_eq!(carapace.category, "Physical");

        let albino = &catalog.get("Defects").unwrap().entries()[0];
        assert_eq!(albino.cost, -2);
        assert_eq!(albino.bearer_description, "pale & frail");
        assert_eq!(albino.max_selected, None);
    }

    #[test]
    fn missing_cost_uses_sentinel() {
        let catalog = CatalogLoader::new().load_str(BASELINE).unwrap();
        let unknown = &catalog.get("Defects").unwrap().entries()[1];
        assert_eq!(unknown.cost, UNSPECIFIED_COST);
        assert!(unknown.stat.is_empty());
    }

    #[test]
    fn prerelease_filtered_unless_enabled() {
        let without = CatalogLoader::new().load_str(BASELINE).unwrap();
        assert!(!names(&without, "Physical").contains(&"Beta Wings".to_string()));

        let with = CatalogLoader::new()
            .with_prerelease(true)
            .load_str(BASELINE)
            .unwrap();
        let wings = with
            .get("Physical")
            .unwrap()
            .entries()
            .iter()
            .find(|e| e.display_name == "Beta Wings")
            .unwrap();
        assert!(wings.prerelease);
    }

    #[test]
    fn removal_marker_retracts_category() {
        let xml = r#"<mutations>
            <category Name="Mental" DisplayName="Mental"><mutation Name="Telepathy" Cost="3" /></category>
            <category Name="Physical" DisplayName="Physical"><mutation Name="Horns" Cost="3" /></category>
            <category Name="-Mental" />
        </mutations>"#;
        let catalog = CatalogLoader::new().load_str(xml).unwrap();
        assert!(catalog.get("Mental").is_none());
        assert!(catalog.get("-Mental").is_none());
        assert_eq!(catalog.entry_count(), 1);
    }

    #[test]
    fn invalid_number_is_absorbed() {
        let xml = r#"<mutations><category Name="A" DisplayName="A">
            <mutation Name="Odd" Cost="three" MaxLevel="x" />
        </category></mutations>"#;
        let catalog = CatalogLoader::new().load_str(xml).unwrap();
        let odd = &catalog.get("A").unwrap().entries()[0];
        assert_eq!(odd.cost, UNSPECIFIED_COST);
        assert_eq!(odd.max_level, None);
    }

    #[test]
    fn nameless_category_is_an_error() {
        let xml = r#"<mutations><category DisplayName="A"></category></mutations>"#;
        let err = CatalogLoader::new().load_str(xml).unwrap_err();
        assert!(matches!(err, LoadError::MissingAttribute { .. }));
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = CatalogLoader::new().load_str("<other/>").unwrap_err();
        assert!(matches!(err, LoadError::MissingRoot));
    }

    #[test]
    fn truncated_document_is_an_error() {
        let xml = r#"<mutations><category Name="A" DisplayName="A"><mutation Name="B" Cost="1" />"#;
        assert!(CatalogLoader::new().load_str(xml).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogLoader::new()
            .load_path(dir.path().join("Mutations.xml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
