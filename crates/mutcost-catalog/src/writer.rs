//! Mutations.xml serializer
//!
//! Every element is written with an explicit end tag; the game's parser
//! rejects self-closing `<mutation/>` elements.

use crate::error::WriteError;
use crate::loader::{CATEGORY_ELEMENT, MUTATION_ELEMENT, ROOT_ELEMENT};
use crate::model::{Catalog, MutationCategory, MutationEntry};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Serialize `catalog` to `sink`, taking each entry's cost text from `cost_for`
///
/// An empty cost string omits the `Cost` attribute, mirroring a baseline
/// entry that never declared one.
///
/// # Errors
/// Returns `WriteError` if the sink or the XML writer fails.
pub fn write_catalog<W, F>(sink: W, catalog: &Catalog, mut cost_for: F) -> Result<(), WriteError>
where
    W: Write,
    F: FnMut(&MutationEntry) -> String,
{
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for category in catalog.categories() {
        writer.write_event(Event::Start(category_element(category)))?;
        for entry in category.entries() {
            let cost = cost_for(entry);
            writer.write_event(Event::Start(entry_element(entry, &cost)))?;
            writer.write_event(Event::End(BytesEnd::new(MUTATION_ELEMENT)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(CATEGORY_ELEMENT)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut sink = writer.into_inner();
    sink.write_all(b"\n")?;
    sink.flush()?;
    Ok(())
}

fn category_element(category: &MutationCategory) -> BytesStart<'static> {
    let mut start = BytesStart::new(CATEGORY_ELEMENT);
    start.push_attribute(("Name", category.name.as_str()));
    start.push_attribute(("DisplayName", category.display_name.as_str()));
    push_non_empty(&mut start, "Help", &category.help);
    push_non_empty(&mut start, "Stat", &category.stat);
    push_non_empty(&mut start, "Property", &category.property);
    push_non_empty(&mut start, "ForceProperty", &category.force_property);
    start
}

fn entry_element(entry: &MutationEntry, cost: &str) -> BytesStart<'static> {
    let mut start = BytesStart::new(MUTATION_ELEMENT);
    start.push_attribute(("Name", entry.display_name.as_str()));
    push_non_empty(&mut start, "Cost", cost);
    push_non_empty(&mut start, "Stat", &entry.stat);
    if let Some(max) = entry.max_selected {
        start.push_attribute(("MaxSelected", max.to_string().as_str()));
    }
    start.push_attribute(("Class", entry.class.as_str()));
    push_non_empty(&mut start, "Constructor", &entry.constructor);
    push_non_empty(&mut start, "Exclusions", &entry.exclusions);
    if let Some(max) = entry.max_level {
        start.push_attribute(("MaxLevel", max.to_string().as_str()));
    }
    push_non_empty(&mut start, "Property", &entry.property);
    push_non_empty(&mut start, "ForceProperty", &entry.force_property);
    push_non_empty(&mut start, "BearerDescription", &entry.bearer_description);
    push_non_empty(&mut start, "Code", &entry.code);
    if entry.prerelease {
        start.push_attribute(("Prerelease", "true"));
    }
    start
}

fn push_non_empty(start: &mut BytesStart<'_>, name: &str, value: &str) {
    if !value.is_empty() {
        start.push_attribute((name, value));
    }
}
