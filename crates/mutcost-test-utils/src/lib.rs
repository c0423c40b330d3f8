//! Testing utilities for MUTCOST workspace
//!
//! Shared baseline fixtures and registry helpers.

#![allow(missing_docs)]

use mutcost_options::SettingsRegistry;
use std::path::{Path, PathBuf};

/// Small baseline covering merge, removal, prerelease and fixed costs
pub const SAMPLE_MUTATIONS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<mutations>
  <category Name="Physical" DisplayName="{{G|Physical Mutations}}" Help="Changes to the body">
    <mutation Name="Carapace" Cost="4" MaxSelected="1" Class="Carapace" Exclusions="Quills" Code="ba"></mutation>
    <mutation Name="Chimera" Cost="0" Class="Chimera"></mutation>
    <mutation Name="Wings" Cost="5" Class="Wings" MaxLevel="10"></mutation>
  </category>
  <category Name="Mental" DisplayName="&amp;CMental Mutations">
    <mutation Name="Telepathy" Cost="1" Class="Telepathy"></mutation>
    <mutation Name="Psychometry" Cost="2" Class="Psychometry" Prerelease="true"></mutation>
  </category>
  <category Name="Defects" DisplayName="Physical Defects">
    <mutation Name="Albino" Cost="-1" Class="Albino"></mutation>
  </category>
  <category Name="Physical" DisplayName="{{G|Physical Mutations}}">
    <mutation Name="Quills" Cost="-5" Class="Quills"></mutation>
  </category>
  <category Name="Obsolete" DisplayName="Obsolete">
    <mutation Name="Gone" Cost="3" Class="Gone"></mutation>
  </category>
  <category Name="-Obsolete" DisplayName="Obsolete"></category>
</mutations>
"#;

/// Names of the sample's entries when prerelease content is off, in order
pub const SAMPLE_ENTRY_NAMES: [&str; 6] =
    ["Carapace", "Chimera", "Wings", "Quills", "Telepathy", "Albino"];

pub const SAMPLE_PRERELEASE_ENTRY: &str = "Psychometry";

/// Write `xml` as `Mutations.xml` under `dir`, returning its path
pub fn write_baseline(dir: &Path, xml: &str) -> PathBuf {
    let path = dir.join("Mutations.xml");
    std::fs::write(&path, xml).unwrap();
    path
}

pub fn setting_value<R: SettingsRegistry>(registry: &R, entry: &str) -> Option<String> {
    registry.get(&format!("{}{entry}", mutcost_options::OPTION_PREFIX))
}
