//! Regeneration Tests
//!
//! End-to-end runs of the controller against the sample baseline.

use mutcost_catalog::CatalogLoader;
use mutcost_core::{
    trigger_controller, ControllerError, MutcostConfig, OptionsMonitor, RegenerationController,
    TriggerOutcome, PRERELEASE_FLAG,
};
use mutcost_options::{InMemoryRegistry, SettingsRegistry, SettingsStore, RESET_OPTION_ID, YES};
use mutcost_test_utils::{
    setting_value, write_baseline, SAMPLE_ENTRY_NAMES, SAMPLE_MUTATIONS, SAMPLE_PRERELEASE_ENTRY,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn config(dir: &TempDir) -> MutcostConfig {
    MutcostConfig::new()
        .with_baseline(write_baseline(dir.path(), SAMPLE_MUTATIONS))
        .with_output_dir(dir.path().join("mod"))
}

fn generated_costs(config: &MutcostConfig) -> Vec<(String, i32)> {
    CatalogLoader::new()
        .with_prerelease(true)
        .load_path(config.output_path())
        .unwrap()
        .entries()
        .map(|(_, e)| (e.display_name.clone(), e.cost))
        .collect()
}

#[test]
fn test_generated_file_mirrors_baseline() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let mut controller = RegenerationController::new(config.clone(), InMemoryRegistry::new());
    controller.activate().unwrap();

    let names: Vec<_> = generated_costs(&config).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, SAMPLE_ENTRY_NAMES);

    let text = std::fs::read_to_string(config.output_path()).unwrap();
    assert!(!text.contains("/>"));
    assert!(!text.contains("Obsolete"));
    assert!(text.contains(r#"Exclusions="Quills""#));
    assert!(text.contains(r#"MaxLevel="10""#));
}

#[test]
fn test_round_trip_preserves_resolved_costs() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let registry = InMemoryRegistry::new()
        .with_value("MutableMutationsMod:MutationCost:Wings", " 7")
        .with_value("MutableMutationsMod:MutationCost:Albino", "  ");
    let mut controller = RegenerationController::new(config.clone(), registry);
    controller.activate().unwrap();

    let costs = generated_costs(&config);
    assert!(costs.contains(&("Wings".to_string(), 7)));
    assert!(costs.contains(&("Albino".to_string(), -1)));
    assert!(costs.contains(&("Chimera".to_string(), 0)));
}

#[test]
fn test_fixed_cost_entries_get_no_setting() {
    let dir = TempDir::new().unwrap();
    let mut controller = RegenerationController::new(config(&dir), InMemoryRegistry::new());
    controller.activate().unwrap();

    assert!(!controller
        .registry()
        .contains("MutableMutationsMod:MutationCost:Chimera"));
    assert_eq!(
        setting_value(controller.registry(), "Telepathy").as_deref(),
        Some(" 1")
    );
}

#[test]
fn test_change_then_reset() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let mut controller = RegenerationController::new(config.clone(), InMemoryRegistry::new());
    controller.activate().unwrap();

    controller
        .registry_mut()
        .set("MutableMutationsMod:MutationCost:Carapace", " 2");
    assert_eq!(controller.on_trigger().unwrap(), TriggerOutcome::Regenerated);
    assert!(generated_costs(&config).contains(&("Carapace".to_string(), 2)));

    controller.registry_mut().set(RESET_OPTION_ID, YES);
    assert_eq!(controller.on_trigger().unwrap(), TriggerOutcome::Reset);
    assert!(generated_costs(&config).contains(&("Carapace".to_string(), 4)));
}

#[test]
fn test_prerelease_follows_host_flag() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let registry = InMemoryRegistry::new().with_value(PRERELEASE_FLAG, YES);
    let mut controller = RegenerationController::new(config.clone(), registry);
    controller.activate().unwrap();

    assert!(generated_costs(&config)
        .iter()
        .any(|(name, _)| name == SAMPLE_PRERELEASE_ENTRY));

    let dir = TempDir::new().unwrap();
    let config = self::config(&dir);
    let mut controller = RegenerationController::new(config.clone(), InMemoryRegistry::new());
    controller.activate().unwrap();
    assert!(!generated_costs(&config)
        .iter()
        .any(|(name, _)| name == SAMPLE_PRERELEASE_ENTRY));
}

#[test]
fn test_write_failure_retries_on_next_trigger() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("mod");
    std::fs::write(&blocker, "").unwrap();

    let mut controller = RegenerationController::new(config(&dir), InMemoryRegistry::new());
    assert!(matches!(controller.activate(), Err(ControllerError::Write(_))));
    assert!(controller.is_active());
    assert!(controller.cache().unwrap().is_empty());

    std::fs::remove_file(&blocker).unwrap();
    assert_eq!(controller.on_trigger().unwrap(), TriggerOutcome::Regenerated);
    assert!(controller.config().output_path().exists());
}

#[test]
fn test_settings_store_backed_controller() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    let store = SettingsStore::open(&settings).unwrap();
    let mut controller = RegenerationController::new(config(&dir), store);
    controller.activate().unwrap();
    controller.registry().save().unwrap();

    let mut external = SettingsStore::open(&settings).unwrap();
    external.set("MutableMutationsMod:MutationCost:Wings", " 3");
    external.save().unwrap();

    controller.registry_mut().reload().unwrap();
    assert_eq!(controller.on_trigger().unwrap(), TriggerOutcome::Regenerated);
    assert!(generated_costs(controller.config()).contains(&("Wings".to_string(), 3)));
}

#[tokio::test(start_paused = true)]
async fn test_monitor_drives_shared_controller() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let mut controller = RegenerationController::new(config.clone(), InMemoryRegistry::new());
    controller.activate().unwrap();
    let shared = controller.into_shared();

    let view = Arc::new(Mutex::new(String::from("Options")));
    let current_view = {
        let view = Arc::clone(&view);
        move || view.lock().clone()
    };
    let handle =
        OptionsMonitor::new(current_view, &config.monitor).spawn(trigger_controller(Arc::clone(&shared)));

    tokio::time::sleep(Duration::from_millis(100)).await;
    shared
        .lock()
        .registry_mut()
        .set("MutableMutationsMod:MutationCost:Quills", "-3");
    *view.lock() = "Game".to_string();
    tokio::time::sleep(Duration::from_millis(500)).await;

    {
        let controller = shared.lock();
        assert!(controller.cache().unwrap().validate(controller.registry()));
    }
    assert!(generated_costs(&config).contains(&("Quills".to_string(), -3)));
    handle.abort();
}
