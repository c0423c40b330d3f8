//! `mutcost` command line
//!
//! Runs the generator outside the host, with a JSON settings file standing
//! in for the host registry.

mod probe;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mutcost_catalog::CatalogLoader;
use mutcost_core::{
    MutcostConfig, OptionsMonitor, RegenerationController, SharedController, TriggerOutcome,
    PRERELEASE_FLAG,
};
use mutcost_options::{
    derive_range, strip_formatting, OptionSynthesizer, SettingsRegistry, SettingsStore,
    OPTIONS_CATEGORY, YES,
};
use probe::FileViewProbe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "mutcost.toml";
const DEFAULT_SETTINGS: &str = "settings.json";
const DEFAULT_VIEW_FILE: &str = "current_view";

fn cli() -> Command {
    Command::new("mutcost")
        .version(mutcost_core::VERSION)
        .about("Mutation cost override generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (default: ./mutcost.toml if present)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .global(true)
                .default_value(DEFAULT_SETTINGS)
                .value_parser(value_parser!(PathBuf))
                .help("JSON file holding setting values"),
        )
        .arg(
            Arg::new("baseline")
                .long("baseline")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Baseline Mutations.xml (overrides config)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory for the generated dataset (overrides config)"),
        )
        .arg(
            Arg::new("prerelease")
                .long("prerelease")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Include prerelease mutations regardless of the host flag"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("generate").about("Register settings and write the dataset once"))
        .subcommand(
            Command::new("watch")
                .about("Regenerate whenever the options screen closes")
                .arg(
                    Arg::new("view-file")
                        .long("view-file")
                        .default_value(DEFAULT_VIEW_FILE)
                        .value_parser(value_parser!(PathBuf))
                        .help("File containing the name of the current view"),
                ),
        )
        .subcommand(
            Command::new("ranges")
                .about("Print the selectable values for baseline costs")
                .arg(
                    Arg::new("costs")
                        .required(true)
                        .num_args(1..)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("Baseline costs"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List the cost settings the baseline produces")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => {
            init_tracing(args.get_flag("verbose"));
            generate(&load_config(args)?, settings_path(args))
        }
        Some(("watch", args)) => {
            init_tracing(args.get_flag("verbose"));
            let view_file = args
                .get_one::<PathBuf>("view-file")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VIEW_FILE));
            watch(load_config(args)?, settings_path(args), view_file).await
        }
        Some(("ranges", args)) => {
            for cost in args.get_many::<i32>("costs").into_iter().flatten() {
                println!("{cost:>4}: {}", derive_range(*cost).join(" |"));
            }
            Ok(())
        }
        Some(("list", args)) => {
            init_tracing(args.get_flag("verbose"));
            list(&load_config(args)?, settings_path(args), args.get_flag("json"))
        }
        _ => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_path(args: &ArgMatches) -> &Path {
    args.get_one::<PathBuf>("settings")
        .map_or(Path::new(DEFAULT_SETTINGS), PathBuf::as_path)
}

fn load_config(args: &ArgMatches) -> anyhow::Result<MutcostConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => MutcostConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => MutcostConfig::from_file(DEFAULT_CONFIG)
            .with_context(|| format!("loading config {DEFAULT_CONFIG}"))?,
        None => MutcostConfig::default(),
    };

    if let Some(baseline) = args.get_one::<PathBuf>("baseline") {
        config = config.with_baseline(baseline.clone());
    }
    if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(dir.clone());
    }
    if args.get_flag("prerelease") {
        config = config.with_prerelease(true);
    }
    tracing::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn generate(config: &MutcostConfig, settings: &Path) -> anyhow::Result<()> {
    let store = SettingsStore::open(settings)?;
    let mut controller = RegenerationController::new(config.clone(), store);
    let report = controller.activate()?;
    controller.registry().save()?;

    println!(
        "Wrote {} ({} settings, {} new)",
        config.output_path().display(),
        report.option_ids.len(),
        report.registered
    );
    Ok(())
}

async fn watch(config: MutcostConfig, settings: &Path, view_file: PathBuf) -> anyhow::Result<()> {
    let store = SettingsStore::open(settings)?;
    let mut controller = RegenerationController::new(config.clone(), store);
    controller.activate()?;
    controller.registry().save()?;

    let shared = controller.into_shared();
    let monitor = OptionsMonitor::new(FileViewProbe::new(&view_file), &config.monitor);
    let handle = monitor.spawn(reload_and_trigger(Arc::clone(&shared)));

    tracing::info!(
        "Watching {} for the {} screen to close",
        view_file.display(),
        config.monitor.options_view
    );
    tokio::signal::ctrl_c().await?;
    handle.abort();
    tracing::info!("Stopped");
    Ok(())
}

/// Re-read settings edited on disk, trigger, then persist any reset
fn reload_and_trigger(controller: SharedController<SettingsStore>) -> impl FnMut() + Send + 'static {
    move || {
        let mut controller = controller.lock();
        if let Err(e) = controller.registry_mut().reload() {
            tracing::error!("Failed to reload settings: {}", e);
            return;
        }
        match controller.on_trigger() {
            Ok(TriggerOutcome::Unchanged) => tracing::debug!("Dataset already current"),
            Ok(outcome) => {
                tracing::info!("Dataset updated: {:?}", outcome);
                if let Err(e) = controller.registry().save() {
                    tracing::error!("Failed to save settings: {}", e);
                }
            }
            Err(e) => tracing::error!("Regeneration failed: {}", e),
        }
    }
}

fn list(config: &MutcostConfig, settings: &Path, json: bool) -> anyhow::Result<()> {
    let mut store = SettingsStore::open(settings)?;
    let include_prerelease = config
        .include_prerelease
        .unwrap_or_else(|| store.get(PRERELEASE_FLAG).as_deref() == Some(YES));
    let catalog = CatalogLoader::new()
        .with_prerelease(include_prerelease)
        .load_path(&config.baseline)
        .with_context(|| format!("loading baseline {}", config.baseline.display()))?;

    OptionSynthesizer::new().synthesize(&catalog, &mut store);
    let definitions = store.in_category(OPTIONS_CATEGORY);

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for definition in definitions {
        let current = store.get_or(&definition.id, &definition.default);
        println!(
            "{:<32} {:>3}  [{}]",
            strip_formatting(&definition.display_text),
            current.trim(),
            definition.values().join(",")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn ranges_accepts_negative_costs() {
        let matches = cli()
            .try_get_matches_from(["mutcost", "ranges", "-1", "5"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let costs: Vec<i32> = args.get_many::<i32>("costs").unwrap().copied().collect();
        assert_eq!(costs, [-1, 5]);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let matches = cli()
            .try_get_matches_from([
                "mutcost",
                "generate",
                "--baseline",
                "base.xml",
                "--output-dir",
                "out",
                "--prerelease",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let config = load_config(args).unwrap();
        assert_eq!(config.baseline, PathBuf::from("base.xml"));
        assert_eq!(config.output_path(), PathBuf::from("out/Mutations.xml"));
        assert_eq!(config.include_prerelease, Some(true));
    }
}
