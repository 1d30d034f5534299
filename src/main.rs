mod app_config;
mod camera;
mod cli;
mod common;
mod config_loader;
mod core;
mod errors;
mod operations;
mod ui;

use anyhow::{bail, Result};
use common::logging_setup;
use config_loader::MasterConfig;
use log::{debug, error, info, warn};
use std::path::Path;
use std::time::Instant;

const DEFAULT_CONFIG_PATH: &str = "config/camset.yaml";

fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let explicit_config = matches.get_one::<String>("config").is_some();
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_PATH);

    debug!("Attempting to load configuration from: {}", config_path);
    let master_config = if explicit_config || Path::new(config_path).exists() {
        match config_loader::load_config(config_path) {
            Ok(cfg) => {
                logging_setup::initialize_logging(Some(&cfg), &matches);
                cfg
            }
            Err(e) => {
                logging_setup::initialize_logging(None, &matches);
                error!("❌ Failed to load master configuration from '{}': {:#}. Exiting.", config_path, e);
                return Err(e.context(format!("Failed to load master configuration from '{}'", config_path)));
            }
        }
    } else {
        logging_setup::initialize_logging(None, &matches);
        warn!("⚠️ No configuration file at '{}', using built-in defaults.", config_path);
        MasterConfig::default()
    };

    let (operation_name, op_result) = match matches.subcommand() {
        Some(("live", sub_matches)) => (
            "live",
            operations::live_capture_op::handle_live_capture_cli(&master_config, sub_matches),
        ),
        Some(("snap", sub_matches)) => (
            "snap",
            operations::snapshot_op::handle_snapshot_cli(&master_config, sub_matches),
        ),
        Some(("merge", sub_matches)) => (
            "merge",
            operations::merge_op::handle_merge_cli(&master_config, sub_matches),
        ),
        Some((other, _)) => bail!("Subcommand '{}' not implemented.", other),
        None => {
            info!("🤔 No subcommand provided, starting live capture.");
            (
                "live",
                operations::live_capture_op::handle_live_capture_cli(&master_config, &matches),
            )
        }
    };

    if let Err(e) = op_result {
        error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, main_start_time.elapsed(), e);
        return Err(e);
    }

    info!("🏁 Operation '{}' finished in {:?}.", operation_name, main_start_time.elapsed());
    Ok(())
}
