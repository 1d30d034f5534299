use crate::common::file_utils;
use crate::config_loader::MasterConfig;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;
use std::path::PathBuf;

/// Working root for an operation: CLI `--root` override first, then the
/// configured default. The directory is created if missing so every
/// component can rely on it existing.
pub fn resolve_working_root(master_config: &MasterConfig, args: &ArgMatches) -> Result<PathBuf> {
    let root = args
        .try_get_one::<String>("root")
        .ok()
        .flatten()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&master_config.app_settings.working_root));
    debug!("Resolved working root: {}", root.display());
    file_utils::ensure_directory(&root)
        .with_context(|| format!("Failed to prepare working root '{}'", root.display()))?;
    Ok(root)
}

pub fn resolve_camera_index(master_config: &MasterConfig, args: &ArgMatches) -> i32 {
    args.try_get_one::<i32>("camera")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(master_config.capture.camera_index)
}
