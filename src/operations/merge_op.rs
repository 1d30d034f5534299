use crate::config_loader::MasterConfig;
use crate::core::merge::DatasetMerger;
use crate::operations::op_helper;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};
use std::time::Instant;

/// Headless merge so datasets can be consolidated without a camera attached.
pub fn handle_merge_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();

    let working_root = op_helper::resolve_working_root(master_config, args)?;
    let merger = DatasetMerger::new(&working_root);

    let summary = merger
        .merge()
        .with_context(|| format!("Merge failed under '{}'", working_root.display()))?;

    info!(
        "✅ Merged {} file(s) into '{}' in {:?}.",
        summary.copied,
        summary.merged_root.display(),
        op_start_time.elapsed()
    );
    if summary.failed > 0 {
        warn!(
            "⚠️ {} file(s) could not be copied; see errors above. The merge is best-effort and kept going.",
            summary.failed
        );
    }
    Ok(())
}
