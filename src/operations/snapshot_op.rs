use crate::camera::opencv_device::OpenCvFrameSource;
use crate::config_loader::MasterConfig;
use crate::core::frame_source::FrameSource;
use crate::core::snapshot::SnapshotWriter;
use crate::operations::op_helper;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use std::time::Instant;

/// One-shot headless snapshot: grab a single frame and store it in the
/// snapshot area, no window involved.
pub fn handle_snapshot_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();

    let working_root = op_helper::resolve_working_root(master_config, args)?;
    let camera_index = op_helper::resolve_camera_index(master_config, args);

    let mut source = OpenCvFrameSource::open(camera_index, &master_config.capture)
        .with_context(|| format!("Failed to open capture device {}", camera_index))?;
    let frame = source
        .read()
        .with_context(|| format!("Failed to grab a frame from device {}", camera_index))?;

    let writer = SnapshotWriter::new(&working_root, master_config.encode_settings());
    let path = writer.save(&frame).context("Failed to save the snapshot")?;

    info!(
        "✅ Snapshot saved to '{}' ({}x{}) in {:?}.",
        path.display(),
        frame.width(),
        frame.height(),
        op_start_time.elapsed()
    );
    Ok(())
}
