use crate::camera::opencv_device::OpenCvFrameSource;
use crate::config_loader::MasterConfig;
use crate::core::capture_loop::CaptureLoop;
use crate::core::merge::DatasetMerger;
use crate::core::recording::RecordingController;
use crate::core::snapshot::SnapshotWriter;
use crate::errors::AppError;
use crate::operations::op_helper;
use crate::ui::highgui_surface::HighguiSurface;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{error, info};
use std::time::{Duration, Instant};

const WINDOW_NAME: &str = "camset live feed";

pub fn handle_live_capture_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();

    let working_root = op_helper::resolve_working_root(master_config, args)?;
    let camera_index = op_helper::resolve_camera_index(master_config, args);
    let encode = master_config.encode_settings();

    let source = OpenCvFrameSource::open(camera_index, &master_config.capture)
        .with_context(|| format!("Failed to open capture device {}", camera_index))?;
    let surface = HighguiSurface::new(WINDOW_NAME).context("Failed to create the display window")?;

    info!(
        "🎥 Live capture starting: device {}, working root '{}'.",
        camera_index,
        working_root.display()
    );

    let mut capture = CaptureLoop::new(
        source,
        surface,
        RecordingController::new(
            &working_root,
            encode,
            &master_config.app_settings.frame_timestamp_format,
        ),
        SnapshotWriter::new(&working_root, encode),
        DatasetMerger::new(&working_root),
        Duration::from_millis(master_config.capture.tick_interval_ms),
    );

    match capture.run() {
        Ok(stats) => {
            info!(
                "✅ Live capture finished after {:?}: {} ticks, {} frames recorded, {} snapshots, {} merges.",
                op_start_time.elapsed(),
                stats.ticks,
                stats.frames_recorded,
                stats.snapshots_taken,
                stats.merges_run
            );
            Ok(())
        }
        // The feed ending is how a session ends when the camera goes away;
        // report it and exit cleanly like an operator quit.
        Err(AppError::FrameUnavailable(details)) => {
            error!("📷 Camera feed ended after {:?}: {}", op_start_time.elapsed(), details);
            Ok(())
        }
        Err(e) => Err(e).context("Capture loop failed"),
    }
}
