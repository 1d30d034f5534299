use crate::core::frame::Frame;
use crate::core::frame_source::FrameSource;
use crate::core::merge::DatasetMerger;
use crate::core::recording::RecordingController;
use crate::core::snapshot::SnapshotWriter;
use crate::core::surface::{Command, Surface, SurfaceEvent};
use crate::errors::AppError;
use log::{error, info, warn};
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub frames_recorded: u64,
    pub snapshots_taken: u64,
    pub merges_run: u64,
}

/// The tick-driven orchestrator. Everything runs inline on this thread:
/// frame acquisition, rendering, command dispatch and filesystem writes.
/// A slow write stalls the tick rather than racing it.
pub struct CaptureLoop<S: FrameSource, U: Surface> {
    source: S,
    surface: U,
    controller: RecordingController,
    snapshots: SnapshotWriter,
    merger: DatasetMerger,
    tick_interval: Duration,
}

impl<S: FrameSource, U: Surface> CaptureLoop<S, U> {
    pub fn new(
        source: S,
        surface: U,
        controller: RecordingController,
        snapshots: SnapshotWriter,
        merger: DatasetMerger,
        tick_interval: Duration,
    ) -> Self {
        CaptureLoop {
            source,
            surface,
            controller,
            snapshots,
            merger,
            tick_interval,
        }
    }

    /// Run until the operator quits (Ok) or the source fails
    /// (Err(FrameUnavailable)). Recoverable errors are reported and the loop
    /// keeps going.
    pub fn run(&mut self) -> Result<LoopStats, AppError> {
        info!("🎬 Capture loop starting ({:?} per tick) on source '{}'.", self.tick_interval, self.source.name());
        let mut stats = LoopStats::default();

        loop {
            let tick_start = Instant::now();

            let frame = match self.source.read() {
                Ok(frame) => frame,
                Err(e) => {
                    error!("❌ Failed to grab frame from '{}': {}", self.source.name(), e);
                    return Err(e);
                }
            };
            stats.ticks += 1;

            if let Err(e) = self.surface.present(&frame, self.controller.is_recording()) {
                warn!("⚠️ Surface failed to present frame: {}", e);
            }

            let events = match self.surface.poll_events() {
                Ok(events) => events,
                Err(e) => {
                    warn!("⚠️ Surface failed to deliver events: {}", e);
                    Vec::new()
                }
            };

            let mut quit_requested = false;
            for event in events {
                match event {
                    SurfaceEvent::Quit => quit_requested = true,
                    SurfaceEvent::Command(cmd) => self.dispatch(cmd, &frame, &mut stats),
                }
            }

            // The controller no-ops while Idle.
            match self.controller.on_frame(&frame) {
                Ok(Some(_)) => stats.frames_recorded += 1,
                Ok(None) => {}
                Err(e) => error!("❌ Failed to persist frame: {}", e),
            }

            if quit_requested {
                info!("🛑 Quit requested by operator.");
                break;
            }

            if let Some(remaining) = self.tick_interval.checked_sub(tick_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        info!(
            "🏁 Capture loop finished: {} ticks, {} frames recorded, {} snapshots, {} merges.",
            stats.ticks, stats.frames_recorded, stats.snapshots_taken, stats.merges_run
        );
        Ok(stats)
    }

    fn dispatch(&mut self, command: Command, frame: &Frame, stats: &mut LoopStats) {
        match command {
            Command::ToggleRecord => match self.controller.toggle() {
                Ok(_) => {}
                Err(e) => error!("❌ Could not toggle recording: {}", e),
            },
            Command::Snapshot => match self.snapshots.save(frame) {
                Ok(path) => {
                    stats.snapshots_taken += 1;
                    info!("📸 Snapshot saved: {}", path.display());
                }
                Err(e) => error!("❌ Snapshot failed: {}", e),
            },
            Command::Merge => match self.merger.merge() {
                Ok(summary) => {
                    stats.merges_run += 1;
                    if summary.failed > 0 {
                        warn!(
                            "⚠️ Merge into '{}' copied {} file(s) with {} failure(s).",
                            summary.merged_root.display(),
                            summary.copied,
                            summary.failed
                        );
                    } else {
                        info!(
                            "✅ Merged {} file(s) into '{}'.",
                            summary.copied,
                            summary.merged_root.display()
                        );
                    }
                }
                Err(e) => error!("❌ Merge failed: {}", e),
            },
        }
    }

    pub fn controller(&self) -> &RecordingController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::{EncodeSettings, Frame, ImageFormat};
    use crate::core::{MERGED_DIR_NAME, SNAPSHOT_DIR_NAME};
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    struct ScriptedSource {
        frames_left: usize,
    }

    impl FrameSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn read(&mut self) -> Result<Frame, AppError> {
            if self.frames_left == 0 {
                return Err(AppError::FrameUnavailable("script exhausted".to_string()));
            }
            self.frames_left -= 1;
            Ok(Frame::from_rgb8(4, 3, vec![200; 36]).unwrap())
        }
    }

    struct ScriptedSurface {
        script: VecDeque<Vec<SurfaceEvent>>,
        presented: usize,
    }

    impl ScriptedSurface {
        fn new(script: Vec<Vec<SurfaceEvent>>) -> Self {
            ScriptedSurface {
                script: script.into(),
                presented: 0,
            }
        }
    }

    impl Surface for ScriptedSurface {
        fn present(&mut self, _frame: &Frame, _recording: bool) -> Result<(), AppError> {
            self.presented += 1;
            Ok(())
        }

        fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>, AppError> {
            Ok(self.script.pop_front().unwrap_or_default())
        }
    }

    fn build_loop(root: &Path, frames: usize, script: Vec<Vec<SurfaceEvent>>) -> CaptureLoop<ScriptedSource, ScriptedSurface> {
        let encode = EncodeSettings {
            format: ImageFormat::Jpeg,
            jpeg_quality: 90,
            png_compression: 3,
        };
        CaptureLoop::new(
            ScriptedSource { frames_left: frames },
            ScriptedSurface::new(script),
            RecordingController::new(root, encode, "%s%3f"),
            SnapshotWriter::new(root, encode),
            DatasetMerger::new(root),
            Duration::from_millis(2),
        )
    }

    #[test]
    fn record_one_frame_then_stop_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![
            vec![SurfaceEvent::Command(Command::ToggleRecord)],
            vec![SurfaceEvent::Command(Command::ToggleRecord)],
            vec![SurfaceEvent::Quit],
        ];
        let mut cap = build_loop(dir.path(), 10, script);
        let stats = cap.run().unwrap();

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.frames_recorded, 1);
        assert!(!cap.controller().is_recording());

        let session = dir.path().join("dataset_1");
        assert!(session.is_dir());
        assert_eq!(fs::read_dir(&session).unwrap().count(), 1);
    }

    #[test]
    fn frame_fetch_failure_terminates_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut cap = build_loop(dir.path(), 2, Vec::new());
        let err = cap.run().unwrap_err();
        assert!(matches!(err, AppError::FrameUnavailable(_)));
    }

    #[test]
    fn snapshot_and_merge_commands_reach_their_components() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![
            vec![SurfaceEvent::Command(Command::Snapshot)],
            vec![SurfaceEvent::Command(Command::Merge)],
            vec![SurfaceEvent::Quit],
        ];
        let stats = build_loop(dir.path(), 10, script).run().unwrap();

        assert_eq!(stats.snapshots_taken, 1);
        assert_eq!(stats.merges_run, 1);
        assert_eq!(fs::read_dir(dir.path().join(SNAPSHOT_DIR_NAME)).unwrap().count(), 1);
        let merged = dir.path().join(MERGED_DIR_NAME);
        assert!(merged.is_dir());
        assert_eq!(fs::read_dir(&merged).unwrap().count(), 1);
    }

    #[test]
    fn idle_ticks_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![vec![], vec![], vec![SurfaceEvent::Quit]];
        let stats = build_loop(dir.path(), 10, script).run().unwrap();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.frames_recorded, 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn quit_tick_still_records_its_frame() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![
            vec![SurfaceEvent::Command(Command::ToggleRecord)],
            vec![SurfaceEvent::Quit],
        ];
        let stats = build_loop(dir.path(), 10, script).run().unwrap();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.frames_recorded, 2);
    }
}
