use crate::common::file_utils;
use crate::core::frame::{encode_frame, EncodeSettings, Frame};
use crate::core::session_namer::SessionNamer;
use crate::core::{FRAME_FILE_PREFIX, SESSION_BASE_NAME};
use crate::errors::AppError;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording {
        session_id: u32,
        session_path: PathBuf,
    },
}

/// The capture state machine. Owned by the orchestrator and driven once per
/// tick; never shared, never ambient.
pub struct RecordingController {
    working_root: PathBuf,
    namer: SessionNamer,
    encode: EncodeSettings,
    frame_timestamp_format: String,
    state: RecordingState,
    /// Highest session id this controller has handed out. The next start
    /// never goes below it, so an externally deleted session directory does
    /// not lead to in-process id reuse. Across processes the rescan alone
    /// decides (see DESIGN.md).
    last_issued: Option<u32>,
}

impl RecordingController {
    pub fn new(
        working_root: impl Into<PathBuf>,
        encode: EncodeSettings,
        frame_timestamp_format: impl Into<String>,
    ) -> Self {
        let working_root = working_root.into();
        RecordingController {
            namer: SessionNamer::new(&working_root),
            working_root,
            encode,
            frame_timestamp_format: frame_timestamp_format.into(),
            state: RecordingState::Idle,
            last_issued: None,
        }
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    /// Start a new session when Idle, close the open one when Recording.
    /// Returns the state after the transition so the caller can render it.
    /// A failed session-directory creation leaves the controller Idle.
    pub fn toggle(&mut self) -> Result<&RecordingState, AppError> {
        match &self.state {
            RecordingState::Recording { session_id, session_path } => {
                info!("⏹️ Stopped recording session {} ({})", session_id, session_path.display());
                self.state = RecordingState::Idle;
            }
            RecordingState::Idle => {
                let scanned = self.namer.next_session_number(SESSION_BASE_NAME)?;
                let session_id = match self.last_issued {
                    Some(prev) => scanned.max(prev.saturating_add(1)),
                    None => scanned,
                };
                let session_path = self
                    .working_root
                    .join(format!("{}_{}", SESSION_BASE_NAME, session_id));
                if let Err(e) = fs::create_dir_all(&session_path) {
                    self.state = RecordingState::Idle;
                    return Err(AppError::DirectoryCreate {
                        path: session_path,
                        details: e.to_string(),
                    });
                }
                self.last_issued = Some(session_id);
                info!("⏺️ Started recording session {} ({})", session_id, session_path.display());
                self.state = RecordingState::Recording { session_id, session_path };
            }
        }
        Ok(&self.state)
    }

    /// Persist one frame into the open session. No-op while Idle. A write
    /// failure is returned for reporting; the session stays open.
    pub fn on_frame(&mut self, frame: &Frame) -> Result<Option<PathBuf>, AppError> {
        let RecordingState::Recording { session_path, .. } = &self.state else {
            return Ok(None);
        };
        let filename = file_utils::generate_timestamped_filename(
            FRAME_FILE_PREFIX,
            &self.frame_timestamp_format,
            self.encode.format.extension(),
        );
        let path = session_path.join(filename);
        let bytes = encode_frame(frame, &self.encode)?;
        fs::write(&path, bytes).map_err(|e| AppError::FileWrite {
            path: path.clone(),
            details: e.to_string(),
        })?;
        debug!("Frame saved: {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::ImageFormat;
    use std::path::Path;

    fn test_encode() -> EncodeSettings {
        EncodeSettings {
            format: ImageFormat::Jpeg,
            jpeg_quality: 90,
            png_compression: 3,
        }
    }

    fn test_frame() -> Frame {
        Frame::from_rgb8(4, 3, vec![128; 36]).unwrap()
    }

    fn controller(root: &Path) -> RecordingController {
        RecordingController::new(root, test_encode(), "%s%3f")
    }

    fn session_files(path: &Path) -> Vec<String> {
        fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn toggle_from_idle_creates_next_session_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dataset_2")).unwrap();
        let mut ctl = controller(dir.path());

        let state = ctl.toggle().unwrap().clone();
        assert!(ctl.is_recording());
        match state {
            RecordingState::Recording { session_id, session_path } => {
                assert_eq!(session_id, 3);
                assert!(session_path.ends_with("dataset_3"));
                assert!(session_path.is_dir());
            }
            RecordingState::Idle => panic!("expected Recording state"),
        }
    }

    #[test]
    fn toggle_from_recording_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.toggle().unwrap();
        let state = ctl.toggle().unwrap();
        assert_eq!(*state, RecordingState::Idle);
        assert!(dir.path().join("dataset_1").is_dir());
    }

    #[test]
    fn on_frame_is_a_no_op_while_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        assert_eq!(ctl.on_frame(&test_frame()).unwrap(), None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn on_frame_writes_into_open_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.toggle().unwrap();
        let path = ctl.on_frame(&test_frame()).unwrap().expect("a written path");
        assert!(path.is_file());
        assert!(path.starts_with(dir.path().join("dataset_1")));
        let files = session_files(&dir.path().join("dataset_1"));
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("frame_"));
        assert!(files[0].ends_with(".jpg"));
    }

    #[test]
    fn closed_session_receives_no_further_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.toggle().unwrap();
        ctl.on_frame(&test_frame()).unwrap();
        ctl.toggle().unwrap();
        let before = session_files(&dir.path().join("dataset_1")).len();
        assert_eq!(ctl.on_frame(&test_frame()).unwrap(), None);
        assert_eq!(session_files(&dir.path().join("dataset_1")).len(), before);
    }

    #[test]
    fn restarting_opens_a_fresh_numbered_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.toggle().unwrap();
        ctl.toggle().unwrap();
        ctl.toggle().unwrap();
        match ctl.state() {
            RecordingState::Recording { session_id, .. } => assert_eq!(*session_id, 2),
            RecordingState::Idle => panic!("expected Recording state"),
        }
        assert!(dir.path().join("dataset_1").is_dir());
        assert!(dir.path().join("dataset_2").is_dir());
    }

    #[test]
    fn issued_ids_are_not_reused_after_external_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.toggle().unwrap();
        ctl.toggle().unwrap();
        fs::remove_dir_all(dir.path().join("dataset_1")).unwrap();
        ctl.toggle().unwrap();
        match ctl.state() {
            RecordingState::Recording { session_id, .. } => assert_eq!(*session_id, 2),
            RecordingState::Idle => panic!("expected Recording state"),
        }
    }
}
