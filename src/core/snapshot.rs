use crate::common::{file_utils, timestamp_utils};
use crate::core::frame::{encode_frame, EncodeSettings, Frame};
use crate::core::{SNAPSHOT_DIR_NAME, SNAPSHOT_FILE_PREFIX};
use crate::errors::AppError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists single frames into the flat snapshot area.
///
/// Names carry whole-second timestamps, so two snapshots within the same
/// second land on the same name and the later one wins. Known limitation,
/// kept for layout compatibility.
pub struct SnapshotWriter {
    snapshot_root: PathBuf,
    encode: EncodeSettings,
}

impl SnapshotWriter {
    pub fn new(working_root: &Path, encode: EncodeSettings) -> Self {
        SnapshotWriter {
            snapshot_root: working_root.join(SNAPSHOT_DIR_NAME),
            encode,
        }
    }

    pub fn snapshot_root(&self) -> &Path {
        &self.snapshot_root
    }

    pub fn save(&self, frame: &Frame) -> Result<PathBuf, AppError> {
        file_utils::ensure_directory(&self.snapshot_root)?;
        let filename = format!(
            "{}_{}.{}",
            SNAPSHOT_FILE_PREFIX,
            timestamp_utils::epoch_seconds(),
            self.encode.format.extension()
        );
        let path = self.snapshot_root.join(filename);
        let bytes = encode_frame(frame, &self.encode)?;
        fs::write(&path, bytes).map_err(|e| AppError::FileWrite {
            path: path.clone(),
            details: e.to_string(),
        })?;
        debug!("Snapshot saved: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::ImageFormat;

    fn writer(root: &Path) -> SnapshotWriter {
        SnapshotWriter::new(
            root,
            EncodeSettings {
                format: ImageFormat::Jpeg,
                jpeg_quality: 90,
                png_compression: 3,
            },
        )
    }

    fn test_frame() -> Frame {
        Frame::from_rgb8(4, 3, vec![50; 36]).unwrap()
    }

    #[test]
    fn save_creates_snapshot_root_and_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());
        assert!(!dir.path().join(SNAPSHOT_DIR_NAME).exists());

        let path = writer.save(&test_frame()).unwrap();
        assert!(path.is_file());
        assert_eq!(fs::read_dir(dir.path().join(SNAPSHOT_DIR_NAME)).unwrap().count(), 1);
    }

    #[test]
    fn filename_embeds_call_time_to_the_second() {
        let dir = tempfile::tempdir().unwrap();
        let before = timestamp_utils::epoch_seconds();
        let path = writer(dir.path()).save(&test_frame()).unwrap();
        let after = timestamp_utils::epoch_seconds();

        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let stamp: i64 = name.strip_prefix("snapshot_").unwrap().parse().unwrap();
        assert!(stamp >= before && stamp <= after);
    }

    #[test]
    fn save_into_existing_snapshot_root_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SNAPSHOT_DIR_NAME)).unwrap();
        assert!(writer(dir.path()).save(&test_frame()).is_ok());
    }
}
