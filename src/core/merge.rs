use crate::common::file_utils;
use crate::core::{MERGED_DIR_NAME, SESSION_BASE_NAME, SNAPSHOT_DIR_NAME, SNAPSHOT_FILE_PREFIX};
use crate::errors::AppError;
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub merged_root: PathBuf,
    pub copied: usize,
    pub failed: usize,
}

/// Consolidates every snapshot and every session file into `common_dataset/`,
/// renaming with the source area as prefix so names cannot collide across
/// sources. Destination names are deterministic functions of the source path,
/// so a re-run overwrites the previous copies instead of duplicating them.
///
/// Best-effort by contract: a file that fails to copy is reported and
/// counted, the rest of the merge continues. Nothing is ever deleted.
pub struct DatasetMerger {
    working_root: PathBuf,
}

impl DatasetMerger {
    pub fn new(working_root: impl Into<PathBuf>) -> Self {
        DatasetMerger {
            working_root: working_root.into(),
        }
    }

    pub fn merge(&self) -> Result<MergeSummary, AppError> {
        let merged_root = self.working_root.join(MERGED_DIR_NAME);
        file_utils::ensure_directory(&merged_root)?;

        let mut summary = MergeSummary {
            merged_root: merged_root.clone(),
            copied: 0,
            failed: 0,
        };

        let snapshot_root = self.working_root.join(SNAPSHOT_DIR_NAME);
        if snapshot_root.is_dir() {
            self.merge_flat_area(&snapshot_root, SNAPSHOT_FILE_PREFIX, &merged_root, &mut summary)?;
        } else {
            debug!("No snapshot area at '{}', skipping.", snapshot_root.display());
        }

        let session_prefix = format!("{}_", SESSION_BASE_NAME);
        for entry in fs::read_dir(&self.working_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if !dir_name.starts_with(&session_prefix) {
                continue;
            }
            self.merge_flat_area(&entry.path(), &dir_name, &merged_root, &mut summary)?;
        }

        Ok(summary)
    }

    /// Copy every regular file directly under `area` into `merged_root`,
    /// prefixing names with `prefix`.
    fn merge_flat_area(
        &self,
        area: &Path,
        prefix: &str,
        merged_root: &Path,
        summary: &mut MergeSummary,
    ) -> Result<(), AppError> {
        for entry in fs::read_dir(area)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let dst = merged_root.join(format!("{}_{}", prefix, file_name));
            match file_utils::copy_with_metadata(&entry.path(), &dst) {
                Ok(_) => summary.copied += 1,
                Err(e) => {
                    error!("❌ Failed to merge '{}' into '{}': {}", entry.path().display(), dst.display(), e);
                    summary.failed += 1;
                }
            }
        }
        Ok(())
    }
}
