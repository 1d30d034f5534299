use crate::common::timestamp_utils;
use crate::errors::AppError;
use log::debug;
use std::fs;
use std::path::Path;

pub fn generate_timestamped_filename(
    base_name: &str,        // e.g., "frame", "snapshot"
    timestamp_format: &str, // from config, e.g., "%s%3f"
    extension: &str,        // e.g., "jpg", "png"
) -> String {
    let timestamp = timestamp_utils::current_local_timestamp_str(timestamp_format);
    format!("{}_{}.{}", base_name, timestamp, extension)
}

pub fn ensure_directory(dir_path: &Path) -> Result<(), AppError> {
    if !dir_path.exists() {
        debug!("Directory '{}' does not exist, attempting to create it.", dir_path.display());
        fs::create_dir_all(dir_path).map_err(|e| AppError::DirectoryCreate {
            path: dir_path.to_path_buf(),
            details: e.to_string(),
        })?;
    } else if !dir_path.is_dir() {
        return Err(AppError::DirectoryCreate {
            path: dir_path.to_path_buf(),
            details: "path exists but is not a directory".to_string(),
        });
    }
    Ok(())
}

/// Copy a file carrying metadata over where the platform supports it:
/// permissions via `fs::copy`, modification time best-effort.
pub fn copy_with_metadata(src: &Path, dst: &Path) -> Result<u64, std::io::Error> {
    let bytes = fs::copy(src, dst)?;
    if let Ok(modified) = fs::metadata(src).and_then(|m| m.modified()) {
        let carried = fs::File::options()
            .write(true)
            .open(dst)
            .and_then(|f| f.set_modified(modified));
        if let Err(e) = carried {
            debug!("Could not carry mtime from '{}' to '{}': {}", src.display(), dst.display(), e);
        }
    }
    Ok(bytes)
}
