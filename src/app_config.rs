use crate::core::frame::Orientation;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Directory holding `snapshots/`, the `dataset_<N>` sessions and
    /// `common_dataset/`. Relative paths resolve against the process cwd.
    pub working_root: String,
    pub image_format: String, // e.g., "jpg", "png"
    pub jpeg_quality: Option<u8>, // JPEG quality (0-100)
    pub png_compression: Option<u8>, // PNG compression level (0-9)
    pub frame_timestamp_format: String, // strftime format string for frame filenames
    pub log_level: Option<String>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            working_root: ".".to_string(),
            image_format: "jpg".to_string(),
            jpeg_quality: Some(95),
            png_compression: Some(3),
            // millisecond epoch keeps frame names ordered at 30 Hz
            frame_timestamp_format: "%s%3f".to_string(),
            log_level: Some("info".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    pub camera_index: i32,
    /// Resize captured frames to this size before anything else sees them.
    /// Unset keeps the device's native resolution.
    pub frame_width: Option<i32>,
    pub frame_height: Option<i32>,
    pub orientation: Orientation,
    pub tick_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            camera_index: 0,
            frame_width: None,
            frame_height: None,
            orientation: Orientation::None,
            tick_interval_ms: 33, // ~30 Hz
        }
    }
}
