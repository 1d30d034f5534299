use crate::app_config::CaptureConfig;
use crate::core::frame::{Frame, Orientation};
use crate::core::frame_source::FrameSource;
use crate::errors::AppError;
use log::{debug, info};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::{imgproc, videoio};
use std::time::Instant;

/// Local camera device behind the FrameSource boundary. Reads BGR `Mat`s
/// from OpenCV and hands out canonical frames, applying the configured
/// resize and orientation on the way in.
pub struct OpenCvFrameSource {
    name: String,
    capture: videoio::VideoCapture,
    target_size: Option<(i32, i32)>,
    orientation: Orientation,
}

impl OpenCvFrameSource {
    pub fn open(camera_index: i32, capture_config: &CaptureConfig) -> Result<Self, AppError> {
        debug!("📹 Opening camera with index {}...", camera_index);
        let open_start = Instant::now();

        let capture = videoio::VideoCapture::new(camera_index, videoio::CAP_ANY)?;
        if !videoio::VideoCapture::is_opened(&capture)? {
            return Err(AppError::Media(format!(
                "Could not open camera with index {}. Check device availability.",
                camera_index
            )));
        }
        info!("👍 Camera {} opened in {:?}.", camera_index, open_start.elapsed());

        let target_size = match (capture_config.frame_width, capture_config.frame_height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        };

        Ok(OpenCvFrameSource {
            name: format!("camera-{}", camera_index),
            capture,
            target_size,
            orientation: capture_config.orientation,
        })
    }
}

impl FrameSource for OpenCvFrameSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<Frame, AppError> {
        let mut mat = Mat::default();
        let grabbed = self
            .capture
            .read(&mut mat)
            .map_err(|e| AppError::FrameUnavailable(format!("read failed on '{}': {}", self.name, e)))?;
        if !grabbed || mat.empty() {
            return Err(AppError::FrameUnavailable(format!(
                "'{}' produced no frame",
                self.name
            )));
        }

        if let Some((w, h)) = self.target_size {
            let mut resized = Mat::default();
            imgproc::resize(&mat, &mut resized, Size::new(w, h), 0.0, 0.0, imgproc::INTER_LINEAR)?;
            mat = resized;
        }

        if !mat.is_continuous() {
            mat = mat.try_clone()?;
        }

        let size = mat.size()?;
        let data = mat.data_bytes()?.to_vec();
        Frame::from_bgr8(size.width as u32, size.height as u32, data, self.orientation)
    }
}
