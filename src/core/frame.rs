use crate::errors::AppError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use serde::Deserialize;

/// Canonical raster: tightly packed RGB8, row-major, top-left origin.
/// Device byte orders and orientations are normalized into this at the
/// capture boundary; storage and display encode back out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Frame {
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AppError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(AppError::Media(format!(
                "Frame buffer size mismatch: {}x{} RGB8 needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Frame { width, height, data })
    }

    /// Decode boundary: device-order (BGR) bytes into the canonical layout,
    /// with the configured orientation applied.
    pub fn from_bgr8(
        width: u32,
        height: u32,
        mut data: Vec<u8>,
        orientation: Orientation,
    ) -> Result<Self, AppError> {
        swap_bgr_rgb(&mut data);
        Ok(Frame::from_rgb8(width, height, data)?.oriented(orientation))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encode boundary for BGR consumers (the display surface).
    pub fn to_bgr8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        swap_bgr_rgb(&mut out);
        out
    }

    pub fn oriented(self, orientation: Orientation) -> Frame {
        match orientation {
            Orientation::None => self,
            Orientation::Rotate90 => self.rotate90(),
            Orientation::Rotate180 => self.rotate180(),
            Orientation::Rotate270 => self.rotate90().rotate180(),
        }
    }

    // Clockwise quarter turn: (x, y) -> (h - 1 - y, x) in a h x w frame.
    fn rotate90(self) -> Frame {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = vec![0u8; self.data.len()];
        for y in 0..h {
            for x in 0..w {
                let src = (y * w + x) * 3;
                let dst = (x * h + (h - 1 - y)) * 3;
                out[dst..dst + 3].copy_from_slice(&self.data[src..src + 3]);
            }
        }
        Frame {
            width: self.height,
            height: self.width,
            data: out,
        }
    }

    fn rotate180(mut self) -> Frame {
        reverse_pixels(&mut self.data);
        self
    }
}

pub fn swap_bgr_rgb(data: &mut [u8]) {
    for px in data.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

fn reverse_pixels(data: &mut [u8]) {
    let pixels = data.len() / 3;
    for i in 0..pixels / 2 {
        let a = i * 3;
        let b = (pixels - 1 - i) * 3;
        for c in 0..3 {
            data.swap(a + c, b + c);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn parse(s: &str) -> Option<ImageFormat> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EncodeSettings {
    pub format: ImageFormat,
    pub jpeg_quality: u8,
    pub png_compression: u8,
}

/// Encode boundary for storage: canonical frame to image file bytes.
pub fn encode_frame(frame: &Frame, settings: &EncodeSettings) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    match settings.format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, settings.jpeg_quality);
            encoder
                .write_image(frame.data(), frame.width(), frame.height(), ExtendedColorType::Rgb8)
                .map_err(|e| AppError::Media(format!("JPEG encoding failed: {}", e)))?;
        }
        ImageFormat::Png => {
            let compression = match settings.png_compression {
                0..=2 => CompressionType::Fast,
                3..=6 => CompressionType::Default,
                _ => CompressionType::Best,
            };
            let encoder = PngEncoder::new_with_quality(&mut bytes, compression, FilterType::Adaptive);
            encoder
                .write_image(frame.data(), frame.width(), frame.height(), ExtendedColorType::Rgb8)
                .map_err(|e| AppError::Media(format!("PNG encoding failed: {}", e)))?;
        }
    }
    Ok(bytes)
}
