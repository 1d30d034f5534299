use crate::app_config::{ApplicationConfig, CaptureConfig};
use crate::core::frame::{EncodeSettings, ImageFormat};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MasterConfig {
    #[serde(rename = "application")]
    pub app_settings: ApplicationConfig,
    pub capture: CaptureConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let parse_start_time = Instant::now();
    let config: MasterConfig = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse YAML configuration from '{}'. 💔", path))?;
    debug!("Parsed YAML in {:?}", parse_start_time.elapsed());

    validate_master_config(&config).with_context(|| "Master configuration validation failed 👎")?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    let validation_start_time = Instant::now();

    if config.app_settings.working_root.is_empty() {
        bail!("❌ Application working_root cannot be empty.");
    }
    let root_path = Path::new(&config.app_settings.working_root);
    if root_path.exists() && !root_path.is_dir() {
        bail!("❌ Working root '{}' exists but is not a directory.", config.app_settings.working_root);
    }

    if ImageFormat::parse(&config.app_settings.image_format).is_none() {
        bail!(
            "❌ Unsupported image_format '{}'. Supported: jpg, jpeg, png.",
            config.app_settings.image_format
        );
    }
    if let Some(q) = config.app_settings.jpeg_quality {
        if q > 100 {
            bail!("❌ jpeg_quality must be within 0-100, got {}.", q);
        }
    }
    if let Some(c) = config.app_settings.png_compression {
        if c > 9 {
            bail!("❌ png_compression must be within 0-9, got {}.", c);
        }
    }
    if config.app_settings.frame_timestamp_format.is_empty() {
        bail!("❌ frame_timestamp_format cannot be empty.");
    }

    if config.capture.camera_index < 0 {
        bail!("❌ camera_index cannot be negative, got {}.", config.capture.camera_index);
    }
    if config.capture.tick_interval_ms == 0 {
        bail!("❌ tick_interval_ms must be greater than zero.");
    }
    match (config.capture.frame_width, config.capture.frame_height) {
        (Some(w), Some(h)) if w <= 0 || h <= 0 => {
            bail!("❌ frame_width/frame_height must be positive, got {}x{}.", w, h);
        }
        (Some(_), None) | (None, Some(_)) => {
            bail!("❌ frame_width and frame_height must be set together.");
        }
        _ => {}
    }

    info!("👍 Master configuration validated successfully in {:?}.", validation_start_time.elapsed());
    Ok(())
}

impl MasterConfig {
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            // validation already rejected unknown formats
            format: ImageFormat::parse(&self.app_settings.image_format).unwrap_or(ImageFormat::Jpeg),
            jpeg_quality: self.app_settings.jpeg_quality.unwrap_or(95),
            png_compression: self.app_settings.png_compression.unwrap_or(3),
        }
    }
}
