use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    /// The camera failed to produce a frame. The capture loop treats this as
    /// fatal; everything else is reported and survived.
    #[error("Frame Unavailable: {0}")]
    FrameUnavailable(String),

    #[error("Failed to create directory '{}': {details}", .path.display())]
    DirectoryCreate { path: PathBuf, details: String },

    #[error("Failed to write file '{}': {details}", .path.display())]
    FileWrite { path: PathBuf, details: String },

    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("Media Processing Error: {0}")]
    Media(String),

    #[error("Surface Error: {0}")]
    Surface(String),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<opencv::Error> for AppError {
    fn from(err: opencv::Error) -> Self {
        AppError::Media(err.to_string())
    }
}
