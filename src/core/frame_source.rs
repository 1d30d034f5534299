use crate::core::frame::Frame;
use crate::errors::AppError;

/// A device that yields canonical frames on demand.
///
/// `read` blocks on the loop thread; there is deliberately no buffering or
/// pipelining behind this trait. A source that cannot produce a frame
/// returns `AppError::FrameUnavailable`, which the capture loop treats as
/// the end of the feed.
pub trait FrameSource {
    fn name(&self) -> &str;

    fn read(&mut self) -> Result<Frame, AppError>;
}
