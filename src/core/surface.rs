use crate::core::frame::Frame;
use crate::errors::AppError;

/// Operator commands the surface can emit. The loop only ever learns which
/// region was activated, never raw pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRecord,
    Snapshot,
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Command(Command),
    Quit,
}

/// The render/input collaborator: shows the current frame plus the three
/// labeled regions, and reports activations and quit requests.
pub trait Surface {
    fn present(&mut self, frame: &Frame, recording: bool) -> Result<(), AppError>;

    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>, AppError>;
}
