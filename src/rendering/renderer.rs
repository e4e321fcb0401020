//! FrameRenderer trait: the seam between playback and whatever draws frames.
//!
//! The playback controller forwards every emitted frame through this trait, so
//! the terminal backend and test recorders are interchangeable.

use crate::playback::Frame;
use thiserror::Error;

/// Errors that can occur during renderer operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RendererError {
    /// Failed to render a frame
    #[error("Frame rendering failed: {0}")]
    RenderFailed(String),
    /// Failed to clear display
    #[error("Clear operation failed: {0}")]
    ClearFailed(String),
    /// Invalid arguments provided
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Checks the pivot lies inside the frame text.
pub fn validate_frame(frame: &Frame) -> Result<(), RendererError> {
    let len = frame.text.chars().count();
    if frame.pivot_index >= len {
        return Err(RendererError::InvalidArguments(format!(
            "pivot_index {} out of bounds for word '{}' (length: {})",
            frame.pivot_index, frame.text, len
        )));
    }
    Ok(())
}

/// Receives frames from the playback controller.
///
/// Calls are synchronous and expected to return quickly; heavy drawing belongs
/// in the UI redraw, not here.
pub trait FrameRenderer {
    /// Show one frame with its pivot highlighted
    ///
    /// # Errors
    /// Returns `RendererError::InvalidArguments` if the pivot is out of bounds.
    fn render(&mut self, frame: &Frame) -> Result<(), RendererError>;

    /// Remove whatever is currently shown
    fn clear(&mut self) -> Result<(), RendererError>;
}

impl<R: FrameRenderer + ?Sized> FrameRenderer for Box<R> {
    fn render(&mut self, frame: &Frame) -> Result<(), RendererError> {
        (**self).render(frame)
    }

    fn clear(&mut self) -> Result<(), RendererError> {
        (**self).clear()
    }
}
