//! Pointer capture seam.
//!
//! Hosts that can route all events of a pointer to the surface while a
//! gesture is active implement [`PointerCapture`]. The controller treats
//! capture as best-effort: failures are logged and ignored.

use thiserror::Error;

/// Errors reported by a pointer-capture backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("pointer capture is not supported by this host")]
    Unsupported,

    #[error("pointer {0} is not active")]
    InactivePointer(i32),
}

/// Routes a pointer's events to the drawing surface.
pub trait PointerCapture {
    fn set_capture(&mut self, pointer_id: i32) -> Result<(), CaptureError>;

    fn release_capture(&mut self, pointer_id: i32) -> Result<(), CaptureError>;
}

/// Capture backend for hosts without the capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn set_capture(&mut self, _pointer_id: i32) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn release_capture(&mut self, _pointer_id: i32) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }
}
