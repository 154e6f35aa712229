//! Input handling and gesture state machine.
//!
//! This module translates host pointer and keyboard events into drawing
//! operations. It owns the current tool state (tool, color, brush size) and
//! the gesture state machine that turns pointer sequences into strokes and
//! shape previews on the surface.

pub mod capture;
pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use capture::{CaptureError, NoCapture, PointerCapture};
pub use events::{Key, MouseButton, PointerEvent, PointerKind};
pub use state::{ControllerSettings, DrawingState, Region, SurfaceController};
pub use tool::Tool;
