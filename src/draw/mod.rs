//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used by the whiteboard:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Surface`]: the DPR-aware pixel buffer with snapshot/restore
//! - [`ShapeKind`] and [`Shape`]: shape geometry and recorded strokes
//! - [`Frame`]: container for the strokes of the current drawing
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod frame;
pub mod render;
pub mod shape;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use frame::Frame;
pub use render::{render_outline, render_segment, render_shape, render_shapes};
pub use shape::{BlendMode, Outline, Shape, ShapeKind, ShapeParams, StrokeStyle};
pub use surface::{Rgba, Snapshot, Surface, SurfaceError};
