//! Frame container for the strokes of the current drawing.

use super::shape::Shape;
use serde::{Deserialize, Serialize};

/// Container for all strokes committed since the surface was last cleared.
///
/// Strokes are kept in draw order (first = bottom layer, last = top layer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Removes all strokes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Appends a stroke on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
