//! Utility functions for points, colors, and shape geometry.
//!
//! This module provides:
//! - The logical-space [`Point`] type shared by input and rendering
//! - Arrowhead and star vertex calculations
//! - Color name lookup for configuration and scripts

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

// ============================================================================
// Points
// ============================================================================

/// A position in logical (CSS pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates arrowhead barb endpoints with custom length and angle.
///
/// The head sits at `tip` and opens back towards `tail`. The barb length is
/// capped at 30% of the shaft so short arrows stay readable.
///
/// # Returns
/// Array of two points `[left, right]` for the barb lines.
/// If the shaft is shorter than 1 pixel, both points equal `tip`.
pub fn calculate_arrowhead(tip: Point, tail: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = tip.x - tail.x;
    let dy = tip.y - tail.y;
    let line_length = dx.hypot(dy);

    if line_length < 1.0 {
        return [tip, tip];
    }

    // Unit vector along the shaft, pointing at the tip
    let ux = dx / line_length;
    let uy = dy / line_length;

    let arrow_length = length.min(line_length * 0.3);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left = Point::new(
        tip.x - arrow_length * (ux * cos_a - uy * sin_a),
        tip.y - arrow_length * (uy * cos_a + ux * sin_a),
    );
    let right = Point::new(
        tip.x - arrow_length * (ux * cos_a + uy * sin_a),
        tip.y - arrow_length * (uy * cos_a - ux * sin_a),
    );

    [left, right]
}

// ============================================================================
// Star Geometry
// ============================================================================

/// Vertices of a star polygon alternating between outer and inner radius.
///
/// The first tip points straight up from `center`. Returns `2 * tips`
/// vertices; fewer than 3 tips is treated as 3.
pub fn star_vertices(center: Point, outer_radius: f64, inner_ratio: f64, tips: u32) -> Vec<Point> {
    let tips = tips.max(3);
    let inner_radius = outer_radius * inner_ratio;
    let step = PI / f64::from(tips);

    (0..tips * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = -FRAC_PI_2 + step * f64::from(i);
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color names or hex strings to Color values.
///
/// Used by the configuration system and gesture scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "white", "black"
/// - anything [`Color::from_hex`] accepts, e.g. "#ff8800"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        other => Color::from_hex(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrowhead_barbs_sit_behind_the_tip() {
        let tip = Point::new(100.0, 0.0);
        let tail = Point::new(0.0, 0.0);
        let [left, right] = calculate_arrowhead(tip, tail, 20.0, 30.0);

        assert!(left.x < tip.x && right.x < tip.x);
        assert!((left.y + right.y).abs() < 1e-9, "barbs mirror around the shaft");
        assert!((tip.distance_to(left) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_is_capped_on_short_shafts() {
        let tip = Point::new(10.0, 0.0);
        let [left, _] = calculate_arrowhead(tip, Point::new(0.0, 0.0), 20.0, 30.0);
        assert!((tip.distance_to(left) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_degenerates_to_tip() {
        let tip = Point::new(5.0, 5.0);
        assert_eq!(calculate_arrowhead(tip, tip, 20.0, 30.0), [tip, tip]);
    }

    #[test]
    fn star_starts_at_top_and_alternates_radius() {
        let center = Point::new(50.0, 50.0);
        let vertices = star_vertices(center, 20.0, 0.5, 5);
        assert_eq!(vertices.len(), 10);
        assert!((vertices[0].x - 50.0).abs() < 1e-9);
        assert!((vertices[0].y - 30.0).abs() < 1e-9);
        assert!((center.distance_to(vertices[1]) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn name_lookup_accepts_hex() {
        assert_eq!(name_to_color("Red"), Some(RED));
        assert_eq!(name_to_color("#ffffff"), Some(WHITE));
        assert_eq!(name_to_color("mauve"), None);
    }
}
