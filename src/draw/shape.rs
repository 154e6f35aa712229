//! Shape geometry and recorded stroke definitions.

use super::color::Color;
use crate::util::{self, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outline shapes that are previewed from a drag between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle from the start corner to the current point
    Rectangle,
    /// Circle centered on the start point
    Circle,
    /// Straight segment
    Line,
    /// Isosceles triangle with its apex on the start row
    Triangle,
    /// Rhombus inscribed in the drag box
    Diamond,
    /// Segment with a two-barb head at the current point
    Arrow,
    /// Star centered on the start point
    Star,
}

/// Tunable parameters for the shapes that need more than two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// Arrowhead barb length in pixels
    pub arrow_length: f64,
    /// Arrowhead barb angle in degrees
    pub arrow_angle: f64,
    /// Number of star tips
    pub star_points: u32,
    /// Inner radius as a fraction of the outer radius
    pub star_inner_ratio: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            arrow_length: 20.0,
            arrow_angle: 30.0,
            star_points: 5,
            star_inner_ratio: 0.5,
        }
    }
}

/// Open or closed polyline in logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl SubPath {
    fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }
}

/// Resolved geometry of a shape, ready to be stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Rectangle with corner `(x, y)`; `w`/`h` may be negative (flipped)
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Full circle
    Circle { center: Point, radius: f64 },
    /// One or more polylines stroked together
    Paths(Vec<SubPath>),
}

impl ShapeKind {
    /// All shape kinds, in toolbar order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
        ShapeKind::Arrow,
        ShapeKind::Star,
    ];

    /// Computes the outline spanned by a drag from `start` to `current`.
    ///
    /// Returns `None` when the pointer has not moved away from `start`; such a
    /// gesture leaves the surface untouched.
    pub fn outline(self, start: Point, current: Point, params: &ShapeParams) -> Option<Outline> {
        if start == current {
            return None;
        }

        let outline = match self {
            ShapeKind::Rectangle => Outline::Rect {
                x: start.x,
                y: start.y,
                w: current.x - start.x,
                h: current.y - start.y,
            },
            ShapeKind::Circle => Outline::Circle {
                center: start,
                radius: start.distance_to(current),
            },
            ShapeKind::Line => Outline::Paths(vec![SubPath::open(vec![start, current])]),
            ShapeKind::Triangle => {
                let apex = Point::new(start.x + (current.x - start.x) / 2.0, start.y);
                Outline::Paths(vec![SubPath::closed(vec![
                    apex,
                    current,
                    Point::new(start.x, current.y),
                ])])
            }
            ShapeKind::Diamond => {
                let mid = start.midpoint(current);
                Outline::Paths(vec![SubPath::closed(vec![
                    Point::new(mid.x, start.y),
                    Point::new(current.x, mid.y),
                    Point::new(mid.x, current.y),
                    Point::new(start.x, mid.y),
                ])])
            }
            ShapeKind::Arrow => {
                let [left, right] = util::calculate_arrowhead(
                    current,
                    start,
                    params.arrow_length,
                    params.arrow_angle,
                );
                Outline::Paths(vec![
                    SubPath::open(vec![start, current]),
                    SubPath::open(vec![left, current, right]),
                ])
            }
            ShapeKind::Star => Outline::Paths(vec![SubPath::closed(util::star_vertices(
                start,
                start.distance_to(current),
                params.star_inner_ratio,
                params.star_points,
            ))]),
        };

        Some(outline)
    }
}

/// Compositing applied when a stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Paint the stroke color over existing pixels (source-over)
    Normal,
    /// Remove existing pixels under an opaque mask (destination-out)
    Erase,
    /// Repaint with the flat background color instead of removing alpha
    EraseToBackground,
}

/// Color, width, and compositing for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub blend: BlendMode,
}

/// A committed stroke recorded by the controller.
///
/// Recorded shapes let a drawing be persisted and re-rendered; the live
/// surface is painted incrementally and never re-renders from these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Pen or eraser polyline
    Freehand {
        /// Points traced by the pointer, in logical coordinates
        points: Vec<Point>,
        style: StrokeStyle,
    },
    /// Outline committed at the end of a shape gesture
    Outline {
        kind: ShapeKind,
        start: Point,
        end: Point,
        style: StrokeStyle,
        params: ShapeParams,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ShapeParams {
        ShapeParams::default()
    }

    fn closed_points(outline: Outline) -> Vec<Point> {
        match outline {
            Outline::Paths(mut paths) => {
                assert_eq!(paths.len(), 1);
                let path = paths.remove(0);
                assert!(path.closed);
                path.points
            }
            other => panic!("expected a path, got {other:?}"),
        }
    }

    #[test]
    fn rectangle_keeps_signed_extent() {
        let outline = ShapeKind::Rectangle
            .outline(Point::new(50.0, 40.0), Point::new(10.0, 10.0), &params())
            .unwrap();
        assert_eq!(
            outline,
            Outline::Rect {
                x: 50.0,
                y: 40.0,
                w: -40.0,
                h: -30.0
            }
        );
    }

    #[test]
    fn circle_radius_is_distance_to_pointer() {
        let outline = ShapeKind::Circle
            .outline(Point::new(0.0, 0.0), Point::new(3.0, 4.0), &params())
            .unwrap();
        assert_eq!(
            outline,
            Outline::Circle {
                center: Point::new(0.0, 0.0),
                radius: 5.0
            }
        );
    }

    #[test]
    fn triangle_apex_is_centered_on_start_row() {
        let points = closed_points(
            ShapeKind::Triangle
                .outline(Point::new(10.0, 10.0), Point::new(30.0, 50.0), &params())
                .unwrap(),
        );
        assert_eq!(
            points,
            vec![
                Point::new(20.0, 10.0),
                Point::new(30.0, 50.0),
                Point::new(10.0, 50.0)
            ]
        );
    }

    #[test]
    fn diamond_vertices_touch_box_midpoints() {
        let points = closed_points(
            ShapeKind::Diamond
                .outline(Point::new(0.0, 0.0), Point::new(40.0, 20.0), &params())
                .unwrap(),
        );
        assert_eq!(
            points,
            vec![
                Point::new(20.0, 0.0),
                Point::new(40.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(0.0, 10.0)
            ]
        );
    }

    #[test]
    fn arrow_has_shaft_and_head() {
        let outline = ShapeKind::Arrow
            .outline(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &params())
            .unwrap();
        let Outline::Paths(paths) = outline else {
            panic!("arrow should be made of paths");
        };
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].points[1], Point::new(100.0, 0.0));
    }

    #[test]
    fn star_uses_configured_tip_count() {
        let mut params = params();
        params.star_points = 6;
        let points = closed_points(
            ShapeKind::Star
                .outline(Point::new(0.0, 0.0), Point::new(0.0, 10.0), &params)
                .unwrap(),
        );
        assert_eq!(points.len(), 12);
    }

    #[test]
    fn stationary_drag_is_degenerate_for_every_kind() {
        let p = Point::new(7.0, 7.0);
        for kind in ShapeKind::ALL {
            assert!(kind.outline(p, p, &params()).is_none(), "{kind:?}");
        }
    }
}
