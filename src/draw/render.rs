//! Cairo-based rendering functions for strokes and shapes.

use super::shape::{BlendMode, Outline, Shape, StrokeStyle};
use super::color::ERASE_MASK;
use crate::util::Point;
use std::f64::consts::PI;

/// Configures compositing, source, and pen geometry for a stroke.
///
/// Erasing uses `DEST_OUT` with an opaque mask so it only ever lowers alpha;
/// every other mode paints with `OVER`. Lines use round caps and joins so
/// incrementally stroked segments join into one continuous path.
pub fn apply_stroke_style(ctx: &cairo::Context, style: &StrokeStyle) {
    match style.blend {
        BlendMode::Normal | BlendMode::EraseToBackground => {
            ctx.set_operator(cairo::Operator::Over);
            style.color.apply_source(ctx);
        }
        BlendMode::Erase => {
            ctx.set_operator(cairo::Operator::DestOut);
            ERASE_MASK.apply_source(ctx);
        }
    }

    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

/// Strokes one freehand segment.
pub fn render_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) -> Result<(), cairo::Error> {
    apply_stroke_style(ctx, style);
    ctx.new_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

/// Render freehand stroke (polyline through points)
///
/// Each segment is stroked on its own, the same way the live pen commits
/// them, so a replayed stroke composites identically at every joint. A single
/// point produces nothing, matching a pointer press without movement.
pub fn render_freehand(
    ctx: &cairo::Context,
    points: &[Point],
    style: &StrokeStyle,
) -> Result<(), cairo::Error> {
    for pair in points.windows(2) {
        render_segment(ctx, pair[0], pair[1], style)?;
    }
    Ok(())
}

/// Strokes a resolved shape outline.
pub fn render_outline(
    ctx: &cairo::Context,
    outline: &Outline,
    style: &StrokeStyle,
) -> Result<(), cairo::Error> {
    apply_stroke_style(ctx, style);
    ctx.new_path();

    match outline {
        Outline::Rect { x, y, w, h } => {
            ctx.rectangle(*x, *y, *w, *h);
        }
        Outline::Circle { center, radius } => {
            ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
        }
        Outline::Paths(paths) => {
            for path in paths {
                let Some((first, rest)) = path.points.split_first() else {
                    continue;
                };
                ctx.move_to(first.x, first.y);
                for point in rest {
                    ctx.line_to(point.x, point.y);
                }
                if path.closed {
                    ctx.close_path();
                }
            }
        }
    }

    ctx.stroke()
}

/// Renders a single recorded stroke.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) -> Result<(), cairo::Error> {
    match shape {
        Shape::Freehand { points, style } => render_freehand(ctx, points, style),
        Shape::Outline {
            kind,
            start,
            end,
            style,
            params,
        } => match kind.outline(*start, *end, params) {
            Some(outline) => render_outline(ctx, &outline, style),
            None => Ok(()),
        },
    }
}

/// Renders all recorded strokes in order (first shape = bottom layer).
///
/// A stroke that fails to render is logged and skipped.
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        if let Err(err) = render_shape(ctx, shape) {
            log::warn!("Failed to render recorded stroke: {err}");
        }
    }
    ctx.set_operator(cairo::Operator::Over);
}
