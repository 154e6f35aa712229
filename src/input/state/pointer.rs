use crate::draw::{
    Shape, ShapeKind, ShapeParams, Snapshot, StrokeStyle, Surface, SurfaceError, render_outline,
    render_segment,
};
use crate::input::events::PointerEvent;
use crate::util::Point;
use log::{debug, warn};

use super::{DrawingState, SurfaceController};

impl SurfaceController {
    /// Processes a pointer-down event.
    ///
    /// # Behavior
    /// - Ignored unless the event is primary, targets the surface, and no gesture is active
    /// - Pen/eraser: starts a path at the pointer; nothing is drawn until the first move
    /// - Shape tools: captures a snapshot of the buffer for non-destructive previews
    /// - Requests pointer capture (best-effort) and marks the surface as drawn on
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        if !event.is_primary() || !event.inside_surface {
            return;
        }
        if self.is_drawing() {
            debug!("Ignoring pointer-down while a gesture is active");
            return;
        }

        let tool = self.tool;
        let style = self.stroke_style(tool);
        let start = self.region.to_logical(event.client_position());

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let snapshot = if tool.is_freehand() {
            None
        } else {
            match surface.snapshot() {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    warn!("Could not snapshot surface for {tool} preview: {err}");
                    return;
                }
            }
        };

        self.state = DrawingState::Drawing {
            tool,
            style,
            start,
            last: start,
            points: vec![start],
            snapshot,
            pointer_id: event.pointer_id,
        };

        if let Err(err) = self.capture.set_capture(event.pointer_id) {
            debug!("Pointer capture unavailable: {err}");
        }

        self.has_drawn = true;
        self.welcome.dismiss();
        debug!(
            "Started {} gesture at ({:.1}, {:.1})",
            tool, start.x, start.y
        );
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Pen/eraser: strokes the segment from the last point and commits it immediately
    /// - Shape tools: restores the snapshot, then draws the shape to the pointer
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !event.is_primary() {
            return;
        }
        let position = self.region.to_logical(event.client_position());
        self.update_gesture(position);
    }

    /// Ends the gesture on pointer release.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) {
        self.end_gesture(event);
    }

    /// Ends the gesture when the host cancels the pointer.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) {
        self.end_gesture(event);
    }

    /// Ends the gesture when the pointer leaves the surface.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) {
        self.end_gesture(event);
    }

    fn update_gesture(&mut self, position: Point) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let DrawingState::Drawing {
            tool,
            style,
            start,
            last,
            points,
            snapshot,
            ..
        } = &mut self.state
        else {
            return false;
        };

        let result = match (tool.shape_kind(), snapshot.as_ref()) {
            (None, _) => stroke_segment(surface, *last, position, style).map(|()| {
                points.push(position);
            }),
            (Some(kind), Some(snapshot)) => preview_shape(
                surface,
                snapshot,
                kind,
                *start,
                position,
                style,
                &self.settings.shape_params,
            ),
            (Some(_), None) => Ok(()),
        };

        match result {
            Ok(()) => {
                *last = position;
                self.needs_redraw = true;
                true
            }
            Err(err) => {
                warn!("Failed to draw {tool} update: {err}");
                false
            }
        }
    }

    /// Finishes the active gesture.
    ///
    /// Shapes get one final update at the terminal position, which then
    /// stays on the surface. The committed stroke is recorded in the frame.
    /// Pointer capture is released best-effort.
    fn end_gesture(&mut self, event: &PointerEvent) {
        let DrawingState::Drawing {
            tool,
            style,
            start,
            points,
            snapshot,
            pointer_id,
            ..
        } = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        if let Err(err) = self.capture.release_capture(pointer_id) {
            debug!("Pointer capture release skipped: {err}");
        }

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match tool.shape_kind() {
            Some(kind) => {
                let end = self.region.to_logical(event.client_position());
                let params = self.settings.shape_params;

                if let Some(snapshot) = snapshot.as_ref() {
                    match preview_shape(surface, snapshot, kind, start, end, &style, &params) {
                        Ok(()) => self.needs_redraw = true,
                        Err(err) => warn!("Failed to commit {tool}: {err}"),
                    }
                }

                if kind.outline(start, end, &params).is_some() {
                    self.frame.add_shape(Shape::Outline {
                        kind,
                        start,
                        end,
                        style,
                        params,
                    });
                }
            }
            None => {
                if points.len() > 1 {
                    self.frame.add_shape(Shape::Freehand { points, style });
                }
            }
        }

        debug!("Finished {tool} gesture ({} strokes recorded)", self.frame.len());
    }
}

/// Strokes one freehand segment onto the surface.
fn stroke_segment(
    surface: &Surface,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) -> Result<(), SurfaceError> {
    let ctx = surface.context()?;
    render_segment(&ctx, from, to, style)?;
    Ok(())
}

/// Restores `snapshot` and draws the shape spanned by `start` and `current`.
///
/// A degenerate shape leaves the surface exactly at the snapshot.
fn preview_shape(
    surface: &mut Surface,
    snapshot: &Snapshot,
    kind: ShapeKind,
    start: Point,
    current: Point,
    style: &StrokeStyle,
    params: &ShapeParams,
) -> Result<(), SurfaceError> {
    surface.restore(snapshot)?;

    if let Some(outline) = kind.outline(start, current, params) {
        let ctx = surface.context()?;
        render_outline(&ctx, &outline, style)?;
    }
    Ok(())
}
