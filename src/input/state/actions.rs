use crate::draw::{Color, Surface, SurfaceError, render_shapes};
use crate::input::{events::Key, tool::Tool};
use crate::session::DrawingRecord;
use log::{debug, info, warn};

use super::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, Region, SurfaceController};

impl SurfaceController {
    /// Selects the tool for the next gesture.
    ///
    /// An active gesture keeps the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!("Tool changed to {tool}");
            self.tool = tool;
        }
    }

    /// Sets the pen color for the next gesture.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        debug!("Color changed to {}", color.to_hex());
    }

    /// Sets the brush size, clamped to 1-50 pixels.
    pub fn set_brush_size(&mut self, size: u32) {
        let clamped = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        if clamped != size {
            warn!(
                "Brush size {} out of range, clamping to {}-{}",
                size, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE
            );
        }
        self.brush_size = clamped;
    }

    /// Wipes the surface back to the background color.
    ///
    /// Cancels any active gesture, forgets recorded strokes, and resets
    /// [`Self::has_drawn`]. Without a surface this does nothing.
    pub fn clear(&mut self) {
        if self.surface.is_none() {
            return;
        }

        self.abort_gesture();
        self.frame.clear();
        self.has_drawn = false;

        if let Some(surface) = self.surface.as_mut() {
            match surface.fill_background() {
                Ok(()) => self.needs_redraw = true,
                Err(err) => warn!("Failed to clear surface: {err}"),
            }
        }
        info!("Surface cleared");
    }

    /// Processes a key press.
    ///
    /// Returns `true` if the key was handled.
    ///
    /// # Behavior
    /// - `Escape`: closes the toolbar overlay
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => {
                if self.toolbar.close() {
                    debug!("Toolbar closed");
                }
                true
            }
            Key::Char(_) | Key::Unknown => false,
        }
    }

    /// Replaces the drawing with a saved record.
    ///
    /// The buffer is re-created at the current region (the record's own size
    /// when no surface exists yet), filled with the record's background, and
    /// the record's strokes are replayed in order. The record background
    /// stays in effect for [`Self::clear`] until the surface is re-initialized.
    pub fn load_record(&mut self, record: &DrawingRecord) -> Result<(), SurfaceError> {
        let region = if self.surface.is_some() {
            self.region
        } else {
            Region::sized(f64::from(record.width), f64::from(record.height))
        };
        let (width, height) = region.logical_size();

        self.abort_gesture();
        let surface = Surface::new(width, height, self.device_pixel_ratio, record.background)?;
        {
            let ctx = surface.context()?;
            render_shapes(&ctx, &record.shapes);
        }

        self.surface = Some(surface);
        self.region = region;
        self.frame.shapes = record.shapes.clone();
        if !record.shapes.is_empty() {
            self.has_drawn = true;
            self.welcome.dismiss();
        }
        self.needs_redraw = true;
        info!(
            "Loaded drawing saved at {} ({} strokes)",
            record.saved_at,
            record.shapes.len()
        );
        Ok(())
    }
}
