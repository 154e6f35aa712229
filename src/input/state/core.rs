//! Drawing state machine and controller state management.

use crate::config::{Config, EraserMode};
use crate::draw::{
    BlendMode, Color, Frame, ShapeParams, Snapshot, StrokeStyle, Surface, SurfaceError,
    color::{BACKGROUND, ERASE_MASK, WHITE},
    surface::sanitize_scale,
};
use crate::input::capture::{NoCapture, PointerCapture};
use crate::input::tool::Tool;
use crate::ui::{ToolbarState, WelcomeBanner};
use crate::util::Point;

/// Smallest brush size in pixels.
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest brush size in pixels.
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Display region the surface occupies, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Region anchored at the client origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Converts a client position to the surface's logical space.
    pub fn to_logical(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Integer logical size (fractional CSS pixels are dropped).
    pub fn logical_size(&self) -> (u32, u32) {
        let floor = |v: f64| v.max(0.0).floor().min(f64::from(u32::MAX)) as u32;
        (floor(self.width), floor(self.height))
    }
}

/// Settings the controller is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub background: Color,
    pub tool: Tool,
    pub color: Color,
    pub brush_size: u32,
    pub eraser_min_width: f64,
    pub eraser_multiplier: f64,
    pub eraser_mode: EraserMode,
    pub shape_params: ShapeParams,
    pub toolbar_open: bool,
    pub show_welcome: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            tool: Tool::Pen,
            color: WHITE,
            brush_size: 4,
            eraser_min_width: 10.0,
            eraser_multiplier: 2.0,
            eraser_mode: EraserMode::Transparent,
            shape_params: ShapeParams::default(),
            toolbar_open: false,
            show_welcome: true,
        }
    }
}

impl ControllerSettings {
    /// Builds controller settings from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            background: config.canvas.background_color.to_color_or(BACKGROUND),
            tool: config.drawing.default_tool,
            color: config.drawing.default_color.to_color(),
            brush_size: config.drawing.default_brush_size,
            eraser_min_width: config.eraser.min_width,
            eraser_multiplier: config.eraser.size_multiplier,
            eraser_mode: config.eraser.mode,
            shape_params: ShapeParams {
                arrow_length: config.shapes.arrow_length,
                arrow_angle: config.shapes.arrow_angle,
                star_points: config.shapes.star_points,
                star_inner_ratio: config.shapes.star_inner_ratio,
            },
            toolbar_open: config.ui.toolbar_open,
            show_welcome: config.ui.show_welcome,
        }
    }
}

/// Current gesture state machine.
///
/// At most one gesture is active per surface. The snapshot of a shape
/// gesture lives and dies with the `Drawing` state.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a primary pointer-down
    Idle,
    /// A gesture is in progress
    Drawing {
        /// Tool the gesture started with (later tool changes do not affect it)
        tool: Tool,
        /// Style resolved at gesture start
        style: StrokeStyle,
        /// Logical position of the pointer-down
        start: Point,
        /// Last logical position seen
        last: Point,
        /// Freehand path so far (start point included)
        points: Vec<Point>,
        /// Buffer copy taken at start for shape tools
        snapshot: Option<Snapshot>,
        /// Pointer whose capture was requested
        pointer_id: i32,
    },
}

/// The drawing surface controller.
///
/// Owns the pixel buffer, translates pointer events into strokes or shape
/// previews, and exposes the tool state the surrounding UI reflects.
pub struct SurfaceController {
    pub(super) surface: Option<Surface>,
    pub(super) region: Region,
    pub(super) device_pixel_ratio: f64,
    pub(super) settings: ControllerSettings,
    pub(super) tool: Tool,
    pub(super) color: Color,
    pub(super) brush_size: u32,
    pub(super) has_drawn: bool,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Strokes committed since the last clear or resize
    pub(super) frame: Frame,
    pub(super) capture: Box<dyn PointerCapture>,
    /// Collapsible toolbar state
    pub toolbar: ToolbarState,
    /// One-time welcome banner
    pub welcome: WelcomeBanner,
    /// Whether the surface changed since the host last presented it
    pub needs_redraw: bool,
}

impl SurfaceController {
    /// Creates a controller without a surface.
    ///
    /// Every drawing operation is a no-op until [`Self::init_surface`] succeeds.
    pub fn new(settings: ControllerSettings) -> Self {
        let brush_size = settings.brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        Self {
            surface: None,
            region: Region::default(),
            device_pixel_ratio: 1.0,
            tool: settings.tool,
            color: settings.color,
            brush_size,
            has_drawn: false,
            state: DrawingState::Idle,
            frame: Frame::new(),
            capture: Box::new(NoCapture),
            toolbar: ToolbarState::new(settings.toolbar_open),
            welcome: WelcomeBanner::new(settings.show_welcome),
            needs_redraw: false,
            settings,
        }
    }

    /// Installs a pointer-capture backend.
    pub fn with_pointer_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// (Re)creates the surface for `region` at the given device pixel ratio.
    ///
    /// The logical size is the integer part of the region size; the physical
    /// buffer is `logical * ratio`. Prior pixels, recorded strokes, and any
    /// active gesture are discarded.
    pub fn init_surface(
        &mut self,
        region: Region,
        device_pixel_ratio: f64,
    ) -> Result<(), SurfaceError> {
        let device_pixel_ratio = sanitize_scale(device_pixel_ratio);
        let (width, height) = region.logical_size();

        self.abort_gesture();
        self.surface = None;
        self.frame.clear();

        let surface = Surface::new(width, height, device_pixel_ratio, self.settings.background)?;
        log::debug!(
            "Surface initialized at {}x{} (ratio {})",
            width,
            height,
            device_pixel_ratio
        );

        self.surface = Some(surface);
        self.region = region;
        self.device_pixel_ratio = device_pixel_ratio;
        self.needs_redraw = true;
        Ok(())
    }

    /// Re-initializes the surface after a viewport resize, keeping the ratio.
    ///
    /// Existing drawing content is discarded.
    pub fn resize(&mut self, region: Region) -> Result<(), SurfaceError> {
        self.init_surface(region, self.device_pixel_ratio)
    }

    /// Updates the device pixel ratio and re-initializes the surface.
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) -> Result<(), SurfaceError> {
        self.init_surface(self.region, device_pixel_ratio)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Strokes committed since the last clear or resize.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Whether anything has been drawn since the last clear.
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Resolves the stroke style `tool` would use with the current settings.
    ///
    /// The eraser is `max(min_width, multiplier * brush)` wide and never
    /// paints the selected color.
    pub fn stroke_style(&self, tool: Tool) -> StrokeStyle {
        let brush = f64::from(self.brush_size);

        if tool == Tool::Eraser {
            let width = self
                .settings
                .eraser_min_width
                .max(self.settings.eraser_multiplier * brush);
            match self.settings.eraser_mode {
                EraserMode::Transparent => StrokeStyle {
                    color: ERASE_MASK,
                    width,
                    blend: BlendMode::Erase,
                },
                EraserMode::Background => StrokeStyle {
                    color: self.settings.background,
                    width,
                    blend: BlendMode::EraseToBackground,
                },
            }
        } else {
            StrokeStyle {
                color: self.color,
                width: brush,
                blend: BlendMode::Normal,
            }
        }
    }

    /// Drops any active gesture without committing it.
    pub(super) fn abort_gesture(&mut self) {
        if let DrawingState::Drawing { pointer_id, .. } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        {
            log::debug!("Aborting active gesture");
            if let Err(err) = self.capture.release_capture(pointer_id) {
                log::debug!("Pointer capture release skipped: {err}");
            }
        }
    }
}
