//! Configuration type definitions.

use super::enums::{ColorSpec, EraserMode};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing surface settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Color the surface is filled with on creation, resize, and clear
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Device pixel ratio used when the host does not report one (valid range: 0.5 - 4.0)
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the tool state when the whiteboard first opens. Users can change
/// these values at runtime through the toolbar.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected on startup (pen, eraser, rectangle, circle, line, triangle, diamond, arrow, star)
    #[serde(default)]
    pub default_tool: Tool,

    /// Default pen color - a named color, a hex string like "#ff0000",
    /// or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels (valid range: 1 - 50)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_color: default_color(),
            default_brush_size: default_brush_size(),
        }
    }
}

/// Eraser settings.
///
/// The eraser width is `max(min_width, size_multiplier * brush size)`.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Smallest eraser width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_min_width")]
    pub min_width: f64,

    /// Brush size multiplier (valid range: 1.0 - 10.0)
    #[serde(default = "default_eraser_multiplier")]
    pub size_multiplier: f64,

    /// Erase to transparency or repaint with the background color
    #[serde(default)]
    pub mode: EraserMode,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            min_width: default_eraser_min_width(),
            size_multiplier: default_eraser_multiplier(),
            mode: EraserMode::default(),
        }
    }
}

/// Shape appearance settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ShapeConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub arrow_length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    /// Smaller angles create narrower arrowheads, larger angles create wider ones
    #[serde(default = "default_arrow_angle")]
    pub arrow_angle: f64,

    /// Number of star tips (valid range: 3 - 12)
    #[serde(default = "default_star_points")]
    pub star_points: u32,

    /// Star inner radius as a fraction of the outer radius (valid range: 0.1 - 0.9)
    #[serde(default = "default_star_inner_ratio")]
    pub star_inner_ratio: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            arrow_length: default_arrow_length(),
            arrow_angle: default_arrow_angle(),
            star_points: default_star_points(),
            star_inner_ratio: default_star_inner_ratio(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Start with the toolbar expanded
    #[serde(default)]
    pub toolbar_open: bool,

    /// Show the welcome banner until the first stroke
    #[serde(default = "default_show_welcome")]
    pub show_welcome: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toolbar_open: false,
            show_welcome: default_show_welcome(),
        }
    }
}

/// Saved drawing storage settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory holding `drawings.json`; defaults to `~/.local/share/inkboard`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Maximum number of saved drawings; the oldest are dropped first (0 = unlimited)
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            max_records: default_max_records(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("#121212".to_string())
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_brush_size() -> u32 {
    4
}

fn default_eraser_min_width() -> f64 {
    10.0
}

fn default_eraser_multiplier() -> f64 {
    2.0
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_star_points() -> u32 {
    5
}

fn default_star_inner_ratio() -> f64 {
    0.5
}

fn default_show_welcome() -> bool {
    true
}

fn default_max_records() -> usize {
    100
}
