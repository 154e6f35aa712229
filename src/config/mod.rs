//! Configuration file support for inkboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkboard/config.toml`. Settings include the surface background,
//! drawing defaults, eraser behaviour, shape appearance, UI preferences, and storage.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, EraserMode};
pub use types::{CanvasConfig, DrawingConfig, EraserConfig, ShapeConfig, StorageConfig, UiConfig};

use crate::input::state::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// background_color = "#121212"
/// device_pixel_ratio = 2.0
///
/// [drawing]
/// default_tool = "pen"
/// default_color = "#ffffff"
/// default_brush_size = 4
///
/// [eraser]
/// min_width = 10.0
/// size_multiplier = 2.0
/// mode = "transparent"
///
/// [shapes]
/// arrow_length = 20.0
/// arrow_angle = 30.0
///
/// [ui]
/// toolbar_open = false
/// show_welcome = true
///
/// [storage]
/// max_records = 100
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing surface settings (background, device pixel ratio)
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Drawing tool defaults (tool, color, brush size)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Eraser width and compositing
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Arrow and star appearance
    #[serde(default)]
    pub shapes: ShapeConfig,

    /// Toolbar and welcome banner
    #[serde(default)]
    pub ui: UiConfig,

    /// Saved drawing storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `device_pixel_ratio`: 0.5 - 4.0
    /// - `default_brush_size`: 1 - 50
    /// - `eraser.min_width`: 1.0 - 200.0
    /// - `eraser.size_multiplier`: 1.0 - 10.0
    /// - `shapes.arrow_length`: 5.0 - 50.0
    /// - `shapes.arrow_angle`: 15.0 - 60.0
    /// - `shapes.star_points`: 3 - 12
    /// - `shapes.star_inner_ratio`: 0.1 - 0.9
    fn validate_and_clamp(&mut self) {
        if !self.canvas.device_pixel_ratio.is_finite() {
            warn!("Invalid device_pixel_ratio, falling back to 1.0");
            self.canvas.device_pixel_ratio = 1.0;
        }
        if !(0.5..=4.0).contains(&self.canvas.device_pixel_ratio) {
            warn!(
                "Invalid device_pixel_ratio {:.2}, clamping to 0.5-4.0 range",
                self.canvas.device_pixel_ratio
            );
            self.canvas.device_pixel_ratio = self.canvas.device_pixel_ratio.clamp(0.5, 4.0);
        }

        if self.canvas.background_color.try_to_color().is_none() {
            warn!(
                "Invalid background_color {:?}, falling back to '#121212'",
                self.canvas.background_color
            );
            self.canvas.background_color = ColorSpec::from("#121212");
        }

        if self.drawing.default_color.try_to_color().is_none() {
            warn!(
                "Invalid default_color {:?}, falling back to '#ffffff'",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::from("#ffffff");
        }

        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.drawing.default_brush_size) {
            warn!(
                "Invalid default_brush_size {}, clamping to {}-{} range",
                self.drawing.default_brush_size, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE
            );
            self.drawing.default_brush_size = self
                .drawing
                .default_brush_size
                .clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        }

        clamp_f64("eraser.min_width", &mut self.eraser.min_width, 1.0, 200.0);
        clamp_f64(
            "eraser.size_multiplier",
            &mut self.eraser.size_multiplier,
            1.0,
            10.0,
        );
        clamp_f64("shapes.arrow_length", &mut self.shapes.arrow_length, 5.0, 50.0);
        clamp_f64("shapes.arrow_angle", &mut self.shapes.arrow_angle, 15.0, 60.0);
        clamp_f64(
            "shapes.star_inner_ratio",
            &mut self.shapes.star_inner_ratio,
            0.1,
            0.9,
        );

        if !(3..=12).contains(&self.shapes.star_points) {
            warn!(
                "Invalid star_points {}, clamping to 3-12 range",
                self.shapes.star_points
            );
            self.shapes.star_points = self.shapes.star_points.clamp(3, 12);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(input: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(input)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Saves the current configuration to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !value.is_finite() {
        warn!("Invalid {name}, falling back to {min:.1}");
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.2}, clamping to {min:.1}-{max:.1} range");
        *value = value.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BACKGROUND, RED, WHITE};
    use crate::input::Tool;
    use tempfile::TempDir;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.drawing.default_tool, Tool::Pen);
        assert_eq!(config.drawing.default_brush_size, 4);
        assert_eq!(config.drawing.default_color.to_color(), WHITE);
        assert_eq!(config.canvas.background_color.to_color(), BACKGROUND);
        assert_eq!(config.eraser.mode, EraserMode::Transparent);
        assert!(config.ui.show_welcome);
        assert!(!config.ui.toolbar_open);
    }

    #[test]
    fn parses_all_color_forms() {
        let config = Config::from_toml(
            r##"
            [canvas]
            background_color = [255, 0, 0]

            [drawing]
            default_color = "#ff0000"
            default_tool = "diamond"
            "##,
        )
        .unwrap();
        assert_eq!(config.canvas.background_color.to_color(), RED);
        assert_eq!(config.drawing.default_color.to_color(), RED);
        assert_eq!(config.drawing.default_tool, Tool::Diamond);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [canvas]
            device_pixel_ratio = 9.0

            [drawing]
            default_brush_size = 0

            [shapes]
            arrow_angle = 90.0
            star_points = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.canvas.device_pixel_ratio, 4.0);
        assert_eq!(config.drawing.default_brush_size, MIN_BRUSH_SIZE);
        assert_eq!(config.shapes.arrow_angle, 60.0);
        assert_eq!(config.shapes.star_points, 12);
    }

    #[test]
    fn unknown_color_falls_back() {
        let config = Config::from_toml(
            r#"
            [drawing]
            default_color = "mauve"
            "#,
        )
        .unwrap();
        assert_eq!(config.drawing.default_color.to_color(), WHITE);
    }

    #[test]
    fn unknown_tool_is_a_parse_error() {
        assert!(Config::from_toml("[drawing]\ndefault_tool = \"lasso\"\n").is_err());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.default_brush_size = 12;
        config.eraser.mode = EraserMode::Background;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing.default_brush_size, 12);
        assert_eq!(loaded.eraser.mode, EraserMode::Background);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage.max_records, 100);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("eraser"));
        assert!(schema.contains("default_brush_size"));
    }
}
