//! Gesture scripts: JSON documents that drive a [`SurfaceController`].
//!
//! A script replays a sequence of tool changes and pointer events without a
//! windowing host, which makes drawings reproducible from the command line.
//!
//! ```json
//! {
//!   "width": 200, "height": 120,
//!   "steps": [
//!     {"tool": "rectangle"}, {"color": "#ff0000"},
//!     {"down": [10, 10]}, {"move": [60, 40]}, {"up": [60, 40]}
//!   ]
//! }
//! ```

use crate::config::ColorSpec;
use crate::input::{Key, PointerEvent, PointerKind, Region, SurfaceController, Tool};
use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A parsed gesture script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Logical surface width
    pub width: f64,
    /// Logical surface height
    pub height: f64,
    /// Overrides the configured device pixel ratio
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Tool(Tool),
    Color(ColorSpec),
    Brush(u32),
    Down(PointerInput),
    Move(PointerInput),
    Up(PointerInput),
    Cancel(PointerInput),
    Leave(PointerInput),
    Clear,
    Resize([f64; 2]),
    Key(String),
}

/// Pointer position, optionally with device details.
///
/// The short `[x, y]` form is a mouse event whose button mask follows the
/// step: held for `down`/`move`, released otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointerInput {
    Position([f64; 2]),
    Detailed {
        x: f64,
        y: f64,
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        buttons: Option<u32>,
    },
}

impl PointerInput {
    fn to_event(self, button_held: bool) -> PointerEvent {
        let default_buttons = u32::from(button_held);
        match self {
            PointerInput::Position([x, y]) => PointerEvent::mouse(x, y, default_buttons),
            PointerInput::Detailed {
                x,
                y,
                pointer,
                buttons,
            } => match pointer {
                PointerKind::Touch => PointerEvent::touch(x, y),
                kind => PointerEvent::mouse(x, y, buttons.unwrap_or(default_buttons))
                    .with_kind(kind),
            },
        }
    }
}

impl Script {
    /// Parses a script from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(input).context("invalid gesture script")?;
        if !(script.width.is_finite() && script.height.is_finite())
            || script.width < 1.0
            || script.height < 1.0
        {
            bail!(
                "script surface size {}x{} must be at least 1x1",
                script.width,
                script.height
            );
        }
        Ok(script)
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&input).with_context(|| format!("failed to load {}", path.display()))
    }

    /// Creates the controller surface and feeds every step to it.
    ///
    /// `default_ratio` applies when the script does not set its own
    /// device pixel ratio.
    pub fn run(&self, controller: &mut SurfaceController, default_ratio: f64) -> Result<()> {
        let ratio = self.device_pixel_ratio.unwrap_or(default_ratio);
        controller
            .init_surface(Region::sized(self.width, self.height), ratio)
            .context("failed to create drawing surface")?;

        for (index, step) in self.steps.iter().enumerate() {
            apply_step(controller, step).with_context(|| format!("script step {index} failed"))?;
        }

        debug!("Script finished after {} steps", self.steps.len());
        Ok(())
    }
}

fn apply_step(controller: &mut SurfaceController, step: &Step) -> Result<()> {
    match step {
        Step::Tool(tool) => controller.set_tool(*tool),
        Step::Color(spec) => {
            let color = spec
                .try_to_color()
                .ok_or_else(|| anyhow!("unknown color {spec:?}"))?;
            controller.set_color(color);
        }
        Step::Brush(size) => controller.set_brush_size(*size),
        Step::Down(input) => controller.on_pointer_down(&input.to_event(true)),
        Step::Move(input) => controller.on_pointer_move(&input.to_event(true)),
        Step::Up(input) => controller.on_pointer_up(&input.to_event(false)),
        Step::Cancel(input) => controller.on_pointer_cancel(&input.to_event(false)),
        Step::Leave(input) => controller.on_pointer_leave(&input.to_event(false)),
        Step::Clear => controller.clear(),
        Step::Resize([width, height]) => {
            let current = controller.region();
            controller.resize(Region::new(current.left, current.top, *width, *height))?;
        }
        Step::Key(name) => {
            controller.on_key_press(parse_key(name));
        }
    }
    Ok(())
}

fn parse_key(name: &str) -> Key {
    if name.eq_ignore_ascii_case("escape") || name.eq_ignore_ascii_case("esc") {
        return Key::Escape;
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Key::Char(c),
        _ => Key::Unknown,
    }
}
