//! Drawing tool selection.

use crate::draw::ShapeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// Exactly one tool is active at a time. Pen and eraser commit strokes while
/// the pointer moves; shape tools preview from a snapshot and commit on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path
    #[default]
    Pen,
    /// Freehand erasing - reveals the background
    Eraser,
    Rectangle,
    Circle,
    Line,
    Triangle,
    Diamond,
    Arrow,
    Star,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 9] = [
        Tool::Pen,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Line,
        Tool::Triangle,
        Tool::Diamond,
        Tool::Arrow,
        Tool::Star,
    ];

    /// The shape drawn by this tool, or `None` for pen and eraser.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Pen | Tool::Eraser => None,
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Triangle => Some(ShapeKind::Triangle),
            Tool::Diamond => Some(ShapeKind::Diamond),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::Star => Some(ShapeKind::Star),
        }
    }

    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
            Tool::Triangle => "triangle",
            Tool::Diamond => "diamond",
            Tool::Arrow => "arrow",
            Tool::Star => "star",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == needle)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}
