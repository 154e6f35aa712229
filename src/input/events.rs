//! Generic input event types for cross-backend compatibility.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key codes to these values; only the keys the
/// whiteboard reacts to are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key
    Char(char),
    /// Escape key (closes the toolbar overlay)
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Bit set in [`PointerEvent::buttons`] while the primary button is held.
pub const PRIMARY_BUTTON_MASK: u32 = 1;

/// A pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Identifier used for pointer capture
    pub pointer_id: i32,
    pub kind: PointerKind,
    /// Position relative to the client area, not the surface
    pub client_x: f64,
    pub client_y: f64,
    /// Bitmask of held buttons, when the host reports one
    pub buttons: Option<u32>,
    /// Button that changed state for this event, if any
    pub button: Option<MouseButton>,
    /// Whether the event target lies inside the drawing surface
    pub inside_surface: bool,
}

impl PointerEvent {
    /// Mouse event with an explicit button mask.
    pub fn mouse(client_x: f64, client_y: f64, buttons: u32) -> Self {
        Self {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            client_x,
            client_y,
            buttons: Some(buttons),
            button: None,
            inside_surface: true,
        }
    }

    /// Touch contact; touch input is always primary.
    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self {
            pointer_id: 2,
            kind: PointerKind::Touch,
            client_x,
            client_y,
            buttons: Some(PRIMARY_BUTTON_MASK),
            button: None,
            inside_surface: true,
        }
    }

    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pointer_id(mut self, pointer_id: i32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Replaces the button mask with a single changed button (hosts without masks).
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons = None;
        self.button = Some(button);
        self
    }

    pub fn outside_surface(mut self) -> Self {
        self.inside_surface = false;
        self
    }

    /// Returns whether this event may start or continue a gesture.
    ///
    /// Touch and pen input are always primary. Mouse input is primary only
    /// while the primary button is held; without a button mask the changed
    /// button decides.
    pub fn is_primary(&self) -> bool {
        match self.kind {
            PointerKind::Touch | PointerKind::Pen => true,
            PointerKind::Mouse => match self.buttons {
                Some(mask) => mask & PRIMARY_BUTTON_MASK == PRIMARY_BUTTON_MASK,
                None => self.button == Some(MouseButton::Left),
            },
        }
    }

    pub fn client_position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}
