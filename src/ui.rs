//! Overlay state surrounding the drawing surface.
//!
//! The whiteboard has two pieces of chrome that react to drawing: the
//! collapsible toolbar and a one-time welcome banner. Layout and styling
//! belong to the host; this module only tracks what should be shown.

use crate::draw::Color;
use crate::input::Tool;

/// Open/closed state of the collapsible toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    open: bool,
}

impl ToolbarState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the toolbar and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the toolbar; returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Welcome banner shown until the first stroke of the session.
///
/// Once dismissed it stays hidden, even if the surface is cleared later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeBanner {
    visible: bool,
}

impl WelcomeBanner {
    pub fn new(enabled: bool) -> Self {
        Self { visible: enabled }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn dismiss(&mut self) {
        if self.visible {
            log::debug!("Dismissing welcome banner");
        }
        self.visible = false;
    }
}

/// One-line summary of the active tool settings, e.g. `pen #ffffff 4px`.
pub fn status_text(tool: Tool, color: Color, brush_size: u32) -> String {
    format!("{tool} {} {brush_size}px", color.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    #[test]
    fn close_reports_previous_state() {
        let mut toolbar = ToolbarState::new(true);
        assert!(toolbar.close());
        assert!(!toolbar.close());
        assert!(toolbar.toggle());
    }

    #[test]
    fn welcome_stays_dismissed() {
        let mut banner = WelcomeBanner::new(true);
        assert!(banner.is_visible());
        banner.dismiss();
        assert!(!banner.is_visible());
        assert!(!WelcomeBanner::new(false).is_visible());
    }

    #[test]
    fn status_text_lists_tool_color_and_size() {
        assert_eq!(status_text(Tool::Eraser, RED, 12), "eraser #ff0000 12px");
    }
}
