use super::{PanelState, Point, Rect, Rgb};
use crate::error::Result;

/// How a line of text is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb,
    /// Font height in pixels
    pub size: i32,
    /// Center the text on the anchor point instead of anchoring its top-left
    pub centered: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            size: 14,
            centered: false,
        }
    }
}

impl TextStyle {
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// Minimal 2D drawing API over an off-screen buffer.
///
/// Nothing drawn is visible until [`present`](Canvas::present) copies the
/// whole buffer to the window in one operation.
pub trait Canvas {
    /// Paint the whole buffer with the transparency key
    fn clear(&mut self) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    /// One-pixel outline
    fn draw_box(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}

/// Result of draining the window's event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    Continue,
    /// The window was destroyed
    Quit,
}

/// A window that can be drawn into and owns the panel's drag state
pub trait OverlayHost: Canvas {
    /// Drain pending window and pointer events without blocking
    fn pump_events(&mut self) -> Result<PumpStatus>;

    fn panel(&self) -> &PanelState;
}
