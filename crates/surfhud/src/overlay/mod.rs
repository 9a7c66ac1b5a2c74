//! On-screen overlay: drawing API, panel drag state and the Win32 surface.

mod canvas;
mod font;
mod geometry;
mod panel;
#[cfg(target_os = "windows")]
mod surface;

pub use canvas::{Canvas, OverlayHost, PumpStatus, TextStyle};
pub use font::FontCache;
pub use geometry::{Point, Rect, Rgb};
pub use panel::{
    DEFAULT_PANEL_ORIGIN, DragState, PANEL_HEIGHT, PANEL_WIDTH, PanelState, PointerEvent,
};
#[cfg(target_os = "windows")]
pub use surface::{COLOR_KEY, OverlayConfig, OverlaySurface};
