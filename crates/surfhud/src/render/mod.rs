//! Fixed-rate render loop and HUD layout.

mod compositor;
mod hud;
mod pacing;

#[cfg(test)]
pub(crate) mod testing;

pub use compositor::{Compositor, LoopExit, RunSummary};
pub use hud::{TITLE_BAR_HEIGHT, draw_panel, format_coords, format_speed, format_velocity};
pub use pacing::{DEFAULT_RATE_HZ, FramePacer};
