//! # surfhud
//!
//! Core library for the surf telemetry overlay.
//!
//! This crate provides:
//! - Guarded reads of typed values from another process's memory
//! - Module base resolution for offset-relative addressing
//! - Per-tick telemetry sampling (position, velocity, speed)
//! - A color-keyed, click-through overlay window with a draggable panel
//! - The fixed-rate render loop that ties them together
//!
//! The Win32 pieces (process handle, module snapshot, overlay window) are only
//! functional on Windows; elsewhere they report [`Error::Unsupported`].

pub mod error;
pub mod memory;
pub mod offset;
pub mod overlay;
pub mod prelude;
pub mod render;
pub mod telemetry;

pub use error::{Error, Result};
pub use memory::{
    MAX_USER_ADDRESS, MIN_USER_ADDRESS, ModuleBase, ModuleEntry, ModuleSource, ProcessHandle,
    ReadMemory, find_process_by_window_title, get_module_base, is_plausible_address,
};
pub use offset::{OffsetsCollection, load_offsets, save_offsets};
pub use overlay::{
    Canvas, DragState, FontCache, OverlayHost, PanelState, Point, PointerEvent, PumpStatus, Rect,
    Rgb, TextStyle,
};
pub use render::{Compositor, DEFAULT_RATE_HZ, FramePacer, LoopExit, RunSummary, draw_panel};
pub use telemetry::{Sample, Snapshot, TelemetrySampler, Vec3};

#[cfg(target_os = "windows")]
pub use memory::Toolhelp;
#[cfg(target_os = "windows")]
pub use overlay::{OverlayConfig, OverlaySurface};
