//! Prelude module for convenient imports
//!
//! ```ignore
//! use surfhud::prelude::*;
//! ```
//!
//! Brings in the reader trait, the sampler, the render loop and the error type.

pub use crate::error::{Error, Result};
pub use crate::memory::{ModuleBase, ProcessHandle, ReadMemory, get_module_base};
pub use crate::offset::OffsetsCollection;
pub use crate::overlay::{Canvas, OverlayHost, PanelState, Point, PumpStatus};
pub use crate::render::{Compositor, FramePacer, LoopExit, RunSummary};
pub use crate::telemetry::{Sample, Snapshot, TelemetrySampler, Vec3};

#[cfg(target_os = "windows")]
pub use crate::memory::Toolhelp;
#[cfg(target_os = "windows")]
pub use crate::overlay::{OverlayConfig, OverlaySurface};
