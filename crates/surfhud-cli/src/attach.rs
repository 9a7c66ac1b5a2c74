//! Startup: offset table, target discovery and module resolution.
//!
//! Everything here runs once before the render loop. Any failure is fatal and
//! reported to the user before a window is created.

use std::path::Path;

use anyhow::{Context, Result};
use surfhud::{OffsetsCollection, load_offsets};
use tracing::info;

/// Load the offset table from `path`, or fall back to the built-in one.
pub fn resolve_offsets(path: Option<&Path>) -> Result<OffsetsCollection> {
    let offsets = match path {
        Some(path) => match load_offsets(path) {
            Ok(offsets) => offsets,
            Err(e) if e.is_not_found() => {
                anyhow::bail!("Offset file {} does not exist", path.display())
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to load offsets from {}", path.display()));
            }
        },
        None => OffsetsCollection::builtin(),
    };
    info!("Using offsets version {}", offsets.version);
    Ok(offsets)
}

#[cfg(target_os = "windows")]
pub struct Target<'a> {
    pub window_title: &'a str,
    pub module: &'a str,
    pub offsets: Option<&'a Path>,
}

/// Find the target, open it and resolve its module base.
#[cfg(target_os = "windows")]
pub fn attach(target: &Target<'_>) -> Result<surfhud::TelemetrySampler<surfhud::ProcessHandle>> {
    use surfhud::{Error, ProcessHandle, TelemetrySampler, Toolhelp};

    let offsets = resolve_offsets(target.offsets)?;

    let pid = surfhud::find_process_by_window_title(target.window_title)
        .with_context(|| format!("{} is not running", target.window_title))?;
    info!("Found {} (pid {})", target.window_title, pid);

    let process = ProcessHandle::open(pid)?;

    let module = surfhud::get_module_base(&Toolhelp, pid, target.module)?
        .ok_or_else(|| Error::ModuleNotFound(target.module.to_string()))?;
    info!("{} loaded at {:#x}", module.name(), module.address());

    Ok(TelemetrySampler::new(process, module, offsets))
}
