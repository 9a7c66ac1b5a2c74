//! Module base lookup.
//!
//! The target's loaded modules are enumerated through a point-in-time snapshot.
//! A snapshot is a scoped OS resource: it is released when the iterator is
//! dropped, whichever way the scan ends.

use tracing::debug;

use crate::error::Result;
use crate::memory::address::offset_address;

/// One entry of a module snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub base: u64,
    pub size: u32,
}

/// Resolved load address of a module. Not re-validated after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBase {
    name: String,
    address: u64,
    size: u32,
}

impl ModuleBase {
    pub fn new(name: impl Into<String>, address: u64, size: u32) -> Self {
        Self {
            name: name.into(),
            address,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Absolute address of a module-relative offset
    pub fn offset(&self, offset: u64) -> Option<u64> {
        offset_address(self.address, offset)
    }
}

impl From<ModuleEntry> for ModuleBase {
    fn from(entry: ModuleEntry) -> Self {
        Self::new(entry.name, entry.base, entry.size)
    }
}

/// Anything that can snapshot a process's module list
pub trait ModuleSource {
    /// Releases its OS resource on drop
    type Snapshot: Iterator<Item = Result<ModuleEntry>>;

    fn snapshot(&self, pid: u32) -> Result<Self::Snapshot>;
}

/// Resolve the base address of `module_name` (exact, case-sensitive match).
///
/// Returns `Ok(None)` when the enumeration ends without a match. An
/// enumeration error aborts the scan and is returned as-is.
pub fn get_module_base<S: ModuleSource>(
    source: &S,
    pid: u32,
    module_name: &str,
) -> Result<Option<ModuleBase>> {
    let snapshot = source.snapshot(pid)?;

    for entry in snapshot {
        let entry = entry?;
        if entry.name == module_name {
            debug!(
                "Resolved {} at {:#x} (size {:#x})",
                entry.name, entry.base, entry.size
            );
            return Ok(Some(entry.into()));
        }
    }

    debug!("Module {} not loaded in process {}", module_name, pid);
    Ok(None)
}

#[cfg(target_os = "windows")]
pub use toolhelp::{Toolhelp, ToolhelpSnapshot};

#[cfg(target_os = "windows")]
mod toolhelp {
    use windows::Win32::Foundation::{CloseHandle, ERROR_NO_MORE_FILES, HANDLE};
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, Module32NextW,
        TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32,
    };

    use super::{ModuleEntry, ModuleSource};
    use crate::error::{Error, Result};

    /// Module enumeration through the ToolHelp32 API
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Toolhelp;

    impl ModuleSource for Toolhelp {
        type Snapshot = ToolhelpSnapshot;

        fn snapshot(&self, pid: u32) -> Result<ToolhelpSnapshot> {
            // SAFETY: CreateToolhelp32Snapshot has no pointer arguments.
            let handle = unsafe {
                CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)
            }
            .map_err(|e| Error::ModuleEnumerationFailed {
                pid,
                message: e.message().to_string(),
            })?;

            Ok(ToolhelpSnapshot {
                handle,
                pid,
                started: false,
                finished: false,
            })
        }
    }

    /// Live snapshot handle; closed on drop
    pub struct ToolhelpSnapshot {
        handle: HANDLE,
        pid: u32,
        started: bool,
        finished: bool,
    }

    impl Iterator for ToolhelpSnapshot {
        type Item = Result<ModuleEntry>;

        fn next(&mut self) -> Option<Self::Item> {
            if self.finished {
                return None;
            }

            let mut entry = MODULEENTRY32W {
                dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
                ..Default::default()
            };

            // SAFETY: entry is a properly sized MODULEENTRY32W owned by this frame.
            let step = unsafe {
                if self.started {
                    Module32NextW(self.handle, &mut entry)
                } else {
                    Module32FirstW(self.handle, &mut entry)
                }
            };
            self.started = true;

            match step {
                Ok(()) => Some(Ok(ModuleEntry {
                    name: wide_to_string(&entry.szModule),
                    base: entry.modBaseAddr as u64,
                    size: entry.modBaseSize,
                })),
                Err(e) if e.code() == ERROR_NO_MORE_FILES.to_hresult() => {
                    self.finished = true;
                    None
                }
                Err(e) => {
                    self.finished = true;
                    Some(Err(Error::ModuleEnumerationFailed {
                        pid: self.pid,
                        message: e.message().to_string(),
                    }))
                }
            }
        }
    }

    impl Drop for ToolhelpSnapshot {
        fn drop(&mut self) {
            // SAFETY: the handle came from CreateToolhelp32Snapshot and is closed once.
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }

    fn wide_to_string(buf: &[u16]) -> String {
        let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        String::from_utf16_lossy(&buf[..len])
    }
}
