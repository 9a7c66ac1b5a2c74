//! Target discovery and the read handle.
//!
//! Discovery is a thin wrapper over the window manager: the target is found by
//! its top-level window title and its owning process is opened for reading.

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

#[cfg(target_os = "windows")]
use windows::Win32::Foundation::HANDLE;

/// Find the process owning the top-level window titled `title`.
#[cfg(target_os = "windows")]
pub fn find_process_by_window_title(title: &str) -> Result<u32> {
    use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, GetWindowThreadProcessId};
    use windows::core::{HSTRING, PCWSTR};

    // SAFETY: FindWindowW only reads the two string arguments.
    let hwnd = unsafe { FindWindowW(PCWSTR::null(), &HSTRING::from(title)) }
        .map_err(|_| Error::WindowNotFound(title.to_string()))?;
    if hwnd.is_invalid() {
        return Err(Error::WindowNotFound(title.to_string()));
    }

    let mut pid: u32 = 0;
    // SAFETY: hwnd was just returned by FindWindowW and pid outlives the call.
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32)) };
    if pid == 0 {
        return Err(Error::WindowNotFound(title.to_string()));
    }

    Ok(pid)
}

#[cfg(not(target_os = "windows"))]
pub fn find_process_by_window_title(_title: &str) -> Result<u32> {
    Err(Error::Unsupported("Window discovery"))
}

/// Read-only handle to the target process.
///
/// Closed on drop. Once the target exits every read fails with
/// [`Error::MemoryReadFailed`]; nothing panics.
pub struct ProcessHandle {
    pid: u32,
    #[cfg(target_os = "windows")]
    handle: HANDLE,
}

impl ProcessHandle {
    /// Open `pid` with just enough rights to read its memory.
    #[cfg(target_os = "windows")]
    pub fn open(pid: u32) -> Result<Self> {
        use windows::Win32::Foundation::BOOL;
        use windows::Win32::System::Threading::{
            OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
        };

        // SAFETY: OpenProcess has no pointer arguments; failure is reported via Result.
        let handle = unsafe {
            OpenProcess(
                PROCESS_VM_READ | PROCESS_QUERY_LIMITED_INFORMATION,
                BOOL::from(false),
                pid,
            )
        }
        .map_err(|e| Error::ProcessOpenFailed {
            pid,
            message: e.message().to_string(),
        })?;

        Ok(Self { pid, handle })
    }

    #[cfg(not(target_os = "windows"))]
    pub fn open(_pid: u32) -> Result<Self> {
        Err(Error::Unsupported("Process memory access"))
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

#[cfg(target_os = "windows")]
impl ReadMemory for ProcessHandle {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        use std::ffi::c_void;
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut buffer = vec![0u8; size];
        let mut bytes_read: usize = 0;

        // SAFETY: buffer is valid for `size` bytes and bytes_read outlives the call.
        // The remote address is never dereferenced locally.
        unsafe {
            ReadProcessMemory(
                self.handle,
                address as *const c_void,
                buffer.as_mut_ptr().cast::<c_void>(),
                size,
                Some(&mut bytes_read as *mut usize),
            )
        }
        .map_err(|e| Error::MemoryReadFailed {
            address,
            message: e.message().to_string(),
        })?;

        buffer.truncate(bytes_read);
        Ok(buffer)
    }
}

#[cfg(not(target_os = "windows"))]
impl ReadMemory for ProcessHandle {
    fn read_bytes(&self, _address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::Unsupported("Process memory access"))
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;

        // SAFETY: the handle came from OpenProcess and is closed exactly once.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}
