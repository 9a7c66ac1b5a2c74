use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Target window not found: {0}")]
    WindowNotFound(String),

    #[error("Failed to open process {pid}: {message}")]
    ProcessOpenFailed { pid: u32, message: String },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Failed to enumerate modules of process {pid}: {message}")]
    ModuleEnumerationFailed { pid: u32, message: String },

    #[error("Implausible address {0:#x}")]
    InvalidAddress(u64),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Short read at address {address:#x}: expected {expected} bytes, got {actual}")]
    ShortRead {
        address: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("GDI call failed: {0}")]
    Gdi(&'static str),

    #[error("{0} is only supported on Windows")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this is a per-tick read failure that heals on its own
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress(_) | Error::MemoryReadFailed { .. } | Error::ShortRead { .. }
        )
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
