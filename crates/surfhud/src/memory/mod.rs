pub mod address;
mod module;
mod process;
mod reader;

#[cfg(test)]
pub mod mock;

pub use address::{MAX_USER_ADDRESS, MIN_USER_ADDRESS, is_plausible_address};
pub use module::*;
pub use process::*;
pub use reader::ReadMemory;

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
