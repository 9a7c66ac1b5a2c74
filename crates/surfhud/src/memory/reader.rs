use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::memory::address::is_plausible_address;
use crate::telemetry::Vec3;

/// Read access to a foreign address space.
///
/// Implementors only provide [`read_bytes`](ReadMemory::read_bytes). The typed
/// helpers validate the address before touching it, so an implausible pointer
/// never reaches the implementor.
///
/// Two families of helpers exist:
/// - `read_*` return a [`Result`] and are used where the caller wants to know
/// - `safe_read_*` absorb every failure into the zero value of the type, which
///   is what the per-tick sampler wants
pub trait ReadMemory {
    /// Read `size` bytes at `address`.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    fn read_array<const N: usize>(&self, address: u64) -> Result<[u8; N]> {
        if !is_plausible_address(address) {
            return Err(Error::InvalidAddress(address));
        }
        let bytes = self.read_bytes(address, N)?;
        bytes.as_slice().try_into().map_err(|_| Error::ShortRead {
            address,
            expected: N,
            actual: bytes.len(),
        })
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        self.read_array::<4>(address).map(f32::from_le_bytes)
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        self.read_array::<8>(address).map(u64::from_le_bytes)
    }

    fn read_vec3(&self, address: u64) -> Result<Vec3> {
        self.read_array::<{ Vec3::SIZE }>(address)
            .map(Vec3::from_le_bytes)
    }

    fn safe_read_f32(&self, address: u64) -> f32 {
        absorb(address, self.read_f32(address))
    }

    fn safe_read_u64(&self, address: u64) -> u64 {
        absorb(address, self.read_u64(address))
    }

    fn safe_read_vec3(&self, address: u64) -> Vec3 {
        absorb(address, self.read_vec3(address))
    }
}

impl<R: ReadMemory + ?Sized> ReadMemory for &R {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}

fn absorb<T: Default>(address: u64, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        if e.is_transient() {
            trace!("Read at {:#x} absorbed: {}", address, e);
        } else {
            debug!("Read at {:#x} failed: {}", address, e);
        }
        T::default()
    })
}
