//! In-memory stand-in for a target process.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;
use crate::telemetry::Vec3;

/// Sparse fake address space.
///
/// Every call to [`read_bytes`](ReadMemory::read_bytes) is counted, which lets
/// tests prove that guarded reads never reach the process.
#[derive(Debug, Default)]
pub struct MockMemoryReader {
    regions: BTreeMap<u64, Vec<u8>>,
    truncate_to: Option<usize>,
    reads: Cell<usize>,
    dead: Cell<bool>,
}

impl MockMemoryReader {
    /// Number of reads that reached the fake process
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Simulate the target exiting: every subsequent read fails
    pub fn kill(&self) {
        self.dead.set(true);
    }

    fn region_for(&self, address: u64, size: usize) -> Option<&[u8]> {
        let (&start, data) = self.regions.range(..=address).next_back()?;
        let offset = usize::try_from(address - start).ok()?;
        data.get(offset..offset.checked_add(size)?)
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);

        if self.dead.get() {
            return Err(Error::MemoryReadFailed {
                address,
                message: "process has exited".to_string(),
            });
        }

        let data = self
            .region_for(address, size)
            .ok_or_else(|| Error::MemoryReadFailed {
                address,
                message: format!("{} bytes not mapped", size),
            })?;

        let len = self.truncate_to.map_or(size, |limit| limit.min(size));
        Ok(data[..len].to_vec())
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    reader: MockMemoryReader,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map raw bytes at `address`
    pub fn bytes(mut self, address: u64, data: Vec<u8>) -> Self {
        self.reader.regions.insert(address, data);
        self
    }

    pub fn u64(self, address: u64, value: u64) -> Self {
        self.bytes(address, value.to_le_bytes().to_vec())
    }

    pub fn f32(self, address: u64, value: f32) -> Self {
        self.bytes(address, value.to_le_bytes().to_vec())
    }

    pub fn vec3(self, address: u64, value: Vec3) -> Self {
        self.bytes(address, value.to_le_bytes().to_vec())
    }

    /// Make every read return at most `limit` bytes
    pub fn truncate_reads_to(mut self, limit: usize) -> Self {
        self.reader.truncate_to = Some(limit);
        self
    }

    pub fn build(self) -> MockMemoryReader {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reads_inside_region() {
        let reader = MockMemoryBuilder::new()
            .bytes(0x1000, vec![0x41, 0x42, 0x43, 0x44])
            .build();

        assert_eq!(reader.read_bytes(0x1000, 4).unwrap(), vec![0x41, 0x42, 0x43, 0x44]);
        assert_eq!(reader.read_bytes(0x1001, 2).unwrap(), vec![0x42, 0x43]);
        assert_eq!(reader.read_count(), 2);
    }

    #[test]
    fn test_mock_read_out_of_bounds() {
        let reader = MockMemoryBuilder::new().bytes(0x1000, vec![0; 4]).build();

        assert!(reader.read_bytes(0x1002, 10).is_err());
        assert!(reader.read_bytes(0x500, 4).is_err());
    }

    #[test]
    fn test_mock_kill() {
        let reader = MockMemoryBuilder::new().u64(0x1000, 1).build();
        assert!(reader.read_bytes(0x1000, 8).is_ok());

        reader.kill();
        assert!(reader.read_bytes(0x1000, 8).is_err());
    }
}
