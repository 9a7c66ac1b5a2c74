use tracing::debug;

use super::{Snapshot, Vec3};
use crate::memory::{ModuleBase, ReadMemory, is_plausible_address};
use crate::offset::OffsetsCollection;

/// Source of one [`Snapshot`] per tick
pub trait Sample {
    fn sample(&mut self) -> Snapshot;
}

/// Reads the local player's position and velocity out of the target.
///
/// Owns the reader (and with it the process handle) for its whole lifetime.
/// Every tick is independent: a failed or implausible read produces zeroed
/// fields for that tick only.
pub struct TelemetrySampler<R: ReadMemory> {
    reader: R,
    module: ModuleBase,
    offsets: OffsetsCollection,
    pawn_present: Option<bool>,
}

impl<R: ReadMemory> TelemetrySampler<R> {
    pub fn new(reader: R, module: ModuleBase, offsets: OffsetsCollection) -> Self {
        Self {
            reader,
            module,
            offsets,
            pawn_present: None,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn module(&self) -> &ModuleBase {
        &self.module
    }

    /// Local player pawn pointer, or 0 when unavailable
    pub fn local_pawn(&self) -> u64 {
        self.module
            .offset(self.offsets.local_player_pawn)
            .map_or(0, |address| self.reader.safe_read_u64(address))
    }

    fn read_field(&self, pawn: u64, offset: u64) -> Vec3 {
        pawn.checked_add(offset)
            .map_or(Vec3::ZERO, |address| self.reader.safe_read_vec3(address))
    }

    fn track_presence(&mut self, pawn: u64) {
        let present = is_plausible_address(pawn);
        if self.pawn_present != Some(present) {
            if present {
                debug!("Local player pawn at {:#x}", pawn);
            } else {
                debug!("Local player pawn unavailable ({:#x}), telemetry zeroed", pawn);
            }
            self.pawn_present = Some(present);
        }
    }
}

impl<R: ReadMemory> Sample for TelemetrySampler<R> {
    fn sample(&mut self) -> Snapshot {
        let pawn = self.local_pawn();
        self.track_presence(pawn);

        if !is_plausible_address(pawn) {
            return Snapshot::default();
        }

        let position = self.read_field(pawn, self.offsets.old_origin);
        let velocity = self.read_field(pawn, self.offsets.velocity);
        Snapshot::new(position, velocity)
    }
}
