//! Telemetry read from the target: position, velocity and derived speed.

mod sampler;
mod snapshot;
mod vec3;

pub use sampler::{Sample, TelemetrySampler};
pub use snapshot::Snapshot;
pub use vec3::Vec3;
