use serde::Serialize;

use super::Vec3;

/// One tick's worth of telemetry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Euclidean norm of `velocity`
    pub speed: f32,
}

impl Snapshot {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            speed: velocity.length(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_from_velocity() {
        let snapshot = Snapshot::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((snapshot.speed - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_velocity_zero_speed() {
        let snapshot = Snapshot::new(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO);
        assert_eq!(snapshot.speed, 0.0);
    }

    #[test]
    fn test_default_is_all_zero() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot, Snapshot::new(Vec3::ZERO, Vec3::ZERO));
    }
}
