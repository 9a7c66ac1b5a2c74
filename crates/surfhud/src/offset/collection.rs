use serde::{Deserialize, Serialize};

/// Byte offsets into the target's data layout.
///
/// The table is versioned against a specific build of the target and is not
/// checked against the live layout. A stale table yields plausible but wrong
/// values, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetsCollection {
    pub version: String,
    /// Module-relative address of the local player pawn pointer
    pub local_player_pawn: u64,
    /// Pawn-relative position field
    pub old_origin: u64,
    /// Pawn-relative velocity field
    pub velocity: u64,
}

impl OffsetsCollection {
    /// Offsets compiled into the binary
    pub fn builtin() -> Self {
        Self {
            version: "cs2-2025-09-22".to_string(),
            local_player_pawn: 0x1BE_7DA0,
            old_origin: 0x15A0,
            velocity: 0x430,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.local_player_pawn != 0
            && self.old_origin != 0
            && self.velocity != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        assert!(OffsetsCollection::builtin().is_valid());
    }

    #[test]
    fn test_default_is_invalid() {
        assert!(!OffsetsCollection::default().is_valid());
    }

    #[test]
    fn test_missing_field_is_invalid() {
        let offsets = OffsetsCollection {
            velocity: 0,
            ..OffsetsCollection::builtin()
        };
        assert!(!offsets.is_valid());
    }
}
