//! Plausibility guard for foreign pointers.
//!
//! Pointers read out of the target are only dereferenced when they land inside
//! the canonical user-mode range of a 64-bit Windows process. Everything else
//! (null, null plus a field offset, kernel or non-canonical values) is rejected
//! before any read is issued.

/// First 64 KiB are never mapped in a Windows process
pub const MIN_USER_ADDRESS: u64 = 0x1_0000;

/// Upper bound of the 47-bit user address space
pub const MAX_USER_ADDRESS: u64 = 0x7FFF_FFFF_FFFF;

/// Check whether `address` could point into the target's user space.
pub fn is_plausible_address(address: u64) -> bool {
    (MIN_USER_ADDRESS..=MAX_USER_ADDRESS).contains(&address)
}

/// Add a field offset to a base pointer, rejecting overflow.
pub fn offset_address(base: u64, offset: u64) -> Option<u64> {
    base.checked_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_implausible() {
        assert!(!is_plausible_address(0));
    }

    #[test]
    fn test_null_plus_field_offset_is_implausible() {
        assert!(!is_plausible_address(0x1324));
        assert!(!is_plausible_address(MIN_USER_ADDRESS - 1));
    }

    #[test]
    fn test_ceiling() {
        assert!(is_plausible_address(MAX_USER_ADDRESS));
        assert!(!is_plausible_address(MAX_USER_ADDRESS + 1));
        assert!(!is_plausible_address(u64::MAX));
        assert!(!is_plausible_address(0xFFFF_8000_0000_0000));
    }

    #[test]
    fn test_typical_module_address() {
        assert!(is_plausible_address(0x7FFA_1234_0000));
    }

    #[test]
    fn test_offset_address_overflow() {
        assert_eq!(offset_address(0x1000, 0x10), Some(0x1010));
        assert_eq!(offset_address(u64::MAX, 1), None);
    }
}
