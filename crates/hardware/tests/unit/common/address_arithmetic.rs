//! # Address Arithmetic Tests
//!
//! Tests for the `PhysAddr` newtype: construction, offsets, alignment and formatting.

use rhea_core::common::PhysAddr;

#[test]
fn test_phys_addr_display_is_zero_padded_hex() {
    assert_eq!(PhysAddr(0).to_string(), "0x00000000");
    assert_eq!(PhysAddr(0x4000_0000).to_string(), "0x40000000");
    assert_eq!(format!("{:x}", PhysAddr(0x600_0000)), "6000000");
}

#[test]
fn test_phys_addr_checked_add_detects_wrap() {
    assert_eq!(PhysAddr(0x10).checked_add(0x10), Some(PhysAddr(0x20)));
    assert_eq!(PhysAddr(u64::MAX).checked_add(1), None);
}

#[test]
fn test_phys_addr_offset_from_base() {
    let base = PhysAddr::new(0x10_0000);
    assert_eq!(PhysAddr(0x10_0040).offset_from(base), Some(0x40));
    assert_eq!(PhysAddr(0x0).offset_from(base), None);
}

#[test]
fn test_phys_addr_alignment() {
    assert!(PhysAddr(0).is_aligned(2));
    assert!(PhysAddr(0x100).is_aligned(4));
    assert!(!PhysAddr(0x101).is_aligned(2));
    assert_eq!(PhysAddr::from(7).val(), 7);
}
