//! # Memory Region Tests
//!
//! Tests for ROM/RAM regions and the host buffers behind them.

use rhea_core::common::{MIB, RegionError};
use rhea_core::soc::memory::MemoryRegion;
use rhea_core::soc::memory::buffer::RegionBuffer;
use rhea_core::soc::traits::{Device, RegionKind};

#[test]
fn test_buffer_starts_zeroed() {
    let buf = RegionBuffer::new(4096).unwrap();
    assert_eq!(buf.len(), 4096);
    assert!(!buf.is_empty());
    assert!(buf.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn test_buffer_rejects_zero_size() {
    assert!(RegionBuffer::new(0).is_err());
}

#[test]
fn test_large_ram_is_cheap_until_touched() {
    let mut ram = MemoryRegion::new_ram("riscv.rhea.dram", 570 * MIB).unwrap();
    assert_eq!(ram.size(), 570 * MIB);
    ram.write_u32(570 * MIB - 4, 0xCAFE_F00D);
    assert_eq!(ram.read_u32(570 * MIB - 4), 0xCAFE_F00D);
}

#[test]
fn test_region_kinds() {
    let rom = MemoryRegion::new_rom("rom", 16).unwrap();
    let ram = MemoryRegion::new_ram("ram", 16).unwrap();
    assert_eq!(rom.kind(), RegionKind::Rom);
    assert!(rom.is_read_only());
    assert_eq!(ram.kind(), RegionKind::Ram);
    assert!(!ram.is_read_only());
    assert_eq!(RegionKind::Io.to_string(), "i/o");
}

#[test]
fn test_rom_write_is_discarded() {
    let mut rom = MemoryRegion::new_rom("rom", 16).unwrap();
    assert!(rom.load(0, &[1, 2, 3, 4]));
    rom.write_u8(0, 0xFF);
    rom.write_u64(0, u64::MAX);
    assert_eq!(&rom.as_bytes()[..4], &[1, 2, 3, 4]);
}

#[test]
fn test_ram_partial_write() {
    let mut ram = MemoryRegion::new_ram("ram", 16).unwrap();
    ram.write_u16(2, 0xBEEF);
    assert_eq!(ram.read_u32(0), 0xBEEF_0000);
}

#[test]
fn test_zero_sized_rom() {
    assert!(matches!(
        MemoryRegion::new_rom("rom", 0),
        Err(RegionError::ZeroSized { .. })
    ));
}

#[test]
fn test_as_memory_mut_downcasts() {
    let mut ram = MemoryRegion::new_ram("ram", 16).unwrap();
    let dev: &mut dyn Device = &mut ram;
    assert!(dev.as_memory_mut().is_some());
}

#[test]
fn test_access_at_top_of_offset_range_is_out_of_bounds() {
    let mut rom = MemoryRegion::new_rom("rom", 64).unwrap();
    let mut ram = MemoryRegion::new_ram("ram", 64).unwrap();
    assert_eq!(rom.read_u32(u64::MAX), 0);
    assert_eq!(ram.read_u64(u64::MAX - 3), 0);
    ram.write_u64(u64::MAX, 0x1234);
    ram.write_u16(u64::MAX - 1, 0x1234);
    assert!(ram.as_bytes().iter().all(|&b| b == 0));
    assert!(!ram.load(u64::MAX, &[1, 2]));
}
