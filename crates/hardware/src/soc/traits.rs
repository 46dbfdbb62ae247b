//! Device trait for anything mapped into the physical address space.
//!
//! This module defines the `Device` trait implemented by memory regions and by
//! external device models. It provides:
//! 1. **Identification:** `name`, `size` and `kind` for mapping and inspection.
//! 2. **Access:** Byte, half, word, and doubleword read/write at device-relative offsets.
//! 3. **Downcasting:** Optional cast to `MemoryRegion` so the loader can seed ROM contents.
//!
//! Devices do not know where they are mapped; the [`AddressSpace`](super::interconnect::AddressSpace)
//! owns the base address and hands devices offsets that are always inside `0..size()`.

use std::fmt;

use crate::soc::memory::MemoryRegion;

/// Access semantics of a mapped device, as shown in the address space dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// Read-only memory; guest writes are discarded.
    Rom,
    /// Read/write memory.
    Ram,
    /// Memory-mapped I/O registers.
    Io,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rom => "rom",
            Self::Ram => "ram",
            Self::Io => "i/o",
        })
    }
}

/// Trait for memory and MMIO devices mapped into the address space.
pub trait Device: Send + Sync {
    /// Returns the device name (e.g., `"riscv.rhea.sram"`).
    fn name(&self) -> &str;
    /// Returns the size of the device window in bytes.
    fn size(&self) -> u64;
    /// Returns the access semantics of the device.
    fn kind(&self) -> RegionKind {
        RegionKind::Io
    }

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u64) -> u8;
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Reads eight bytes (little-endian) at the given offset.
    fn read_u64(&mut self, offset: u64) -> u64;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u64, val: u8);
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u64, val: u16);
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32);
    /// Writes eight bytes (little-endian) at the given offset.
    fn write_u64(&mut self, offset: u64, val: u64);

    /// Returns a mutable reference as `MemoryRegion` if this device is memory-backed.
    fn as_memory_mut(&mut self) -> Option<&mut MemoryRegion> {
        None
    }
}
