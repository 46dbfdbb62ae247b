//! Static physical memory map of the Rhea board.
//!
//! The layout is fixed at compile time:
//!
//! ```text
//! 0x4000_0000 +---------------------------+
//!             |  DRAM (570 MiB)           |
//!             +---------------------------+
//!             |  ...                      |
//! 0x0600_0000 +---------------------------+
//!             |  UART0 (0x100)            |
//!             +---------------------------+
//!             |  ...                      |
//! 0x0010_0000 +---------------------------+
//!             |  SRAM (512 KiB)           |
//!             +---------------------------+
//!             |  ...                      |
//! 0x0000_0000 +---------------------------+
//!             |  Boot ROM (256 KiB)       |
//!             +---------------------------+
//! ```

use crate::common::addr::PhysAddr;
use crate::common::constants::{KIB, MIB};

/// A `(base, size)` pair describing one window of the physical address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemMapEntry {
    /// First byte of the window.
    pub base: u64,
    /// Length of the window in bytes.
    pub size: u64,
}

impl MemMapEntry {
    /// Base address as a [`PhysAddr`].
    pub const fn base_addr(&self) -> PhysAddr {
        PhysAddr(self.base)
    }

    /// One past the last byte of the window.
    pub const fn end(&self) -> u64 {
        self.base + self.size
    }

    /// Returns `true` if `addr` falls inside the window.
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.base && addr < self.end()
    }

    /// Returns `true` if the two windows share at least one byte.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.base < other.end() && other.base < self.end()
    }
}

/// Regions of the Rhea memory map, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RheaRegion {
    /// Mask ROM holding the reset stub; every hart's reset vector.
    Rom = 0,
    /// On-chip scratch SRAM.
    Sram,
    /// UART0 register window; populated by the UART device model.
    Uart0,
    /// Main DRAM.
    Dram,
}

impl RheaRegion {
    /// All regions in table order.
    pub const ALL: [Self; 4] = [Self::Rom, Self::Sram, Self::Uart0, Self::Dram];

    /// Returns this region's entry in [`RHEA_MEMMAP`].
    pub const fn entry(self) -> MemMapEntry {
        RHEA_MEMMAP[self as usize]
    }

    /// Region name used when the region is allocated.
    pub const fn region_name(self) -> &'static str {
        match self {
            Self::Rom => "riscv.rhea.mrom",
            Self::Sram => "riscv.rhea.sram",
            Self::Uart0 => "riscv.rhea.uart0",
            Self::Dram => "riscv.rhea.dram",
        }
    }
}

/// The board memory map, indexed by [`RheaRegion`].
pub const RHEA_MEMMAP: [MemMapEntry; 4] = [
    MemMapEntry {
        base: 0x0000_0000,
        size: 256 * KIB,
    },
    MemMapEntry {
        base: 0x0010_0000,
        size: 512 * KIB,
    },
    MemMapEntry {
        base: 0x0600_0000,
        size: 0x100,
    },
    MemMapEntry {
        base: 0x4000_0000,
        size: 570 * MIB,
    },
];

/// Returns `true` if no two entries of `map` overlap.
pub const fn is_disjoint(map: &[MemMapEntry]) -> bool {
    let mut i = 0;
    while i < map.len() {
        let mut j = i + 1;
        while j < map.len() {
            if map[i].overlaps(&map[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(is_disjoint(&RHEA_MEMMAP), "rhea memory map overlaps");
