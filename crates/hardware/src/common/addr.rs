//! Physical address type.
//!
//! This module defines a strong type for physical addresses on the Rhea board. It provides:
//! 1. **Type Safety:** Keeps raw byte counts and physical addresses from being mixed up.
//! 2. **Range Helpers:** Offset arithmetic used by the address space when routing accesses.

use std::fmt;

/// A physical address in the Rhea address space.
///
/// Physical addresses are what harts fetch from at reset and what regions are mapped at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `PhysAddr` instance wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the address `offset` bytes above this one, or `None` on overflow.
    pub const fn checked_add(&self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Returns the distance from `base` to this address, or `None` if this address is below it.
    pub const fn offset_from(&self, base: Self) -> Option<u64> {
        self.0.checked_sub(base.0)
    }

    /// Returns `true` if the address is a multiple of `align` (which must be a power of two).
    pub const fn is_aligned(&self, align: u64) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
