//! ROM and RAM regions.
//!
//! This module implements memory-backed devices. It provides:
//! 1. **Buffer:** Lazily-allocated host storage (`RegionBuffer`).
//! 2. **MemoryRegion:** A named ROM or RAM device that can be mapped into the address space.
//! 3. **Loading:** A loader-only path that seeds contents, bypassing ROM write protection.

/// Host storage for region contents.
pub mod buffer;

use std::ops::Range;

use self::buffer::RegionBuffer;
use crate::common::error::RegionError;
use crate::soc::traits::{Device, RegionKind};

/// A named block of guest memory, either read-only (ROM) or read/write (RAM).
#[derive(Debug)]
pub struct MemoryRegion {
    name: String,
    kind: RegionKind,
    buffer: RegionBuffer,
}

impl MemoryRegion {
    /// Allocates a read-only region of `size` bytes.
    ///
    /// Guest writes to the region are discarded; its contents can only be set
    /// through [`MemoryRegion::load`].
    ///
    /// # Errors
    ///
    /// [`RegionError::ZeroSized`] for an empty region, [`RegionError::Alloc`] if
    /// host memory cannot be obtained.
    pub fn new_rom(name: impl Into<String>, size: u64) -> Result<Self, RegionError> {
        Self::new(name.into(), RegionKind::Rom, size)
    }

    /// Allocates a zeroed read/write region of `size` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`MemoryRegion::new_rom`].
    pub fn new_ram(name: impl Into<String>, size: u64) -> Result<Self, RegionError> {
        Self::new(name.into(), RegionKind::Ram, size)
    }

    fn new(name: String, kind: RegionKind, size: u64) -> Result<Self, RegionError> {
        if size == 0 {
            return Err(RegionError::ZeroSized { name });
        }
        match RegionBuffer::new(size) {
            Ok(buffer) => Ok(Self { name, kind, buffer }),
            Err(source) => Err(RegionError::Alloc { name, size, source }),
        }
    }

    /// Returns `true` for ROM regions.
    pub fn is_read_only(&self) -> bool {
        self.kind == RegionKind::Rom
    }

    /// Copies `data` into the region at `offset`, regardless of write protection.
    ///
    /// Returns `false` and leaves the region untouched if `data` does not fit.
    #[must_use]
    pub fn load(&mut self, offset: u64, data: &[u8]) -> bool {
        let Some(dst) =
            span(offset, data.len()).and_then(|range| self.buffer.as_mut_slice().get_mut(range))
        else {
            return false;
        };
        dst.copy_from_slice(data);
        true
    }

    /// Returns the region contents.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    fn read<const N: usize>(&self, offset: u64) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(src) = span(offset, N).and_then(|range| self.buffer.as_slice().get(range)) {
            out.copy_from_slice(src);
        }
        out
    }

    fn write(&mut self, offset: u64, data: &[u8]) {
        if self.is_read_only() {
            tracing::warn!(
                region = %self.name,
                offset,
                "discarding guest write to rom"
            );
            return;
        }
        if let Some(dst) =
            span(offset, data.len()).and_then(|range| self.buffer.as_mut_slice().get_mut(range))
        {
            dst.copy_from_slice(data);
        }
    }
}

/// Byte range `offset..offset + len`, or `None` if it cannot be expressed on the host.
fn span(offset: u64, len: usize) -> Option<Range<usize>> {
    let start = usize::try_from(offset).ok()?;
    Some(start..start.checked_add(len)?)
}

impl Device for MemoryRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn kind(&self) -> RegionKind {
        self.kind
    }

    fn read_u8(&mut self, offset: u64) -> u8 {
        self.read::<1>(offset)[0]
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        u16::from_le_bytes(self.read(offset))
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        u32::from_le_bytes(self.read(offset))
    }

    fn read_u64(&mut self, offset: u64) -> u64 {
        u64::from_le_bytes(self.read(offset))
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        self.write(offset, &[val]);
    }

    fn write_u16(&mut self, offset: u64, val: u16) {
        self.write(offset, &val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.write(offset, &val.to_le_bytes());
    }

    fn write_u64(&mut self, offset: u64, val: u64) {
        self.write(offset, &val.to_le_bytes());
    }

    fn as_memory_mut(&mut self) -> Option<&mut MemoryRegion> {
        Some(self)
    }
}
