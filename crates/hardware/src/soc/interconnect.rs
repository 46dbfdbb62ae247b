//! Global physical address space.
//!
//! This module implements the single physical memory map of a machine. It provides:
//! 1. **Region insertion:** Devices are mapped at a base address; overlapping inserts are rejected.
//! 2. **Reservations:** Windows kept free for device models attached outside the machine core.
//! 3. **Blob installation:** Loader path that seeds ROM/RAM contents at a physical address.
//! 4. **Access routing:** Guest-style reads and writes by physical address, for inspection.

use std::fmt;

use crate::common::addr::PhysAddr;
use crate::common::error::RegionError;
use crate::soc::memmap::MemMapEntry;
use crate::soc::traits::{Device, RegionKind};

struct Mapping {
    base: u64,
    device: Box<dyn Device>,
}

impl Mapping {
    fn window(&self) -> MemMapEntry {
        MemMapEntry {
            base: self.base,
            size: self.device.size(),
        }
    }
}

/// A window of the address space held for a device that is not mapped yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// Name of the device expected to fill the window.
    pub name: String,
    /// Reserved window.
    pub window: MemMapEntry,
    /// Whether a device has been attached through [`AddressSpace::claim_reservation`].
    pub claimed: bool,
}

/// Read-only view of one mapped region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionInfo<'a> {
    /// Region name.
    pub name: &'a str,
    /// Base physical address.
    pub base: PhysAddr,
    /// Size in bytes.
    pub size: u64,
    /// Access semantics.
    pub kind: RegionKind,
}

/// The physical memory map of a machine; routes accesses by physical address.
///
/// Holds the mapped devices sorted by base address and the reserved windows.
/// Mapped regions and unclaimed reservations never overlap.
#[derive(Default)]
pub struct AddressSpace {
    mappings: Vec<Mapping>,
    reservations: Vec<Reservation>,
    last_idx: usize,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `device` at `base`.
    ///
    /// # Errors
    ///
    /// [`RegionError::ZeroSized`] for an empty device, [`RegionError::AddressOverflow`]
    /// if the window wraps past the top of the address space, and
    /// [`RegionError::Overlap`] if it intersects a mapped region or a reservation.
    pub fn add_subregion(
        &mut self,
        base: PhysAddr,
        device: Box<dyn Device>,
    ) -> Result<(), RegionError> {
        let window = Self::checked_window(device.name(), base, device.size())?;
        self.check_free(device.name(), window)?;
        self.insert(base, device);
        Ok(())
    }

    /// Keeps `window` free for the device called `name`.
    ///
    /// # Errors
    ///
    /// Same as [`AddressSpace::add_subregion`].
    pub fn reserve(&mut self, name: &str, window: MemMapEntry) -> Result<(), RegionError> {
        let window = Self::checked_window(name, window.base_addr(), window.size)?;
        self.check_free(name, window)?;
        tracing::debug!(name, base = %window.base_addr(), size = window.size, "reserved window");
        self.reservations.push(Reservation {
            name: name.to_owned(),
            window,
            claimed: false,
        });
        Ok(())
    }

    /// Maps `device` at `base` into a window previously set aside with [`AddressSpace::reserve`].
    ///
    /// The device must cover the reserved window exactly.
    ///
    /// # Errors
    ///
    /// [`RegionError::NoReservation`] if no unclaimed reservation has this base and size.
    pub fn claim_reservation(
        &mut self,
        base: PhysAddr,
        device: Box<dyn Device>,
    ) -> Result<(), RegionError> {
        let size = device.size();
        let Some(reservation) = self
            .reservations
            .iter_mut()
            .find(|r| !r.claimed && r.window.base == base.val() && r.window.size == size)
        else {
            return Err(RegionError::NoReservation {
                name: device.name().to_owned(),
                base,
                size,
            });
        };
        reservation.claimed = true;
        tracing::info!(name = device.name(), base = %base, size, "claimed reserved window");
        self.insert(base, device);
        Ok(())
    }

    /// Copies `data` into the memory region containing `addr`.
    ///
    /// This is the loader path: it ignores ROM write protection, and the blob
    /// must lie entirely inside a single memory-backed region.
    ///
    /// # Errors
    ///
    /// [`RegionError::BlobOutOfRange`] if no memory region holds the whole blob.
    pub fn rom_add_blob_fixed(
        &mut self,
        name: &str,
        data: &[u8],
        addr: PhysAddr,
    ) -> Result<(), RegionError> {
        let loaded = self
            .find_device(addr.val(), data.len() as u64)
            .and_then(|(dev, offset)| Some((dev.as_memory_mut()?, offset)))
            .is_some_and(|(mem, offset)| mem.load(offset, data));
        if !loaded {
            return Err(RegionError::BlobOutOfRange {
                name: name.to_owned(),
                addr,
                len: data.len(),
            });
        }
        tracing::debug!(blob = name, addr = %addr, len = data.len(), "installed blob");
        Ok(())
    }

    /// Iterates over mapped regions in address order.
    pub fn regions(&self) -> impl Iterator<Item = RegionInfo<'_>> {
        self.mappings.iter().map(|m| RegionInfo {
            name: m.device.name(),
            base: PhysAddr(m.base),
            size: m.device.size(),
            kind: m.device.kind(),
        })
    }

    /// Returns the mapped region called `name`.
    pub fn region(&self, name: &str) -> Option<RegionInfo<'_>> {
        self.regions().find(|r| r.name == name)
    }

    /// Returns all reservations, claimed or not, in insertion order.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Returns `true` if some mapped region contains `paddr`.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.mappings.iter().any(|m| m.window().contains(paddr))
    }

    fn checked_window(name: &str, base: PhysAddr, size: u64) -> Result<MemMapEntry, RegionError> {
        if size == 0 {
            return Err(RegionError::ZeroSized {
                name: name.to_owned(),
            });
        }
        if base.val().checked_add(size).is_none() {
            return Err(RegionError::AddressOverflow {
                name: name.to_owned(),
                base,
                size,
            });
        }
        Ok(MemMapEntry {
            base: base.val(),
            size,
        })
    }

    fn check_free(&self, name: &str, window: MemMapEntry) -> Result<(), RegionError> {
        let mapped = self
            .mappings
            .iter()
            .find(|m| m.window().overlaps(&window))
            .map(|m| m.device.name());
        let reserved = self
            .reservations
            .iter()
            .find(|r| !r.claimed && r.window.overlaps(&window))
            .map(|r| r.name.as_str());
        match mapped.or(reserved) {
            Some(existing) => Err(RegionError::Overlap {
                name: name.to_owned(),
                base: window.base_addr(),
                size: window.size,
                existing: existing.to_owned(),
            }),
            None => Ok(()),
        }
    }

    fn insert(&mut self, base: PhysAddr, device: Box<dyn Device>) {
        let idx = self.mappings.partition_point(|m| m.base < base.val());
        self.mappings.insert(
            idx,
            Mapping {
                base: base.val(),
                device,
            },
        );
        self.last_idx = 0;
    }

    /// Finds the device holding all of `[paddr, paddr + len)`; returns it with the offset of `paddr`.
    fn find_device(
        &mut self,
        paddr: u64,
        len: u64,
    ) -> Option<(&mut Box<dyn Device>, u64)> {
        let fits = |m: &Mapping| {
            let w = m.window();
            w.contains(paddr) && paddr.checked_add(len).is_some_and(|end| end <= w.end())
        };

        if self.mappings.get(self.last_idx).is_some_and(&fits) {
            let m = &mut self.mappings[self.last_idx];
            return Some((&mut m.device, paddr - m.base));
        }

        let idx = self.mappings.iter().position(fits)?;
        self.last_idx = idx;
        let m = &mut self.mappings[idx];
        Some((&mut m.device, paddr - m.base))
    }

    /// Reads one byte at the given physical address; returns 0 if unmapped.
    pub fn read_u8(&mut self, paddr: u64) -> u8 {
        self.find_device(paddr, 1)
            .map_or(0, |(dev, offset)| dev.read_u8(offset))
    }

    /// Reads two bytes (little-endian) at the given physical address; returns 0 if unmapped.
    pub fn read_u16(&mut self, paddr: u64) -> u16 {
        self.find_device(paddr, 2)
            .map_or(0, |(dev, offset)| dev.read_u16(offset))
    }

    /// Reads four bytes (little-endian) at the given physical address; returns 0 if unmapped.
    pub fn read_u32(&mut self, paddr: u64) -> u32 {
        self.find_device(paddr, 4)
            .map_or(0, |(dev, offset)| dev.read_u32(offset))
    }

    /// Reads eight bytes (little-endian) at the given physical address; returns 0 if unmapped.
    pub fn read_u64(&mut self, paddr: u64) -> u64 {
        self.find_device(paddr, 8)
            .map_or(0, |(dev, offset)| dev.read_u64(offset))
    }

    /// Writes one byte at the given physical address; no-op if unmapped.
    pub fn write_u8(&mut self, paddr: u64, val: u8) {
        if let Some((dev, offset)) = self.find_device(paddr, 1) {
            dev.write_u8(offset, val);
        }
    }

    /// Writes two bytes (little-endian) at the given physical address; no-op if unmapped.
    pub fn write_u16(&mut self, paddr: u64, val: u16) {
        if let Some((dev, offset)) = self.find_device(paddr, 2) {
            dev.write_u16(offset, val);
        }
    }

    /// Writes four bytes (little-endian) at the given physical address; no-op if unmapped.
    pub fn write_u32(&mut self, paddr: u64, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr, 4) {
            dev.write_u32(offset, val);
        }
    }

    /// Writes eight bytes (little-endian) at the given physical address; no-op if unmapped.
    pub fn write_u64(&mut self, paddr: u64, val: u64) {
        if let Some((dev, offset)) = self.find_device(paddr, 8) {
            dev.write_u64(offset, val);
        }
    }
}

impl fmt::Display for AddressSpace {
    /// Prints one line per mapped region or unclaimed reservation, in address order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<(u64, u64, String, &str)> = self
            .regions()
            .map(|r| (r.base.val(), r.size, r.kind.to_string(), r.name))
            .collect();
        lines.extend(
            self.reservations
                .iter()
                .filter(|r| !r.claimed)
                .map(|r| (r.window.base, r.window.size, "reserved".to_owned(), r.name.as_str())),
        );
        lines.sort_by_key(|&(base, ..)| base);

        writeln!(f, "address-space: memory")?;
        for (base, size, kind, name) in lines {
            writeln!(
                f,
                "  {base:016x}-{last:016x} (prio 0, {kind}): {name}",
                last = base + size - 1
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressSpace")
            .field("regions", &self.regions().collect::<Vec<_>>())
            .field("reservations", &self.reservations)
            .finish_non_exhaustive()
    }
}
