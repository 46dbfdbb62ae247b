//! System-on-Chip (SoC) Components.
//!
//! This module organizes the pieces that make up the Rhea board: the static
//! memory map, the physical address space, memory regions, the socket/hart
//! topology, hart arrays, and the builder that assembles them.

/// Machine construction (`RheaMachine`, machine descriptor, init phases).
pub mod builder;

/// Per-socket hart arrays.
pub mod hart_array;

/// Physical address space and region routing.
pub mod interconnect;

/// Static board memory map.
pub mod memmap;

/// ROM and RAM regions.
pub mod memory;

/// Socket/hart topology and validation.
pub mod topology;

/// Device trait for anything mapped into the address space.
pub mod traits;

pub use builder::{MachineState, RHEA_MACHINE, RheaMachine};
