//! Rhea RISC-V board model.
//!
//! This crate builds the static hardware of the Rhea board with the following:
//! 1. **Topology:** Sockets and harts, validated against the board limits.
//! 2. **Hart arrays:** One realized array per socket, all resetting to the boot ROM.
//! 3. **Memory map:** Boot ROM with a reset stub, SRAM, DRAM, and a reserved UART window.
//! 4. **Configuration:** JSON-deserializable machine configuration with board defaults.
//!
//! Instruction execution and device register models are outside this crate.

/// Common types and constants (addresses, limits, errors).
pub mod common;
/// Machine configuration (defaults, CPU models, SMP/NUMA/memory settings).
pub mod config;
/// Instruction encodings used by the reset stub.
pub mod isa;
/// Reset stub loader.
pub mod sim;
/// Board components (memory map, address space, regions, topology, hart arrays, builder).
pub mod soc;

/// Root configuration type; use `MachineConfig::default()` or deserialize from JSON.
pub use crate::config::MachineConfig;
/// Top-level error type for machine construction.
pub use crate::common::MachineError;
/// The constructed board; build with `RheaMachine::init`.
pub use crate::soc::{MachineState, RheaMachine};
