//! Common types shared by every part of the machine model.
//!
//! This module provides the fundamental building blocks used across the crate. It includes:
//! 1. **Address Types:** A strong type for physical addresses.
//! 2. **Constants:** Platform limits, size units and the reset stub encoding.
//! 3. **Error Handling:** Configuration and construction errors with a severity classification.

/// Physical address type.
pub mod addr;

/// Platform constants.
pub mod constants;

/// Error types for machine construction.
pub mod error;

pub use addr::PhysAddr;
pub use constants::{KIB, MIB};
pub use error::{ConfigError, MachineError, RealizeError, RegionError, Severity, TopologyError};
