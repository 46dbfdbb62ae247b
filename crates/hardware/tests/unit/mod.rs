//! # Unit Components
//!
//! This module serves as the central hub for the unit tests of the board model,
//! organized the same way as the crate itself.





/// Unit tests for the board components.
///
/// This module organizes tests for the memory map, the address space,
/// memory regions, the topology validator, hart arrays and machine construction.
pub mod soc;
