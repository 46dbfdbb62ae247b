//! Reset Stub Loader.
//!
//! This module seeds the boot ROM with the code every hart executes first. It performs:
//! 1. **Stub encoding:** Builds the four-word reset stub (`j .` plus zero padding).
//! 2. **Installation:** Writes the stub at the reset vector through the address space's blob path.
//!
//! The stub parks every hart in a self-loop until a debugger or firmware loaded
//! by the surrounding framework moves it somewhere else.

use crate::common::addr::PhysAddr;
use crate::common::constants::{
    JAL_SELF_INSTRUCTION, RESET_BLOB_NAME, RESET_STUB_SIZE, RESET_STUB_WORDS,
};
use crate::common::error::RegionError;
use crate::soc::interconnect::AddressSpace;

/// The reset stub as instruction words.
pub const RESET_STUB: [u32; RESET_STUB_WORDS] = [JAL_SELF_INSTRUCTION, 0, 0, 0];

/// Returns the reset stub as little-endian bytes.
pub fn reset_stub_bytes() -> [u8; RESET_STUB_SIZE] {
    let mut bytes = [0u8; RESET_STUB_SIZE];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(RESET_STUB) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Installs the reset stub at `reset_vector`.
///
/// # Arguments
///
/// * `address_space` - Address space that already maps the boot ROM.
/// * `reset_vector` - Address the harts reset to; must lie in a memory region.
///
/// # Errors
///
/// [`RegionError::BlobOutOfRange`] if the 16-byte stub does not fit inside a
/// memory region at `reset_vector`.
pub fn install_reset_stub(
    address_space: &mut AddressSpace,
    reset_vector: PhysAddr,
) -> Result<(), RegionError> {
    address_space.rom_add_blob_fixed(RESET_BLOB_NAME, &reset_stub_bytes(), reset_vector)
}
