//! Board-wide constants.
//!
//! This module defines the fixed platform parameters of the Rhea board. It includes:
//! 1. **Size Units:** Binary size multipliers used by the memory map.
//! 2. **Platform Limits:** Maximum harts and sockets the board can be built with.
//! 3. **Reset Constants:** The reset stub placed at the boot ROM base.

use crate::isa::rv64i::encode::encode_jal;

/// One kibibyte.
pub const KIB: u64 = 1024;

/// One mebibyte.
pub const MIB: u64 = 1024 * KIB;

/// Maximum number of harts the board supports across all sockets.
pub const RHEA_CPUS_MAX: u32 = 4;

/// Maximum number of sockets (NUMA nodes) the board supports.
pub const RHEA_SOCKETS_MAX: usize = 1;

/// `jal x0, 0` (`j .`): an unconditional jump to itself, `0x0000_006f`.
pub const JAL_SELF_INSTRUCTION: u32 = encode_jal(0, 0);

/// Number of 32-bit words in the reset stub.
pub const RESET_STUB_WORDS: usize = 4;

/// Size of the reset stub in bytes.
pub const RESET_STUB_SIZE: usize = RESET_STUB_WORDS * 4;

/// Name under which the reset stub blob is installed.
pub const RESET_BLOB_NAME: &str = "mrom.reset";

/// Required alignment of a reset vector (IALIGN=16 with the C extension).
pub const RESET_VECTOR_ALIGN: u64 = 2;
