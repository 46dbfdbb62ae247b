//! J-type encoding for `JAL`.
//!
//! J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.

use super::opcodes::{OP_JAL, OPCODE_MASK};

const RD_SHIFT: u32 = 7;
const RD_MASK: u32 = 0x1F;

const J_IMM_BITS: u32 = 21;

/// Encodes `jal rd, offset`.
///
/// Only the low 21 bits of `offset` are encoded and bit 0 is dropped, so
/// callers must pass an even offset within +/-1 MiB.
///
/// # Arguments
///
/// * `rd` - Destination register index (0-31); `0` makes this a plain jump.
/// * `offset` - PC-relative byte offset of the target.
pub const fn encode_jal(rd: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    let bit_20 = (imm >> 20) & 0x1;
    let bits_10_1 = (imm >> 1) & 0x3FF;
    let bit_11 = (imm >> 11) & 0x1;
    let bits_19_12 = (imm >> 12) & 0xFF;

    (bit_20 << 31)
        | (bits_10_1 << 21)
        | (bit_11 << 20)
        | (bits_19_12 << 12)
        | ((rd & RD_MASK) << RD_SHIFT)
        | OP_JAL
}

/// Decodes a `JAL` word into `(rd, offset)`, or `None` if `inst` is not a `JAL`.
pub const fn decode_jal(inst: u32) -> Option<(u32, i32)> {
    if inst & OPCODE_MASK != OP_JAL {
        return None;
    }
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    let shift = 32 - J_IMM_BITS;
    let offset = ((combined as i32) << shift) >> shift;
    Some(((inst >> RD_SHIFT) & RD_MASK, offset))
}

/// Returns `true` if `inst` is a jump to its own address (`j .`).
pub const fn is_jump_to_self(inst: u32) -> bool {
    matches!(decode_jal(inst), Some((0, 0)))
}
