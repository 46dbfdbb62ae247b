//! # JAL Encoding Tests
//!
//! Tests for the J-type immediate scatter used to build the reset stub.

use proptest::prelude::*;
use rhea_core::isa::rv64i::encode::{decode_jal, encode_jal, is_jump_to_self};
use rhea_core::isa::rv64i::opcodes::{OP_JAL, OPCODE_MASK};

#[test]
fn test_jal_self_loop_encoding() {
    assert_eq!(encode_jal(0, 0), 0x0000_006f);
    assert_eq!(encode_jal(0, 0) & OPCODE_MASK, OP_JAL);
}

#[test]
fn test_jal_ra_is_not_a_self_loop() {
    assert_eq!(encode_jal(1, 0), 0x0000_00ef);
    assert!(!is_jump_to_self(0x0000_00ef));
}

proptest! {
    #[test]
    fn prop_even_offsets_decode_to_themselves(rd in 0u32..32, half in -(1i32 << 19)..(1i32 << 19)) {
        let offset = half * 2;
        prop_assert_eq!(decode_jal(encode_jal(rd, offset)), Some((rd, offset)));
    }
}
