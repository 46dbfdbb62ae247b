//! RISC-V Base Integer Instruction Set (I).
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes used by the reset stub.
//! - `encode`: J-type encoding and decoding for `JAL`.

/// J-type instruction encoding.
pub mod encode;

/// Base integer instruction set opcodes.
pub mod opcodes;
