//! Instruction Set Architecture (ISA) Definitions.
//!
//! The machine model never executes instructions; it only needs to encode the
//! reset stub it places in the boot ROM and to recognize it when inspecting a
//! hart's first fetch.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (jump encodings only).

/// Base integer instruction set (jump opcodes and J-type encoding).
pub mod rv64i;
