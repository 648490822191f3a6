//! Bitwise operations and shifts. Shift counts use the low five bits of `y`.

use crate::config::{OP_AND, OP_LNOT, OP_NOT, OP_OR, OP_SAR, OP_SHL, OP_SHR, OP_XOR};
use crate::instructions::base::{flag, BinaryInstruction, UnaryInstruction};

fn and(x: u32, y: u32) -> u32 {
    x & y
}

fn or(x: u32, y: u32) -> u32 {
    x | y
}

fn xor(x: u32, y: u32) -> u32 {
    x ^ y
}

fn shl(x: u32, y: u32) -> u32 {
    x << (y & 31)
}

fn shr(x: u32, y: u32) -> u32 {
    x >> (y & 31)
}

fn sar(x: u32, y: u32) -> u32 {
    ((x as i32) >> (y & 31)) as u32
}

fn not(x: u32) -> u32 {
    !x
}

fn lnot(x: u32) -> u32 {
    flag(x == 0)
}

pub const AND: BinaryInstruction = BinaryInstruction::new(OP_AND, "and", and);
pub const OR: BinaryInstruction = BinaryInstruction::new(OP_OR, "or", or);
pub const XOR: BinaryInstruction = BinaryInstruction::new(OP_XOR, "xor", xor);
pub const SHL: BinaryInstruction = BinaryInstruction::new(OP_SHL, "shl", shl);
pub const SHR: BinaryInstruction = BinaryInstruction::new(OP_SHR, "shr", shr);
pub const SAR: BinaryInstruction = BinaryInstruction::new(OP_SAR, "sar", sar);

/// NOT (0x15): bitwise complement.
pub const NOT: UnaryInstruction = UnaryInstruction::new(OP_NOT, "not", not);
/// LNOT (0x16): 1 if zero, else 0.
pub const LNOT: UnaryInstruction = UnaryInstruction::new(OP_LNOT, "lnot", lnot);
