//! Wrapping arithmetic: ADD, SUB, MUL, NEG.

use crate::config::{OP_ADD, OP_MUL, OP_NEG, OP_SUB};
use crate::instructions::base::{BinaryInstruction, UnaryInstruction};

/// ADD (0x0C): `x + y`, wrapping.
pub const ADD: BinaryInstruction = BinaryInstruction::new(OP_ADD, "add", u32::wrapping_add);

/// SUB (0x0D): `x - y`, wrapping. With an immediate, `y` is the immediate.
pub const SUB: BinaryInstruction = BinaryInstruction::new(OP_SUB, "sub", u32::wrapping_sub);

/// MUL (0x0E): low 32 bits of `x * y`.
pub const MUL: BinaryInstruction = BinaryInstruction::new(OP_MUL, "mul", u32::wrapping_mul);

/// NEG (0x17): two's complement negate.
pub const NEG: UnaryInstruction = UnaryInstruction::new(OP_NEG, "neg", u32::wrapping_neg);
