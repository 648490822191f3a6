//! Comparisons. Each pushes 1 when the relation holds, else 0.
//! The `-si` forms compare as signed words and sign-extend their immediate.

use crate::config::{
    OP_EQ, OP_GE_SI, OP_GE_UI, OP_GT_SI, OP_GT_UI, OP_LE_SI, OP_LE_UI, OP_LT_SI, OP_LT_UI, OP_NE,
};
use crate::instructions::base::{flag, BinaryInstruction};

fn eq(x: u32, y: u32) -> u32 {
    flag(x == y)
}

fn ne(x: u32, y: u32) -> u32 {
    flag(x != y)
}

fn lt_si(x: u32, y: u32) -> u32 {
    flag((x as i32) < (y as i32))
}

fn le_si(x: u32, y: u32) -> u32 {
    flag((x as i32) <= (y as i32))
}

fn gt_si(x: u32, y: u32) -> u32 {
    flag((x as i32) > (y as i32))
}

fn ge_si(x: u32, y: u32) -> u32 {
    flag((x as i32) >= (y as i32))
}

fn lt_ui(x: u32, y: u32) -> u32 {
    flag(x < y)
}

fn le_ui(x: u32, y: u32) -> u32 {
    flag(x <= y)
}

fn gt_ui(x: u32, y: u32) -> u32 {
    flag(x > y)
}

fn ge_ui(x: u32, y: u32) -> u32 {
    flag(x >= y)
}

pub const EQ: BinaryInstruction = BinaryInstruction::new(OP_EQ, "eq", eq);
pub const NE: BinaryInstruction = BinaryInstruction::new(OP_NE, "ne", ne);
pub const LT_SI: BinaryInstruction =
    BinaryInstruction::new(OP_LT_SI, "lt-si", lt_si).with_signed_immediate();
pub const LE_SI: BinaryInstruction =
    BinaryInstruction::new(OP_LE_SI, "le-si", le_si).with_signed_immediate();
pub const GT_SI: BinaryInstruction =
    BinaryInstruction::new(OP_GT_SI, "gt-si", gt_si).with_signed_immediate();
pub const GE_SI: BinaryInstruction =
    BinaryInstruction::new(OP_GE_SI, "ge-si", ge_si).with_signed_immediate();
pub const LT_UI: BinaryInstruction = BinaryInstruction::new(OP_LT_UI, "lt-ui", lt_ui);
pub const LE_UI: BinaryInstruction = BinaryInstruction::new(OP_LE_UI, "le-ui", le_ui);
pub const GT_UI: BinaryInstruction = BinaryInstruction::new(OP_GT_UI, "gt-ui", gt_ui);
pub const GE_UI: BinaryInstruction = BinaryInstruction::new(OP_GE_UI, "ge-ui", ge_ui);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_and_unsigned_disagree_on_high_bit() {
        assert_eq!(lt_si(0xFFFF_FFFF, 0), 1);
        assert_eq!(lt_ui(0xFFFF_FFFF, 0), 0);
        assert_eq!(ge_ui(0x8000_0000, 0x7FFF_FFFF), 1);
        assert_eq!(ge_si(0x8000_0000, 0x7FFF_FFFF), 0);
    }
}
