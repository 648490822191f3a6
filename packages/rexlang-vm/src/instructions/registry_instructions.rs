//! Register all instruction handlers into the registry.

use super::arithmetic::{ADD, MUL, NEG, SUB};
use super::bitwise::{AND, LNOT, NOT, OR, SAR, SHL, SHR, XOR};
use super::block::{DataCopyInstruction, ProgramCopyInstruction};
use super::comparison::{EQ, GE_SI, GE_UI, GT_SI, GT_UI, LE_SI, LE_UI, LT_SI, LT_UI, NE};
use super::control_flow::{
    CallInstruction, JumpAbsIfInstruction, JumpAbsInstruction, JumpRelIfInstruction,
    JumpRelInstruction,
};
use super::memory::{
    LD_S16, LD_S8, LD_U16, LD_U32, LD_U8, ST_U16, ST_U16_DISCARD, ST_U32, ST_U32_DISCARD, ST_U8,
    ST_U8_DISCARD,
};
use super::registry::InstructionRegistry;
use super::stack_ops::{DropInstruction, DupInstruction, OverInstruction, SwapInstruction};
use super::system::{HaltInstruction, NopInstruction, PushInstruction, SyscallInstruction};

pub fn register_all_instructions(registry: &mut InstructionRegistry) {
    // System (0x00, 0x01, 0x2F)
    registry.register(Box::new(HaltInstruction::new()));
    registry.register(Box::new(NopInstruction::new()));
    registry.register(Box::new(PushInstruction::unsigned()));
    registry.register(Box::new(PushInstruction::signed()));
    registry.register(Box::new(SyscallInstruction::new()));

    // Comparisons (0x02-0x0B)
    for handler in [EQ, NE, LT_SI, LE_SI, GT_SI, GE_SI, LT_UI, LE_UI, GT_UI, GE_UI] {
        registry.register(Box::new(handler));
    }

    // Arithmetic and bitwise (0x0C-0x14)
    for handler in [ADD, SUB, MUL, AND, OR, XOR, SHL, SHR, SAR] {
        registry.register(Box::new(handler));
    }

    // Unary (0x15-0x17)
    for handler in [NOT, LNOT, NEG] {
        registry.register(Box::new(handler));
    }

    // Stack manipulation (0x18-0x1B)
    registry.register(Box::new(DupInstruction));
    registry.register(Box::new(DropInstruction));
    registry.register(Box::new(SwapInstruction));
    registry.register(Box::new(OverInstruction));

    // Loads (0x1C-0x20)
    for handler in [LD_U8, LD_U16, LD_U32, LD_S8, LD_S16] {
        registry.register(Box::new(handler));
    }

    // Stores (0x21-0x26)
    for handler in [ST_U8, ST_U16, ST_U32, ST_U8_DISCARD, ST_U16_DISCARD, ST_U32_DISCARD] {
        registry.register(Box::new(handler));
    }

    // Control flow (0x28-0x2E)
    registry.register(Box::new(CallInstruction::new()));
    registry.register(Box::new(JumpAbsInstruction::new()));
    registry.register(Box::new(JumpAbsIfInstruction::new(true)));
    registry.register(Box::new(JumpAbsIfInstruction::new(false)));
    registry.register(Box::new(JumpRelInstruction::new()));
    registry.register(Box::new(JumpRelIfInstruction::new(true)));
    registry.register(Box::new(JumpRelIfInstruction::new(false)));

    // Block copies (0x30-0x31)
    registry.register(Box::new(DataCopyInstruction));
    registry.register(Box::new(ProgramCopyInstruction));
}
