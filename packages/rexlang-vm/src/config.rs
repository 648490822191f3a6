//! VM configuration constants: stack sizing, opcode layout, fault codes and the selector table.

// ============================================================================
// Stack Configuration
// ============================================================================
/// Operand stack capacity in 32-bit words. The stack grows downward from here.
pub const STACK_CAPACITY: usize = 64;

// ============================================================================
// Opcode Layout
// ============================================================================
// opcode = (immediate class << 6) | selector
pub const IMM_CLASS_SHIFT: u8 = 6;
pub const SELECTOR_MASK: u8 = 0x3F;
pub const SELECTOR_COUNT: usize = 64;

pub const CLASS_NONE: u8 = 0b00;
pub const CLASS_IMM8: u8 = 0b01;
pub const CLASS_IMM16: u8 = 0b10;
pub const CLASS_IMM32: u8 = 0b11;

/// Build an opcode byte from an immediate class and a selector.
#[must_use]
pub const fn opcode(class: u8, selector: u8) -> u8 {
    ((class & 0b11) << IMM_CLASS_SHIFT) | (selector & SELECTOR_MASK)
}

// ============================================================================
// Fault Codes
// ============================================================================
pub const ERR_SUCCESS: u8 = 0;
pub const ERR_HALTED: u8 = 1;
pub const ERR_BAD_OPCODE: u8 = 2;
pub const ERR_STACK_EMPTY: u8 = 3;
pub const ERR_STACK_FULL: u8 = 4;
pub const ERR_DATA_ADDRESS_OUT_OF_BOUNDS: u8 = 5;
pub const ERR_PROGRAM_ADDRESS_OUT_OF_BOUNDS: u8 = 6;
pub const ERR_BAD_SYSCALL: u8 = 7;
pub const ERR_CALL_ARG_OUT_OF_RANGE: u8 = 8;

// ============================================================================
// Selectors
// ============================================================================
// 0x00 and 0x01 change meaning with the immediate class.
pub const OP_HALT: u8 = 0x00; // stack form
pub const OP_PUSH_U: u8 = 0x00; // immediate forms, zero-extend
pub const OP_NOP: u8 = 0x01; // stack form
pub const OP_PUSH_S: u8 = 0x01; // immediate forms, sign-extend

// Comparisons, result 1 or 0
pub const OP_EQ: u8 = 0x02;
pub const OP_NE: u8 = 0x03;
pub const OP_LT_SI: u8 = 0x04;
pub const OP_LE_SI: u8 = 0x05;
pub const OP_GT_SI: u8 = 0x06;
pub const OP_GE_SI: u8 = 0x07;
pub const OP_LT_UI: u8 = 0x08;
pub const OP_LE_UI: u8 = 0x09;
pub const OP_GT_UI: u8 = 0x0A;
pub const OP_GE_UI: u8 = 0x0B;

// Arithmetic and bitwise, wrapping
pub const OP_ADD: u8 = 0x0C;
pub const OP_SUB: u8 = 0x0D;
pub const OP_MUL: u8 = 0x0E;
pub const OP_AND: u8 = 0x0F;
pub const OP_OR: u8 = 0x10;
pub const OP_XOR: u8 = 0x11;
pub const OP_SHL: u8 = 0x12;
pub const OP_SHR: u8 = 0x13;
pub const OP_SAR: u8 = 0x14;

// Unary, stack form only
pub const OP_NOT: u8 = 0x15;
pub const OP_LNOT: u8 = 0x16;
pub const OP_NEG: u8 = 0x17;

// Stack manipulation, stack form only
pub const OP_DUP: u8 = 0x18;
pub const OP_DROP: u8 = 0x19;
pub const OP_SWAP: u8 = 0x1A;
pub const OP_OVER: u8 = 0x1B;

// Data memory loads
pub const OP_LD_U8: u8 = 0x1C;
pub const OP_LD_U16: u8 = 0x1D;
pub const OP_LD_U32: u8 = 0x1E;
pub const OP_LD_S8: u8 = 0x1F;
pub const OP_LD_S16: u8 = 0x20;

// Data memory stores. The first three push the stored value back.
pub const OP_ST_U8: u8 = 0x21;
pub const OP_ST_U16: u8 = 0x22;
pub const OP_ST_U32: u8 = 0x23;
pub const OP_ST_U8_DISCARD: u8 = 0x24;
pub const OP_ST_U16_DISCARD: u8 = 0x25;
pub const OP_ST_U32_DISCARD: u8 = 0x26;

// Control flow
pub const OP_CALL: u8 = 0x28;
pub const OP_JUMP_ABS: u8 = 0x29;
pub const OP_JUMP_ABS_IF: u8 = 0x2A;
pub const OP_JUMP_ABS_IF_NOT: u8 = 0x2B;
pub const OP_JUMP_REL: u8 = 0x2C;
pub const OP_JUMP_REL_IF: u8 = 0x2D;
pub const OP_JUMP_REL_IF_NOT: u8 = 0x2E;

// System
pub const OP_SYSCALL: u8 = 0x2F;

// Block copies into data memory
pub const OP_DCOPY: u8 = 0x30;
pub const OP_PCOPY: u8 = 0x31;
