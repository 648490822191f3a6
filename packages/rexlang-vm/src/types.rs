//! VM type definitions: register file, immediate operands, snapshots.

use crate::config::{CLASS_IMM16, CLASS_IMM32, CLASS_IMM8, IMM_CLASS_SHIFT};
use crate::error::Fault;
use crate::instructions::base::sign_extend;
use crate::machine::Machine;
use crate::stack::OperandStack;
use crate::syscall::Syscall;
use serde::{Deserialize, Serialize};

/// Result of executing one instruction handler.
pub type InstructionResult = Result<(), Fault>;

// ============================================================================
// Register file
// ============================================================================

/// Everything that survives between `exec` calls apart from memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub ip: u32,
    pub stack: OperandStack,
    /// Latched fault; `None` means success.
    pub err: Option<Fault>,
}

impl Registers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ip: 0,
            stack: OperandStack::new(),
            err: None,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> u8 {
        self.err.map_or(0, Fault::code)
    }
}

// ============================================================================
// Immediates
// ============================================================================

/// Top two opcode bits: how many immediate bytes follow the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmediateClass {
    None,
    Imm8,
    Imm16,
    Imm32,
}

impl ImmediateClass {
    #[must_use]
    pub const fn from_opcode(opcode: u8) -> Self {
        match opcode >> IMM_CLASS_SHIFT {
            CLASS_IMM8 => Self::Imm8,
            CLASS_IMM16 => Self::Imm16,
            CLASS_IMM32 => Self::Imm32,
            _ => Self::None,
        }
    }

    /// Immediate length in bytes.
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Imm8 => 1,
            Self::Imm16 => 2,
            Self::Imm32 => 4,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.width() * 8
    }
}

/// Immediate operand as read from the program, before extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Immediate {
    raw: u32,
    width: u32,
}

impl Immediate {
    #[must_use]
    pub const fn new(raw: u32, width: u32) -> Self {
        Self { raw, width }
    }

    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Zero-extended value.
    #[must_use]
    pub const fn unsigned(self) -> u32 {
        self.raw
    }

    /// Sign-extended value, as a two's-complement word.
    #[must_use]
    pub const fn signed(self) -> u32 {
        sign_extend(self.raw, self.width)
    }
}

// ============================================================================
// Instruction context
// ============================================================================

/// Everything one instruction handler may touch.
pub struct InstructionContext<'a, 'm> {
    pub machine: &'a mut Machine<'m>,
    pub immediate: Option<Immediate>,
    pub syscall: Option<&'a mut dyn Syscall>,
}

// ============================================================================
// Snapshots
// ============================================================================

/// Serializable view of the register file for hosts and debuggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSnapshot {
    pub ip: u32,
    pub sp: usize,
    pub err: u8,
    /// Live stack entries, top first.
    pub stack: Vec<u32>,
}

impl From<&Registers> for VmSnapshot {
    fn from(registers: &Registers) -> Self {
        Self {
            ip: registers.ip,
            sp: registers.stack.sp(),
            err: registers.error_code(),
            stack: registers.stack.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_comes_from_top_two_bits() {
        assert_eq!(ImmediateClass::from_opcode(0x2F), ImmediateClass::None);
        assert_eq!(ImmediateClass::from_opcode(0x6F), ImmediateClass::Imm8);
        assert_eq!(ImmediateClass::from_opcode(0x80), ImmediateClass::Imm16);
        assert_eq!(ImmediateClass::from_opcode(0xC0), ImmediateClass::Imm32);
        assert_eq!(ImmediateClass::Imm16.bits(), 16);
    }

    #[test]
    fn immediate_extension() {
        let imm = Immediate::new(0x80, 1);
        assert_eq!(imm.unsigned(), 0x80);
        assert_eq!(imm.signed(), 0xFFFF_FF80);
        assert_eq!(Immediate::new(0x7FFF, 2).signed(), 0x7FFF);
        assert_eq!(Immediate::new(0x8000_0000, 4).signed(), 0x8000_0000);
    }

    #[test]
    fn snapshot_serializes_stack_top_first() {
        let mut registers = Registers::new();
        registers.ip = 5;
        registers.stack.push(10).unwrap();
        registers.stack.push(20).unwrap();
        registers.err = Some(Fault::Halted);
        let snapshot = VmSnapshot::from(&registers);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ip": 5, "sp": 62, "err": 1, "stack": [20, 10] })
        );
    }
}
