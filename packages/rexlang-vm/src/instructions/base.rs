//! Base instruction handler trait and operand helpers.

use crate::error::Fault;
use crate::types::{Immediate, InstructionContext, InstructionResult};

/// Which opcode classes a handler answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    /// Class 00 only; all operands come from the stack.
    Stack,
    /// Classes 01-11 only.
    Immediate,
    /// Every class; the immediate stands in for one stack operand.
    Both,
}

impl Form {
    #[must_use]
    pub const fn has_stack(self) -> bool {
        matches!(self, Self::Stack | Self::Both)
    }

    #[must_use]
    pub const fn has_immediate(self) -> bool {
        matches!(self, Self::Immediate | Self::Both)
    }
}

pub trait InstructionHandler: Send + Sync {
    fn selector(&self) -> u8;
    fn name(&self) -> &'static str;

    fn form(&self) -> Form {
        Form::Both
    }

    /// Execute the instruction. `ip` already points past the opcode and immediate.
    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult;

    fn disassemble(&self, immediate: Option<Immediate>) -> String {
        match immediate {
            None => self.name().to_string(),
            Some(imm) => format!(
                "{}-imm{} {:#x}",
                self.name(),
                imm.width() * 8,
                imm.unsigned()
            ),
        }
    }
}

/// Binary operation: pops `y` (or takes the immediate), pops `x`, pushes `x OP y`.
pub struct BinaryInstruction {
    selector: u8,
    name: &'static str,
    signed_immediate: bool,
    op: fn(u32, u32) -> u32,
}

impl BinaryInstruction {
    #[must_use]
    pub const fn new(selector: u8, name: &'static str, op: fn(u32, u32) -> u32) -> Self {
        Self {
            selector,
            name,
            signed_immediate: false,
            op,
        }
    }

    /// Same operation with the immediate sign-extended.
    #[must_use]
    pub const fn with_signed_immediate(mut self) -> Self {
        self.signed_immediate = true;
        self
    }
}

impl InstructionHandler for BinaryInstruction {
    fn selector(&self) -> u8 {
        self.selector
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let y = if self.signed_immediate {
            context.signed_operand()?
        } else {
            context.operand()?
        };
        let x = context.machine.pop()?;
        context.machine.push((self.op)(x, y))
    }
}

/// Unary operation on the top of stack. Stack form only.
pub struct UnaryInstruction {
    selector: u8,
    name: &'static str,
    op: fn(u32) -> u32,
}

impl UnaryInstruction {
    #[must_use]
    pub const fn new(selector: u8, name: &'static str, op: fn(u32) -> u32) -> Self {
        Self { selector, name, op }
    }
}

impl InstructionHandler for UnaryInstruction {
    fn selector(&self) -> u8 {
        self.selector
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let x = context.machine.pop()?;
        context.machine.push((self.op)(x))
    }
}

/// Boolean result as a machine word.
#[must_use]
pub const fn flag(value: bool) -> u32 {
    value as u32
}

/// Sign-extend the low `octets` bytes of `value` to 32 bits.
#[must_use]
pub const fn sign_extend(value: u32, octets: u32) -> u32 {
    match octets {
        1 => value as u8 as i8 as i32 as u32,
        2 => value as u16 as i16 as i32 as u32,
        _ => value,
    }
}

impl InstructionContext<'_, '_> {
    /// Zero-extended immediate, or the popped top of stack in the stack form.
    pub fn operand(&mut self) -> Result<u32, Fault> {
        match self.immediate {
            Some(imm) => Ok(imm.unsigned()),
            None => self.machine.pop(),
        }
    }

    /// Sign-extended immediate, or the popped top of stack in the stack form.
    pub fn signed_operand(&mut self) -> Result<u32, Fault> {
        match self.immediate {
            Some(imm) => Ok(imm.signed()),
            None => self.machine.pop(),
        }
    }
}
