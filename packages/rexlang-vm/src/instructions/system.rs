//! System instructions: HALT, NOP, PUSH and SYSCALL.

use crate::config::{OP_HALT, OP_NOP, OP_PUSH_S, OP_PUSH_U, OP_SYSCALL};
use crate::error::Fault;
use crate::instructions::base::{Form, InstructionHandler};
use crate::types::{Immediate, InstructionContext, InstructionResult};

/// HALT (selector 0x00, stack form): stop with the Halted fault.
pub struct HaltInstruction;

impl HaltInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for HaltInstruction {
    fn selector(&self) -> u8 {
        OP_HALT
    }

    fn name(&self) -> &'static str {
        "halt"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, _context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        Err(Fault::Halted)
    }
}

impl Default for HaltInstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// NOP (selector 0x01, stack form).
pub struct NopInstruction;

impl NopInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for NopInstruction {
    fn selector(&self) -> u8 {
        OP_NOP
    }

    fn name(&self) -> &'static str {
        "nop"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, _context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        Ok(())
    }
}

impl Default for NopInstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// PUSH-U / PUSH-S (selectors 0x00 / 0x01, immediate forms): push the
/// immediate, zero- or sign-extended.
pub struct PushInstruction {
    signed: bool,
}

impl PushInstruction {
    #[must_use]
    pub const fn unsigned() -> Self {
        Self { signed: false }
    }

    #[must_use]
    pub const fn signed() -> Self {
        Self { signed: true }
    }
}

impl InstructionHandler for PushInstruction {
    fn selector(&self) -> u8 {
        if self.signed {
            OP_PUSH_S
        } else {
            OP_PUSH_U
        }
    }

    fn name(&self) -> &'static str {
        if self.signed {
            "push-s"
        } else {
            "push-u"
        }
    }

    fn form(&self) -> Form {
        Form::Immediate
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let value = if self.signed {
            context.signed_operand()?
        } else {
            context.operand()?
        };
        context.machine.push(value)
    }

    fn disassemble(&self, immediate: Option<Immediate>) -> String {
        match immediate {
            Some(imm) => format!("{}{} {:#x}", self.name(), imm.width() * 8, imm.unsigned()),
            None => self.name().to_string(),
        }
    }
}

/// SYSCALL (selector 0x2F): pop the call number (or take it from the
/// immediate) and hand control to the host hook.
pub struct SyscallInstruction;

impl SyscallInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SyscallInstruction {
    fn selector(&self) -> u8 {
        OP_SYSCALL
    }

    fn name(&self) -> &'static str {
        "syscall"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let number = context.operand()?;
        match context.syscall.as_mut() {
            Some(hook) => hook.invoke(context.machine, number),
            None => {
                tracing::debug!(number, "syscall with no hook installed");
                Err(Fault::BadSyscall)
            }
        }
    }
}

impl Default for SyscallInstruction {
    fn default() -> Self {
        Self::new()
    }
}
