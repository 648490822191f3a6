//! Control flow: CALL, absolute and relative jumps.
//!
//! `ip` has already moved past the opcode and immediate when these run, so
//! the return address and the base for relative deltas are both the address
//! of the next instruction.

use crate::config::{
    OP_CALL, OP_JUMP_ABS, OP_JUMP_ABS_IF, OP_JUMP_ABS_IF_NOT, OP_JUMP_REL, OP_JUMP_REL_IF,
    OP_JUMP_REL_IF_NOT,
};
use crate::instructions::base::InstructionHandler;
use crate::types::{InstructionContext, InstructionResult};

/// CALL (0x28): pop target (or take the immediate), push the return ip, jump.
pub struct CallInstruction;

impl CallInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for CallInstruction {
    fn selector(&self) -> u8 {
        OP_CALL
    }

    fn name(&self) -> &'static str {
        "call"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let target = context.operand()?;
        let return_ip = context.machine.ip();
        context.machine.push(return_ip)?;
        context.machine.set_ip(target);
        Ok(())
    }
}

impl Default for CallInstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// JUMP-ABS (0x29): pop target (or take the immediate) and jump. The stack
/// form doubles as a return from CALL.
pub struct JumpAbsInstruction;

impl JumpAbsInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for JumpAbsInstruction {
    fn selector(&self) -> u8 {
        OP_JUMP_ABS
    }

    fn name(&self) -> &'static str {
        "jump-abs"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let target = context.operand()?;
        context.machine.set_ip(target);
        Ok(())
    }
}

impl Default for JumpAbsInstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// JUMP-ABS-IF / JUMP-ABS-IF-NOT (0x2A / 0x2B): pop cond, then pop target
/// (or take the immediate). Jumps when `(cond != 0) == when`.
pub struct JumpAbsIfInstruction {
    when: bool,
}

impl JumpAbsIfInstruction {
    #[must_use]
    pub const fn new(when: bool) -> Self {
        Self { when }
    }
}

impl InstructionHandler for JumpAbsIfInstruction {
    fn selector(&self) -> u8 {
        if self.when {
            OP_JUMP_ABS_IF
        } else {
            OP_JUMP_ABS_IF_NOT
        }
    }

    fn name(&self) -> &'static str {
        if self.when {
            "jump-abs-if"
        } else {
            "jump-abs-if-not"
        }
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let cond = context.machine.pop()?;
        let target = context.operand()?;
        if (cond != 0) == self.when {
            context.machine.set_ip(target);
        }
        Ok(())
    }
}

/// JUMP-REL (0x2C): pop delta (or take the sign-extended immediate), push the
/// pre-jump ip, then `ip += delta`.
pub struct JumpRelInstruction;

impl JumpRelInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for JumpRelInstruction {
    fn selector(&self) -> u8 {
        OP_JUMP_REL
    }

    fn name(&self) -> &'static str {
        "jump-rel"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let delta = context.signed_operand()?;
        let ip = context.machine.ip();
        context.machine.push(ip)?;
        context.machine.set_ip(ip.wrapping_add(delta));
        Ok(())
    }
}

impl Default for JumpRelInstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// JUMP-REL-IF / JUMP-REL-IF-NOT (0x2D / 0x2E): pop cond, then pop delta (or
/// take the sign-extended immediate).
pub struct JumpRelIfInstruction {
    when: bool,
}

impl JumpRelIfInstruction {
    #[must_use]
    pub const fn new(when: bool) -> Self {
        Self { when }
    }
}

impl InstructionHandler for JumpRelIfInstruction {
    fn selector(&self) -> u8 {
        if self.when {
            OP_JUMP_REL_IF
        } else {
            OP_JUMP_REL_IF_NOT
        }
    }

    fn name(&self) -> &'static str {
        if self.when {
            "jump-rel-if"
        } else {
            "jump-rel-if-not"
        }
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let cond = context.machine.pop()?;
        let delta = context.signed_operand()?;
        if (cond != 0) == self.when {
            let ip = context.machine.ip();
            context.machine.set_ip(ip.wrapping_add(delta));
        }
        Ok(())
    }
}
