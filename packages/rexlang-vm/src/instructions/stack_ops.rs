//! Stack manipulation: DUP, DROP, SWAP, OVER. Stack form only.

use crate::config::{OP_DROP, OP_DUP, OP_OVER, OP_SWAP};
use crate::instructions::base::{Form, InstructionHandler};
use crate::types::{InstructionContext, InstructionResult};

/// DUP (0x18): push a copy of the top of stack.
pub struct DupInstruction;

impl InstructionHandler for DupInstruction {
    fn selector(&self) -> u8 {
        OP_DUP
    }

    fn name(&self) -> &'static str {
        "dup"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let top = context.machine.stack().peek(0)?;
        context.machine.push(top)
    }
}

/// DROP (0x19): pop and discard.
pub struct DropInstruction;

impl InstructionHandler for DropInstruction {
    fn selector(&self) -> u8 {
        OP_DROP
    }

    fn name(&self) -> &'static str {
        "drop"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        context.machine.pop().map(drop)
    }
}

/// SWAP (0x1A): exchange the top two entries.
pub struct SwapInstruction;

impl InstructionHandler for SwapInstruction {
    fn selector(&self) -> u8 {
        OP_SWAP
    }

    fn name(&self) -> &'static str {
        "swap"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let y = context.machine.pop()?;
        let x = context.machine.pop()?;
        context.machine.push(y)?;
        context.machine.push(x)
    }
}

/// OVER (0x1B): push a copy of the second-from-top entry.
pub struct OverInstruction;

impl InstructionHandler for OverInstruction {
    fn selector(&self) -> u8 {
        OP_OVER
    }

    fn name(&self) -> &'static str {
        "over"
    }

    fn form(&self) -> Form {
        Form::Stack
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let second = context.machine.stack().peek(1)?;
        context.machine.push(second)
    }
}
