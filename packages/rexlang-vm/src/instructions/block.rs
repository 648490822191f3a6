//! Block copies into data memory: DCOPY (data to data), PCOPY (program to data).
//! Operand order: pop len (or take the immediate), pop src, pop dst.

use crate::config::{OP_DCOPY, OP_PCOPY};
use crate::instructions::base::InstructionHandler;
use crate::types::{InstructionContext, InstructionResult};

/// DCOPY (0x30): forward byte-by-byte copy within data memory.
pub struct DataCopyInstruction;

impl InstructionHandler for DataCopyInstruction {
    fn selector(&self) -> u8 {
        OP_DCOPY
    }

    fn name(&self) -> &'static str {
        "dcopy"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let len = context.operand()?;
        let src = context.machine.pop()?;
        let dst = context.machine.pop()?;
        context.machine.data_mut().copy_forward(dst, src, len)
    }
}

/// PCOPY (0x31): copy program bytes into data memory.
pub struct ProgramCopyInstruction;

impl InstructionHandler for ProgramCopyInstruction {
    fn selector(&self) -> u8 {
        OP_PCOPY
    }

    fn name(&self) -> &'static str {
        "pcopy"
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let len = context.operand()?;
        let src = context.machine.pop()?;
        let dst = context.machine.pop()?;
        let bytes = context.machine.program().slice(src, len)?;
        context.machine.data_mut().write_bytes(dst, bytes)
    }
}
