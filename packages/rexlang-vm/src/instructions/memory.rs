//! Data memory loads and stores. Addresses come from the stack or the
//! zero-extended immediate; every access is range-checked.

use crate::config::{
    OP_LD_S16, OP_LD_S8, OP_LD_U16, OP_LD_U32, OP_LD_U8, OP_ST_U16, OP_ST_U16_DISCARD, OP_ST_U32,
    OP_ST_U32_DISCARD, OP_ST_U8, OP_ST_U8_DISCARD,
};
use crate::instructions::base::{sign_extend, InstructionHandler};
use crate::types::{InstructionContext, InstructionResult};

/// LD-{U,S}{8,16,32}: pop address (or take the immediate) and push the loaded word.
pub struct LoadInstruction {
    selector: u8,
    name: &'static str,
    width: u32,
    signed: bool,
}

impl LoadInstruction {
    #[must_use]
    pub const fn new(selector: u8, name: &'static str, width: u32, signed: bool) -> Self {
        Self {
            selector,
            name,
            width,
            signed,
        }
    }
}

impl InstructionHandler for LoadInstruction {
    fn selector(&self) -> u8 {
        self.selector
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let address = context.operand()?;
        let raw = context.machine.data().read(address, self.width)?;
        let value = if self.signed {
            sign_extend(raw, self.width)
        } else {
            raw
        };
        context.machine.push(value)
    }
}

/// ST-U{8,16,32}[-DISCARD]: pop value, then pop address (or take the
/// immediate), store the low `width` bytes. The keeping variants push the
/// stored value back.
pub struct StoreInstruction {
    selector: u8,
    name: &'static str,
    width: u32,
    keep: bool,
}

impl StoreInstruction {
    #[must_use]
    pub const fn new(selector: u8, name: &'static str, width: u32, keep: bool) -> Self {
        Self {
            selector,
            name,
            width,
            keep,
        }
    }
}

impl InstructionHandler for StoreInstruction {
    fn selector(&self) -> u8 {
        self.selector
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, context: &mut InstructionContext<'_, '_>) -> InstructionResult {
        let value = context.machine.pop()?;
        let address = context.operand()?;
        context.machine.data_mut().write(address, self.width, value)?;
        if self.keep {
            let mask = u32::MAX >> (32 - self.width * 8);
            context.machine.push(value & mask)?;
        }
        Ok(())
    }
}

pub const LD_U8: LoadInstruction = LoadInstruction::new(OP_LD_U8, "ld-u8", 1, false);
pub const LD_U16: LoadInstruction = LoadInstruction::new(OP_LD_U16, "ld-u16", 2, false);
pub const LD_U32: LoadInstruction = LoadInstruction::new(OP_LD_U32, "ld-u32", 4, false);
pub const LD_S8: LoadInstruction = LoadInstruction::new(OP_LD_S8, "ld-s8", 1, true);
pub const LD_S16: LoadInstruction = LoadInstruction::new(OP_LD_S16, "ld-s16", 2, true);

pub const ST_U8: StoreInstruction = StoreInstruction::new(OP_ST_U8, "st-u8", 1, true);
pub const ST_U16: StoreInstruction = StoreInstruction::new(OP_ST_U16, "st-u16", 2, true);
pub const ST_U32: StoreInstruction = StoreInstruction::new(OP_ST_U32, "st-u32", 4, true);
pub const ST_U8_DISCARD: StoreInstruction =
    StoreInstruction::new(OP_ST_U8_DISCARD, "st-u8-discard", 1, false);
pub const ST_U16_DISCARD: StoreInstruction =
    StoreInstruction::new(OP_ST_U16_DISCARD, "st-u16-discard", 2, false);
pub const ST_U32_DISCARD: StoreInstruction =
    StoreInstruction::new(OP_ST_U32_DISCARD, "st-u32-discard", 4, false);
