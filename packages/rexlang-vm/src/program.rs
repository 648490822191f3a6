//! Small bytecode builder for hosts that generate scripts, and for tests.

use crate::config::{
    opcode, CLASS_IMM16, CLASS_IMM32, CLASS_IMM8, CLASS_NONE, OP_HALT, OP_PUSH_S, OP_PUSH_U,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramBuilder {
    code: Vec<u8>,
}

impl ProgramBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next instruction will occupy.
    #[must_use]
    pub fn position(&self) -> u32 {
        u32::try_from(self.code.len()).unwrap_or(u32::MAX)
    }

    /// Stack form of `selector`.
    pub fn op(&mut self, selector: u8) -> &mut Self {
        self.code.push(opcode(CLASS_NONE, selector));
        self
    }

    pub fn op_imm8(&mut self, selector: u8, imm: u8) -> &mut Self {
        self.code.push(opcode(CLASS_IMM8, selector));
        self.code.push(imm);
        self
    }

    pub fn op_imm16(&mut self, selector: u8, imm: u16) -> &mut Self {
        self.code.push(opcode(CLASS_IMM16, selector));
        self.code.extend_from_slice(&imm.to_le_bytes());
        self
    }

    pub fn op_imm32(&mut self, selector: u8, imm: u32) -> &mut Self {
        self.code.push(opcode(CLASS_IMM32, selector));
        self.code.extend_from_slice(&imm.to_le_bytes());
        self
    }

    /// Shortest zero-extending immediate form that holds `value`.
    pub fn op_imm(&mut self, selector: u8, value: u32) -> &mut Self {
        if let Ok(v) = u8::try_from(value) {
            self.op_imm8(selector, v)
        } else if let Ok(v) = u16::try_from(value) {
            self.op_imm16(selector, v)
        } else {
            self.op_imm32(selector, value)
        }
    }

    /// Shortest sign-extending immediate form that holds `value`.
    pub fn op_imm_signed(&mut self, selector: u8, value: i32) -> &mut Self {
        if let Ok(v) = i8::try_from(value) {
            self.op_imm8(selector, v as u8)
        } else if let Ok(v) = i16::try_from(value) {
            self.op_imm16(selector, v as u16)
        } else {
            self.op_imm32(selector, value as u32)
        }
    }

    pub fn push(&mut self, value: u32) -> &mut Self {
        self.op_imm(OP_PUSH_U, value)
    }

    pub fn push_signed(&mut self, value: i32) -> &mut Self {
        self.op_imm_signed(OP_PUSH_S, value)
    }

    pub fn halt(&mut self) -> &mut Self {
        self.op(OP_HALT)
    }

    pub fn bytes(&mut self, raw: &[u8]) -> &mut Self {
        self.code.extend_from_slice(raw);
        self
    }

    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        self.code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OP_JUMP_REL;

    #[test]
    fn picks_shortest_encoding() {
        let code = ProgramBuilder::new()
            .push(0x80)
            .push(0x2C00)
            .push(0x1_0000)
            .push_signed(-1)
            .push_signed(-200)
            .op_imm_signed(OP_JUMP_REL, -3)
            .halt()
            .build();
        assert_eq!(
            code,
            vec![
                0x40, 0x80, //
                0x80, 0x00, 0x2C, //
                0xC0, 0x00, 0x00, 0x01, 0x00, //
                0x41, 0xFF, //
                0x81, 0x38, 0xFF, //
                0x6C, 0xFD, //
                0x00,
            ]
        );
    }
}
