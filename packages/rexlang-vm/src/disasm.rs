//! Program listing for hosts and debuggers, decoded with the dispatcher's own registry.

use crate::instructions::get_registry;
use crate::memory::ProgramMemory;
use crate::types::{Immediate, ImmediateClass};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisassembledInstruction {
    pub address: u32,
    pub opcode: u8,
    pub immediate: Option<Immediate>,
    /// Mnemonic and immediate, or `??` for an undefined opcode or a truncated immediate.
    pub text: String,
}

/// Decode `program` from address 0. Undefined opcodes occupy one byte; a
/// truncated trailing immediate ends the listing.
#[must_use]
pub fn disassemble(program: &[u8]) -> Vec<DisassembledInstruction> {
    let registry = get_registry();
    let memory = ProgramMemory::new(program);
    let mut listing = Vec::new();
    let mut address: u32 = 0;
    while let Ok(opcode) = memory.read_u8(address) {
        let class = ImmediateClass::from_opcode(opcode);
        let Some(handler) = registry.get_handler(opcode) else {
            listing.push(DisassembledInstruction {
                address,
                opcode,
                immediate: None,
                text: "??".to_string(),
            });
            address += 1;
            continue;
        };
        let width = class.width();
        let immediate = if width == 0 {
            None
        } else {
            match memory.read_le(address + 1, width) {
                Ok(raw) => Some(Immediate::new(raw, width)),
                Err(_) => {
                    listing.push(DisassembledInstruction {
                        address,
                        opcode,
                        immediate: None,
                        text: "??".to_string(),
                    });
                    break;
                }
            }
        };
        listing.push(DisassembledInstruction {
            address,
            opcode,
            immediate,
            text: handler.disassemble(immediate),
        });
        address += 1 + width;
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_mnemonics_and_immediates() {
        let program = [0x40, 0x80, 0x45, 0x7F, 0x6F, 0x00, 0x27, 0x00];
        let text: Vec<String> = disassemble(&program).into_iter().map(|i| i.text).collect();
        assert_eq!(
            text,
            vec!["push-u8 0x80", "le-si-imm8 0x7f", "syscall-imm8 0x0", "??", "halt"]
        );
    }

    #[test]
    fn truncated_immediate_ends_listing() {
        let listing = disassemble(&[0x01, 0x80, 0x34]);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].text, "nop");
        assert_eq!(listing[1].address, 1);
        assert_eq!(listing[1].text, "??");
    }
}
