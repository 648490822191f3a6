//! Instruction registry: one dispatch entry per selector, with separate slots
//! for the stack form and the immediate forms.

use crate::config::{SELECTOR_COUNT, SELECTOR_MASK};
use crate::instructions::base::InstructionHandler;
use crate::types::ImmediateClass;

#[derive(Clone, Copy, Debug, Default)]
struct DispatchEntry {
    stack: Option<usize>,
    immediate: Option<usize>,
}

impl DispatchEntry {
    const EMPTY: Self = Self {
        stack: None,
        immediate: None,
    };
}

/// Central registry mapping opcodes to instruction handlers.
pub struct InstructionRegistry {
    handlers: Vec<Box<dyn InstructionHandler>>,
    table: [DispatchEntry; SELECTOR_COUNT],
}

impl InstructionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            table: [DispatchEntry::EMPTY; SELECTOR_COUNT],
        }
    }

    /// Install `handler` under its selector for every class its form covers,
    /// replacing whatever was there.
    pub fn register(&mut self, handler: Box<dyn InstructionHandler>) {
        let index = self.handlers.len();
        let form = handler.form();
        let entry = &mut self.table[usize::from(handler.selector() & SELECTOR_MASK)];
        if form.has_stack() {
            entry.stack = Some(index);
        }
        if form.has_immediate() {
            entry.immediate = Some(index);
        }
        self.handlers.push(handler);
    }

    #[must_use]
    pub fn get_handler(&self, opcode: u8) -> Option<&dyn InstructionHandler> {
        let entry = self.table[usize::from(opcode & SELECTOR_MASK)];
        let index = match ImmediateClass::from_opcode(opcode) {
            ImmediateClass::None => entry.stack,
            _ => entry.immediate,
        }?;
        self.handlers.get(index).map(|b| b.as_ref())
    }

    #[must_use]
    pub fn has_handler(&self, opcode: u8) -> bool {
        self.get_handler(opcode).is_some()
    }

    /// Every opcode byte that decodes to a handler, ascending.
    #[must_use]
    pub fn registered_opcodes(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&op| self.has_handler(op)).collect()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
        self.table = [DispatchEntry::EMPTY; SELECTOR_COUNT];
    }
}

impl Default for InstructionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{opcode, CLASS_IMM16, CLASS_IMM8, CLASS_NONE, OP_DUP, OP_HALT, OP_PUSH_U};
    use crate::instructions::registry_instructions::register_all_instructions;

    fn full_registry() -> InstructionRegistry {
        let mut registry = InstructionRegistry::new();
        register_all_instructions(&mut registry);
        registry
    }

    #[test]
    fn selector_zero_splits_by_class() {
        let registry = full_registry();
        let halt = registry.get_handler(opcode(CLASS_NONE, OP_HALT)).unwrap();
        let push = registry.get_handler(opcode(CLASS_IMM8, OP_PUSH_U)).unwrap();
        assert_eq!(halt.name(), "halt");
        assert_eq!(push.name(), "push-u");
    }

    #[test]
    fn stack_only_and_reserved_selectors_have_no_immediate_form() {
        let registry = full_registry();
        assert!(registry.has_handler(opcode(CLASS_NONE, OP_DUP)));
        assert!(!registry.has_handler(opcode(CLASS_IMM16, OP_DUP)));
        assert!(!registry.has_handler(0x27));
        for selector in 0x32..=0x3F {
            assert!(!registry.has_handler(selector));
            assert!(!registry.has_handler(opcode(CLASS_IMM8, selector)));
        }
    }

    #[test]
    fn registered_opcode_count() {
        // 49 selectors in the stack form; 7 of them (0x00, 0x01 and 0x15-0x1B)
        // have no immediate form of their own, but 0x00/0x01 gain push.
        let registry = full_registry();
        let opcodes = registry.registered_opcodes();
        assert_eq!(opcodes.len(), 49 + 3 * (49 - 7));
        registry.get_handler(0x00).unwrap();
    }
}
