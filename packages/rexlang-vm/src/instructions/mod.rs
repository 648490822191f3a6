//! Instruction set. One handler per selector (and per form where the stack
//! and immediate forms differ), collected by `registry_instructions`.

pub mod arithmetic;
pub mod base;
pub mod bitwise;
pub mod block;
pub mod comparison;
pub mod control_flow;
pub mod memory;
pub mod registry;
pub mod registry_instructions;
pub mod stack_ops;
pub mod system;

use registry::InstructionRegistry;
use registry_instructions::register_all_instructions;
use std::sync::OnceLock;

/// Process-wide registry with every instruction installed.
pub fn get_registry() -> &'static InstructionRegistry {
    static REGISTRY: OnceLock<InstructionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = InstructionRegistry::new();
        register_all_instructions(&mut registry);
        registry
    })
}
