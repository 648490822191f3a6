//! rexlang VM: a small stack bytecode machine that lets a constrained host run
//! short scripts against memory-mapped chips without reflashing firmware.
//!
//! The host owns the program and data buffers, drives execution with
//! [`Vm::exec`] in bounded slices, and services SYSCALL instructions through a
//! hook. Faults latch until acknowledged with [`Vm::error_ack`] or cleared with
//! [`Vm::reset`].

/// Per-instruction trace events. No-op unless built with `--features trace_instructions`.
#[macro_export]
macro_rules! vm_trace {
    ($($t:tt)*) => {
        #[cfg(feature = "trace_instructions")]
        ::tracing::trace!($($t)*);
    };
}

pub mod config;
pub mod disasm;
pub mod error;
pub mod instructions;
pub mod machine;
pub mod memory;
pub mod program;
pub mod stack;
pub mod syscall;
pub mod types;
pub mod vm;

#[cfg(feature = "node")]
mod node;

pub use disasm::{disassemble, DisassembledInstruction};
pub use error::{code_name, status_code, Fault};
pub use machine::Machine;
pub use program::ProgramBuilder;
pub use stack::OperandStack;
pub use syscall::{NoSyscall, Syscall, SyscallHandler, SyscallTable};
pub use types::{Immediate, ImmediateClass, Registers, VmSnapshot};
pub use vm::{Status, Vm};
