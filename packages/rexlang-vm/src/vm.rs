//! The VM driver: budgeted execution, the fault latch and the
//! acknowledge/reset protocol.

use crate::error::Fault;
use crate::instructions::get_registry;
use crate::instructions::registry::InstructionRegistry;
use crate::machine::Machine;
use crate::syscall::{NoSyscall, Syscall};
use crate::types::{ImmediateClass, InstructionContext, InstructionResult, Registers, VmSnapshot};

/// Execution status derived from the error register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ready,
    Faulted(Fault),
}

/// A VM over host-owned program and data buffers.
///
/// Nothing is allocated after construction. Program memory is read-only;
/// data memory persists across `reset`.
pub struct Vm<'m, S = NoSyscall> {
    machine: Machine<'m>,
    syscall: Option<S>,
}

impl<'m> Vm<'m, NoSyscall> {
    /// VM with no syscall hook; any SYSCALL raises `BadSyscall`.
    #[must_use]
    pub fn new(program: &'m [u8], data: &'m mut [u8]) -> Self {
        Self {
            machine: Machine::new(program, data),
            syscall: None,
        }
    }
}

impl<'m, F> Vm<'m, F>
where
    F: FnMut(&mut Machine<'_>, u32) -> Result<(), Fault>,
{
    /// VM whose SYSCALL instructions call `hook(machine, number)`.
    #[must_use]
    pub fn with_syscall(program: &'m [u8], data: &'m mut [u8], hook: F) -> Self {
        Self {
            machine: Machine::new(program, data),
            syscall: Some(hook),
        }
    }
}

impl<'m, S: Syscall> Vm<'m, S> {
    /// VM whose SYSCALL instructions go to a `Syscall` implementor such as a `SyscallTable`.
    #[must_use]
    pub fn with_handler(program: &'m [u8], data: &'m mut [u8], handler: S) -> Self {
        Self {
            machine: Machine::new(program, data),
            syscall: Some(handler),
        }
    }

    /// Execute up to `budget` instructions.
    ///
    /// Returns `Ok(())` when the budget runs out without a fault. The first
    /// fault (including `Halted`) latches and is returned; while latched, this
    /// returns the same fault without executing anything.
    pub fn exec(&mut self, budget: u32) -> Result<(), Fault> {
        if let Some(fault) = self.machine.registers().err {
            return Err(fault);
        }
        let registry = get_registry();
        for _ in 0..budget {
            if let Err(fault) = self.dispatch(registry) {
                self.machine.registers_mut().err = Some(fault);
                tracing::debug!(ip = self.machine.ip(), %fault, "vm fault latched");
                return Err(fault);
            }
        }
        Ok(())
    }

    /// Execute exactly one instruction.
    pub fn step(&mut self) -> Result<(), Fault> {
        self.exec(1)
    }

    /// Run until the program halts, treating `Halted` as success. Returns the
    /// number of instructions executed, including the halt. Running out of
    /// `limit` leaves the VM ready and is reported as `Ok` with `limit`.
    pub fn run_to_halt(&mut self, limit: u32) -> Result<u32, Fault> {
        if let Some(fault) = self.machine.registers().err {
            return Err(fault);
        }
        for executed in 1..=limit {
            match self.exec(1) {
                Ok(()) => {}
                Err(fault) if fault.is_halt() => return Ok(executed),
                Err(fault) => return Err(fault),
            }
        }
        Ok(limit)
    }

    #[cfg_attr(not(feature = "trace_instructions"), allow(unused_variables))]
    fn dispatch(&mut self, registry: &'static InstructionRegistry) -> InstructionResult {
        let ip = self.machine.ip();
        let opcode = self.machine.fetch_opcode()?;
        let Some(handler) = registry.get_handler(opcode) else {
            return Err(Fault::BadOpcode);
        };
        let immediate = self
            .machine
            .fetch_immediate(ImmediateClass::from_opcode(opcode))?;
        vm_trace!(ip, opcode, name = handler.name(), ?immediate, "dispatch");
        let mut context = InstructionContext {
            machine: &mut self.machine,
            immediate,
            syscall: self.syscall.as_mut().map(|s| s as &mut dyn Syscall),
        };
        handler.execute(&mut context)
    }

    /// Clear the latched fault, resuming at the current `ip`.
    pub fn error_ack(&mut self) {
        let registers = self.machine.registers_mut();
        if let Some(fault) = registers.err.take() {
            tracing::debug!(ip = registers.ip, %fault, "fault acknowledged");
        }
    }

    /// Rewind `ip`, empty and zero the stack, clear the error. Data memory is kept.
    pub fn reset(&mut self) {
        *self.machine.registers_mut() = Registers::new();
        tracing::debug!("vm reset");
    }

    #[must_use]
    pub fn status(&self) -> Status {
        match self.machine.registers().err {
            None => Status::Ready,
            Some(fault) => Status::Faulted(fault),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<Fault> {
        self.machine.registers().err
    }

    #[must_use]
    pub fn ip(&self) -> u32 {
        self.machine.ip()
    }

    #[must_use]
    pub fn registers(&self) -> &Registers {
        self.machine.registers()
    }

    /// Resume a run parked with `registers()` or `into_registers()`.
    pub fn restore(&mut self, registers: Registers) {
        *self.machine.registers_mut() = registers;
    }

    #[must_use]
    pub fn into_registers(self) -> Registers {
        self.machine.registers().clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> VmSnapshot {
        VmSnapshot::from(self.machine.registers())
    }

    #[must_use]
    pub fn machine(&self) -> &Machine<'m> {
        &self.machine
    }

    /// Host access to the stack and data memory between runs.
    pub fn machine_mut(&mut self) -> &mut Machine<'m> {
        &mut self.machine
    }
}
