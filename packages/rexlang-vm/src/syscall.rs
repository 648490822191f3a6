//! The external-call boundary.
//!
//! A SYSCALL instruction hands the machine and the call number to the host
//! hook. Hooks pop arguments and push results through the machine; returning
//! `Err(fault)` aborts the instruction exactly like an internal fault.

use crate::error::Fault;
use crate::machine::Machine;
use std::collections::HashMap;

pub trait Syscall {
    fn invoke(&mut self, machine: &mut Machine<'_>, number: u32) -> Result<(), Fault>;
}

impl<F> Syscall for F
where
    F: FnMut(&mut Machine<'_>, u32) -> Result<(), Fault>,
{
    fn invoke(&mut self, machine: &mut Machine<'_>, number: u32) -> Result<(), Fault> {
        self(machine, number)
    }
}

/// Hook type for a VM built without one. Every call is a `BadSyscall`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSyscall;

impl Syscall for NoSyscall {
    fn invoke(&mut self, _machine: &mut Machine<'_>, _number: u32) -> Result<(), Fault> {
        Err(Fault::BadSyscall)
    }
}

/// One registered syscall body.
pub trait SyscallHandler {
    fn number(&self) -> u32;
    fn name(&self) -> &'static str;
    fn execute(&mut self, machine: &mut Machine<'_>) -> Result<(), Fault>;
}

/// Call-number-keyed table of handlers, usable as a VM hook.
#[derive(Default)]
pub struct SyscallTable<'h> {
    handlers: HashMap<u32, Box<dyn SyscallHandler + 'h>>,
}

impl<'h> SyscallTable<'h> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Install `handler` under its call number, returning any handler it replaced.
    pub fn register(
        &mut self,
        handler: Box<dyn SyscallHandler + 'h>,
    ) -> Option<Box<dyn SyscallHandler + 'h>> {
        self.handlers.insert(handler.number(), handler)
    }

    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.handlers.contains_key(&number)
    }

    /// Registered call numbers, ascending.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.handlers.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Syscall for SyscallTable<'_> {
    fn invoke(&mut self, machine: &mut Machine<'_>, number: u32) -> Result<(), Fault> {
        match self.handlers.get_mut(&number) {
            Some(handler) => {
                tracing::trace!(number, name = handler.name(), "syscall");
                handler.execute(machine)
            }
            None => {
                tracing::debug!(number, "no handler registered for syscall");
                Err(Fault::BadSyscall)
            }
        }
    }
}
