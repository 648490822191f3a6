//! Machine state shared by instruction handlers and syscall hooks.
//!
//! Hooks receive `&mut Machine` for the duration of one syscall. They can use
//! the stack and data memory but cannot move the instruction pointer.

use crate::error::Fault;
use crate::memory::{DataMemory, ProgramMemory};
use crate::stack::OperandStack;
use crate::types::{Immediate, ImmediateClass, Registers};

#[derive(Debug)]
pub struct Machine<'m> {
    program: ProgramMemory<'m>,
    data: DataMemory<'m>,
    registers: Registers,
}

impl<'m> Machine<'m> {
    #[must_use]
    pub fn new(program: &'m [u8], data: &'m mut [u8]) -> Self {
        Self {
            program: ProgramMemory::new(program),
            data: DataMemory::new(data),
            registers: Registers::new(),
        }
    }

    #[must_use]
    pub const fn ip(&self) -> u32 {
        self.registers.ip
    }

    pub(crate) fn set_ip(&mut self, ip: u32) {
        self.registers.ip = ip;
    }

    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }

    pub(crate) fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    #[must_use]
    pub const fn stack(&self) -> &OperandStack {
        &self.registers.stack
    }

    #[must_use]
    pub const fn program(&self) -> ProgramMemory<'m> {
        self.program
    }

    #[must_use]
    pub const fn data(&self) -> &DataMemory<'m> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataMemory<'m> {
        &mut self.data
    }

    pub fn push(&mut self, value: u32) -> Result<(), Fault> {
        self.registers.stack.push(value)
    }

    pub fn pop(&mut self) -> Result<u32, Fault> {
        self.registers.stack.pop()
    }

    /// Raise `fault` from a syscall hook: `return machine.raise(Fault::BadSyscall);`
    pub fn raise<T>(&self, fault: Fault) -> Result<T, Fault> {
        tracing::debug!(ip = self.registers.ip, %fault, "fault raised by host");
        Err(fault)
    }

    /// Pop a syscall argument that must fit in a byte.
    pub fn pop_arg_u8(&mut self) -> Result<u8, Fault> {
        let value = self.pop()?;
        u8::try_from(value).map_err(|_| Fault::CallArgOutOfRange)
    }

    /// Pop a syscall argument that must fit in 16 bits.
    pub fn pop_arg_u16(&mut self) -> Result<u16, Fault> {
        let value = self.pop()?;
        u16::try_from(value).map_err(|_| Fault::CallArgOutOfRange)
    }

    /// Read the opcode at `ip` and step past it. Leaves `ip` alone on failure.
    pub(crate) fn fetch_opcode(&mut self) -> Result<u8, Fault> {
        let opcode = self.program.read_u8(self.registers.ip)?;
        self.registers.ip = self.registers.ip.wrapping_add(1);
        Ok(opcode)
    }

    pub(crate) fn fetch_immediate(
        &mut self,
        class: ImmediateClass,
    ) -> Result<Option<Immediate>, Fault> {
        let width = class.width();
        if width == 0 {
            return Ok(None);
        }
        let raw = self.program.read_le(self.registers.ip, width)?;
        self.registers.ip = self.registers.ip.wrapping_add(width);
        Ok(Some(Immediate::new(raw, width)))
    }
}
