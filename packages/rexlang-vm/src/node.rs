//! NAPI bindings: a `RexVm` class that owns its program and data buffers.
//!
//! SYSCALL is serviced from JavaScript: `exec` stops with `BadSyscall`, the
//! call number is available from `takePendingSyscall`, the script pops and
//! pushes through the VM, then calls `errorAck` and `exec` again.

use crate::disasm::disassemble;
use crate::error::{code_name, status_code, Fault};
use crate::machine::Machine;
use crate::types::{Registers, VmSnapshot};
use crate::vm::Vm;
use napi::bindgen_prelude::*;
use napi_derive::napi;

fn fault_error(fault: Fault) -> Error {
    Error::new(Status::GenericFailure, format!("{fault} (code {})", fault.code()))
}

#[napi]
pub struct RexVm {
    program: Vec<u8>,
    data: Vec<u8>,
    registers: Registers,
    pending_syscall: Option<u32>,
}

#[napi]
impl RexVm {
    #[napi(constructor)]
    pub fn new(program: Buffer, data_size: u32) -> Self {
        Self {
            program: program.as_ref().to_vec(),
            data: vec![0; data_size as usize],
            registers: Registers::new(),
            pending_syscall: None,
        }
    }

    /// Execute up to `budget` instructions. Returns the status code (0 = budget used up).
    #[napi]
    pub fn exec(&mut self, budget: u32) -> u32 {
        let mut pending = None;
        let mut vm = Vm::with_syscall(&self.program, &mut self.data, |_machine, number| {
            pending = Some(number);
            Err(Fault::BadSyscall)
        });
        vm.restore(self.registers.clone());
        let result = vm.exec(budget);
        self.registers = vm.into_registers();
        if pending.is_some() {
            self.pending_syscall = pending;
        }
        u32::from(status_code(result))
    }

    /// Call number of the last SYSCALL that stopped `exec`, cleared on read.
    #[napi]
    pub fn take_pending_syscall(&mut self) -> Option<u32> {
        self.pending_syscall.take()
    }

    #[napi]
    pub fn error_ack(&mut self) {
        self.registers.err = None;
    }

    #[napi]
    pub fn reset(&mut self) {
        self.registers = Registers::new();
        self.pending_syscall = None;
    }

    #[napi]
    pub fn get_error(&self) -> u32 {
        u32::from(self.registers.error_code())
    }

    #[napi]
    pub fn get_ip(&self) -> u32 {
        self.registers.ip
    }

    #[napi]
    pub fn push(&mut self, value: u32) -> Result<()> {
        self.registers.stack.push(value).map_err(fault_error)
    }

    #[napi]
    pub fn pop(&mut self) -> Result<u32> {
        self.registers.stack.pop().map_err(fault_error)
    }

    #[napi]
    pub fn get_data(&self) -> Buffer {
        Buffer::from(self.data.clone())
    }

    #[napi]
    pub fn set_data(&mut self, offset: u32, bytes: Buffer) -> Result<()> {
        let mut machine = Machine::new(&self.program, &mut self.data);
        machine
            .data_mut()
            .write_bytes(offset, bytes.as_ref())
            .map_err(fault_error)
    }

    /// `{ ip, sp, err, stack }` as JSON, stack top first.
    #[napi]
    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string(&VmSnapshot::from(&self.registers))
            .map_err(|e| Error::new(Status::GenericFailure, e.to_string()))
    }
}

#[napi]
pub fn disassemble_program(program: Buffer) -> Vec<String> {
    disassemble(program.as_ref())
        .into_iter()
        .map(|i| format!("{:04x}: {}", i.address, i.text))
        .collect()
}

#[napi]
pub fn get_error_name(code: u32) -> String {
    code_name(code)
}
