//! VM fault type. A fault latches in the VM's error register and blocks
//! further execution until the host acknowledges it.

use crate::config::{
    ERR_BAD_OPCODE, ERR_BAD_SYSCALL, ERR_CALL_ARG_OUT_OF_RANGE, ERR_DATA_ADDRESS_OUT_OF_BOUNDS,
    ERR_HALTED, ERR_PROGRAM_ADDRESS_OUT_OF_BOUNDS, ERR_STACK_EMPTY, ERR_STACK_FULL, ERR_SUCCESS,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Fault {
    #[error("program halted")]
    Halted = ERR_HALTED,
    #[error("undefined opcode")]
    BadOpcode = ERR_BAD_OPCODE,
    #[error("operand stack empty")]
    StackEmpty = ERR_STACK_EMPTY,
    #[error("operand stack full")]
    StackFull = ERR_STACK_FULL,
    #[error("data address out of bounds")]
    DataAddressOutOfBounds = ERR_DATA_ADDRESS_OUT_OF_BOUNDS,
    #[error("program address out of bounds")]
    ProgramAddressOutOfBounds = ERR_PROGRAM_ADDRESS_OUT_OF_BOUNDS,
    #[error("unknown syscall")]
    BadSyscall = ERR_BAD_SYSCALL,
    #[error("syscall argument out of range")]
    CallArgOutOfRange = ERR_CALL_ARG_OUT_OF_RANGE,
}

impl Fault {
    /// Numeric code reported to hosts. Success is 0 and never a `Fault`.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            ERR_HALTED => Some(Self::Halted),
            ERR_BAD_OPCODE => Some(Self::BadOpcode),
            ERR_STACK_EMPTY => Some(Self::StackEmpty),
            ERR_STACK_FULL => Some(Self::StackFull),
            ERR_DATA_ADDRESS_OUT_OF_BOUNDS => Some(Self::DataAddressOutOfBounds),
            ERR_PROGRAM_ADDRESS_OUT_OF_BOUNDS => Some(Self::ProgramAddressOutOfBounds),
            ERR_BAD_SYSCALL => Some(Self::BadSyscall),
            ERR_CALL_ARG_OUT_OF_RANGE => Some(Self::CallArgOutOfRange),
            _ => None,
        }
    }

    /// Halt is the only fault a well-formed program raises on purpose.
    #[must_use]
    pub const fn is_halt(self) -> bool {
        matches!(self, Self::Halted)
    }
}

/// Display name for a wire code, as reported to hosts.
#[must_use]
pub fn code_name(code: u32) -> String {
    match u8::try_from(code) {
        Ok(ERR_SUCCESS) => "success".to_string(),
        Ok(code) => Fault::from_code(code)
            .map_or_else(|| format!("unknown error {code}"), |fault| fault.to_string()),
        Err(_) => format!("unknown error {code}"),
    }
}

/// Flatten an execution outcome to its wire code.
#[must_use]
pub fn status_code(result: Result<(), Fault>) -> u8 {
    match result {
        Ok(()) => ERR_SUCCESS,
        Err(fault) => fault.code(),
    }
}
