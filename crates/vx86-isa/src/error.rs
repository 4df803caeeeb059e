use thiserror::Error;
use vx86_regs::RegisterError;

use crate::constant::ConstantError;
use crate::syscall::Syscall;

pub type Result<T> = std::result::Result<T, X86Error>;

/// Malformed input to an instruction. The register file is never touched when one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("invalid operand count for {mnemonic}: expected {expected}, got {got}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    #[error("invalid operand: {0}")]
    InvalidConstant(#[from] ConstantError),

    #[error("unknown argument for int: {0:#x}")]
    InterruptVector(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum X86Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Includes sub-register writes that exceed the view's width.
    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error("sorry, {0} is not supported")]
    UnsupportedSyscall(Syscall),

    #[error("sorry, {syscall} only supports stdout (fd 1), got fd {fd}")]
    UnsupportedFileDescriptor { syscall: Syscall, fd: u32 },

    #[error("unknown syscall number {0} in eax")]
    UnknownSyscall(u32),

    #[error("invalid command: {0}")]
    UnknownCommand(String),
}

impl X86Error {
    pub fn is_operand_range(&self) -> bool {
        matches!(self, X86Error::Register(RegisterError::OperandRange { .. }))
    }
}

impl From<ConstantError> for X86Error {
    fn from(err: ConstantError) -> Self {
        X86Error::Syntax(SyntaxError::InvalidConstant(err))
    }
}
