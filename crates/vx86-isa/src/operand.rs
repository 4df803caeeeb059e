use vx86_regs::{RegName, RegisterFile};

use crate::constant::{resolve_constant, ConstantError};
use crate::error::SyntaxError;

/// A resolved instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(RegName),
    Constant(u64),
}

impl Operand {
    /// Register names win over constants, so `ah` is a register even though it also reads as
    /// the hex literal `0xA`.
    pub fn parse(token: &str) -> Result<Self, SyntaxError> {
        if let Some(name) = RegName::lookup(token) {
            tracing::trace!(token, register = %name, "operand resolved to register");
            return Ok(Operand::Register(name));
        }

        match resolve_constant(token) {
            Ok(value) => {
                tracing::trace!(token, value, "operand resolved to constant");
                Ok(Operand::Constant(value))
            }
            Err(err @ ConstantError::TooLarge(_)) => Err(SyntaxError::InvalidConstant(err)),
            Err(ConstantError::Malformed(_)) => Err(SyntaxError::InvalidOperand(token.to_owned())),
        }
    }

    pub fn value(self, regs: &RegisterFile) -> u64 {
        match self {
            Operand::Register(name) => regs.read(name) as u64,
            Operand::Constant(value) => value,
        }
    }
}
