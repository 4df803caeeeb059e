use std::fmt;
use std::str::FromStr;

use vx86_regs::{Gpr, Overflow, RegName, RegisterFile};

use crate::constant::resolve_constant;
use crate::error::{Result, SyntaxError, X86Error};
use crate::operand::Operand;
use crate::syscall::Syscall;

/// The instructions the engine understands. Mnemonics are matched exactly (lowercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Mov,
    Int,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Mov, Operation::Int];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Mov => "mov",
            Operation::Int => "int",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Operation {
    type Err = X86Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| X86Error::UnknownCommand(s.to_owned()))
    }
}

/// Side effect requested by a syscall. The engine never performs these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Exit { status: u32 },
    /// Acknowledged write to stdout. There is no memory, so `buf` is only the raw `ecx` value.
    Write { fd: u32, buf: u32, count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Executed {
        operation: Operation,
        warnings: Vec<Overflow>,
        effect: Option<Effect>,
    },
    /// A bare register name was given as a command; the value is returned for display.
    Register { name: RegName, value: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    regs: RegisterFile,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn reset(&mut self) {
        self.regs.reset();
    }

    pub fn is_operation(name: &str) -> bool {
        Operation::lookup(name).is_some()
    }

    /// Runs one command line that has already been split into a command name and its tokens.
    ///
    /// Operation names are tried first, then register names (a read-only shortcut that returns
    /// the register's value). Anything else is [`X86Error::UnknownCommand`].
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<Outcome> {
        if let Some(operation) = Operation::lookup(command) {
            return self.run(operation, args);
        }

        if let Some(name) = RegName::lookup(command) {
            return Ok(Outcome::Register {
                name,
                value: self.regs.read(name),
            });
        }

        Err(X86Error::UnknownCommand(command.to_owned()))
    }

    pub fn run(&mut self, operation: Operation, args: &[&str]) -> Result<Outcome> {
        let (warnings, effect): (Vec<Overflow>, Option<Effect>) = match operation {
            Operation::Mov => (self.mov(args)?.into_iter().collect(), None),
            Operation::Int => (Vec::new(), Some(self.int(args)?)),
        };
        Ok(Outcome::Executed {
            operation,
            warnings,
            effect,
        })
    }

    /// `mov dst, src`: copies a register or constant into a register.
    ///
    /// The tokens are re-joined and split on `,`, so `mov eax, 1` and `mov eax,1` are the same.
    pub fn mov(&mut self, args: &[&str]) -> Result<Option<Overflow>> {
        let [dst, src] = split_operands::<2>("mov", args)?;

        let dst_name =
            RegName::lookup(&dst).ok_or_else(|| SyntaxError::InvalidOperand(dst.clone()))?;
        let value = Operand::parse(&src)?.value(&self.regs);

        let overflow = self.regs.write(dst_name, value)?;
        tracing::debug!(dst = %dst_name, src = %src, value, "mov");
        Ok(overflow)
    }

    /// `int 0x80`: dispatches a syscall on `eax`.
    pub fn int(&mut self, args: &[&str]) -> Result<Effect> {
        let [vector] = args else {
            return Err(SyntaxError::OperandCount {
                mnemonic: "int",
                expected: 1,
                got: args.len(),
            }
            .into());
        };

        let vector = resolve_constant(vector)?;
        if vector != Syscall::VECTOR {
            return Err(SyntaxError::InterruptVector(vector).into());
        }

        let number = self.regs.read_dword(Gpr::Eax);
        let syscall = Syscall::from_number(number).ok_or(X86Error::UnknownSyscall(number))?;
        tracing::debug!(%syscall, number, "int 0x80");

        match syscall {
            Syscall::Exit => Ok(Effect::Exit {
                status: self.regs.read_dword(Gpr::Ebx),
            }),
            Syscall::Fork | Syscall::Read => Err(X86Error::UnsupportedSyscall(syscall)),
            Syscall::Write => {
                let fd = self.regs.read_dword(Gpr::Ebx);
                if fd != 1 {
                    return Err(X86Error::UnsupportedFileDescriptor { syscall, fd });
                }
                Ok(Effect::Write {
                    fd,
                    buf: self.regs.read_dword(Gpr::Ecx),
                    count: self.regs.read_dword(Gpr::Edx),
                })
            }
        }
    }
}

fn split_operands<const N: usize>(mnemonic: &'static str, args: &[&str]) -> Result<[String; N]> {
    let joined = args.concat();
    let operands: Vec<String> = if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(',').map(|s| s.trim().to_owned()).collect()
    };

    let count_error = SyntaxError::OperandCount {
        mnemonic,
        expected: N,
        got: operands.iter().filter(|s| !s.is_empty()).count(),
    };
    if operands.iter().any(String::is_empty) {
        return Err(count_error.into());
    }
    operands
        .try_into()
        .map_err(|_| X86Error::from(count_error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_accepts_both_spacings() {
        assert_eq!(
            split_operands::<2>("mov", &["eax,", "1"]).unwrap(),
            ["eax".to_owned(), "1".to_owned()]
        );
        assert_eq!(
            split_operands::<2>("mov", &["eax,1"]).unwrap(),
            ["eax".to_owned(), "1".to_owned()]
        );
        assert_eq!(
            split_operands::<2>("mov", &["eax", ",", "1"]).unwrap(),
            ["eax".to_owned(), "1".to_owned()]
        );
    }

    #[test]
    fn split_counts_operands() {
        let got = |args: &[&str]| match split_operands::<2>("mov", args) {
            Err(X86Error::Syntax(SyntaxError::OperandCount { got, .. })) => got,
            other => panic!("expected operand count error, got {other:?}"),
        };
        assert_eq!(got(&[]), 0);
        assert_eq!(got(&["eax"]), 1);
        assert_eq!(got(&["eax,"]), 1);
        assert_eq!(got(&["eax,", "1,", "2"]), 3);
        assert_eq!(got(&["eax,,1"]), 2);
    }

    #[test]
    fn operations_parse_exactly() {
        assert_eq!("mov".parse::<Operation>().unwrap(), Operation::Mov);
        assert_eq!(Operation::lookup("int"), Some(Operation::Int));
        assert_eq!(Operation::lookup("MOV"), None);
        assert!(matches!(
            "add".parse::<Operation>(),
            Err(X86Error::UnknownCommand(name)) if name == "add"
        ));
    }
}
