#![forbid(unsafe_code)]

pub mod constant;
pub mod engine;
pub mod error;
pub mod operand;
pub mod syscall;

pub use constant::{is_constant, resolve_constant, ConstantError, Radix};
pub use engine::{Effect, Engine, Operation, Outcome};
pub use error::{SyntaxError, X86Error};
pub use operand::Operand;
pub use syscall::Syscall;
