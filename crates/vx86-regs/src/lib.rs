#![forbid(unsafe_code)]

//! 32-bit x86 general-purpose register file.
//!
//! Eight dword registers, four of which (`eax`..`edx`) also expose a half-word view and
//! high/low byte views that alias the same storage.

pub mod names;
pub mod state;

pub use names::{Gpr, ParseRegNameError, RegName, Width};
pub use state::{Overflow, RegisterError, RegisterFile};
