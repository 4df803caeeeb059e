#![forbid(unsafe_code)]

//! Interactive front end for the vx86 engine: line handling, the read loop, and CLI options.

pub mod config;
pub mod repl;
pub mod session;

pub use config::{Args, DisplayRadix};
pub use repl::{ExitReason, ReplOptions};
pub use session::{Reply, Session};
