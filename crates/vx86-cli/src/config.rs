use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::repl::ReplOptions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DisplayRadix {
    /// Plain decimal, e.g. `305419896`.
    #[default]
    Dec,
    /// Zero-padded hex, e.g. `0x12345678`.
    Hex,
}

impl DisplayRadix {
    pub fn format(self, value: u32) -> String {
        match self {
            DisplayRadix::Dec => value.to_string(),
            DisplayRadix::Hex => format!("0x{value:08X}"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vx86",
    about = "Interactive 32-bit x86 register machine (mov / int 0x80)"
)]
pub struct Args {
    /// Read commands from a file instead of stdin. Disables the prompt.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Radix used when printing register values.
    #[arg(long, value_enum, env = "VX86_RADIX", default_value_t = DisplayRadix::Dec)]
    pub radix: DisplayRadix,

    /// Do not print the address prompt before each line.
    #[arg(long)]
    pub no_prompt: bool,

    /// Stop at the first failing command and exit with status 1.
    #[arg(long)]
    pub fail_fast: bool,
}

impl Args {
    pub fn repl_options(&self) -> ReplOptions {
        ReplOptions {
            prompt: !self.no_prompt && self.script.is_none(),
            fail_fast: self.fail_fast,
        }
    }
}
