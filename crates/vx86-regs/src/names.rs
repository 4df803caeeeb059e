use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gpr {
    Eax = 0,
    Ebx = 1,
    Ecx = 2,
    Edx = 3,
    Esi = 4,
    Edi = 5,
    Esp = 6,
    Ebp = 7,
}

impl Gpr {
    pub const ALL: [Gpr; 8] = [
        Gpr::Eax,
        Gpr::Ebx,
        Gpr::Ecx,
        Gpr::Edx,
        Gpr::Esi,
        Gpr::Edi,
        Gpr::Esp,
        Gpr::Ebp,
    ];

    /// Only the legacy accumulator/base/count/data registers have half-word and byte views.
    pub fn has_subregisters(self) -> bool {
        matches!(self, Gpr::Eax | Gpr::Ebx | Gpr::Ecx | Gpr::Edx)
    }

    pub fn name(self) -> &'static str {
        match self {
            Gpr::Eax => "eax",
            Gpr::Ebx => "ebx",
            Gpr::Ecx => "ecx",
            Gpr::Edx => "edx",
            Gpr::Esi => "esi",
            Gpr::Edi => "edi",
            Gpr::Esp => "esp",
            Gpr::Ebp => "ebp",
        }
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which bits of the backing dword a register name projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// Bits 0-31.
    Dword,
    /// Bits 16-31. `ax` and friends sit on the upper half-word in this machine.
    HighWord,
    /// Bits 8-15.
    HighByte,
    /// Bits 0-7.
    LowByte,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::Dword => 32,
            Width::HighWord => 16,
            Width::HighByte | Width::LowByte => 8,
        }
    }

    pub fn shift(self) -> u32 {
        match self {
            Width::Dword | Width::LowByte => 0,
            Width::HighByte => 8,
            Width::HighWord => 16,
        }
    }

    /// Largest value the view can hold.
    pub fn max_value(self) -> u64 {
        (1u64 << self.bits()) - 1
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Width::Dword => "dword",
            Width::HighWord => "half-word",
            Width::HighByte => "high byte",
            Width::LowByte => "low byte",
        })
    }
}

/// A register name accepted by the assembler: a base register plus the view it selects.
///
/// Only the 20 legal combinations can be constructed, so holding a `RegName` is proof the
/// view exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegName {
    gpr: Gpr,
    width: Width,
}

const fn reg(gpr: Gpr, width: Width) -> RegName {
    RegName { gpr, width }
}

impl RegName {
    pub const ALL: [RegName; 20] = [
        reg(Gpr::Eax, Width::Dword),
        reg(Gpr::Ebx, Width::Dword),
        reg(Gpr::Ecx, Width::Dword),
        reg(Gpr::Edx, Width::Dword),
        reg(Gpr::Esi, Width::Dword),
        reg(Gpr::Edi, Width::Dword),
        reg(Gpr::Esp, Width::Dword),
        reg(Gpr::Ebp, Width::Dword),
        reg(Gpr::Eax, Width::HighWord),
        reg(Gpr::Ebx, Width::HighWord),
        reg(Gpr::Ecx, Width::HighWord),
        reg(Gpr::Edx, Width::HighWord),
        reg(Gpr::Eax, Width::HighByte),
        reg(Gpr::Ebx, Width::HighByte),
        reg(Gpr::Ecx, Width::HighByte),
        reg(Gpr::Edx, Width::HighByte),
        reg(Gpr::Eax, Width::LowByte),
        reg(Gpr::Ebx, Width::LowByte),
        reg(Gpr::Ecx, Width::LowByte),
        reg(Gpr::Edx, Width::LowByte),
    ];

    pub fn new(gpr: Gpr, width: Width) -> Option<Self> {
        if width == Width::Dword || gpr.has_subregisters() {
            Some(reg(gpr, width))
        } else {
            None
        }
    }

    pub fn dword(gpr: Gpr) -> Self {
        reg(gpr, Width::Dword)
    }

    pub fn gpr(self) -> Gpr {
        self.gpr
    }

    pub fn width(self) -> Width {
        self.width
    }

    pub fn name(self) -> &'static str {
        use Gpr::*;
        use Width::*;
        match (self.gpr, self.width) {
            (gpr, Dword) => gpr.name(),
            (Eax, HighWord) => "ax",
            (Ebx, HighWord) => "bx",
            (Ecx, HighWord) => "cx",
            (Edx, HighWord) => "dx",
            (Eax, HighByte) => "ah",
            (Ebx, HighByte) => "bh",
            (Ecx, HighByte) => "ch",
            (Edx, HighByte) => "dh",
            (Eax, LowByte) => "al",
            (Ebx, LowByte) => "bl",
            (Ecx, LowByte) => "cl",
            (Edx, LowByte) => "dl",
            (Esi | Edi | Esp | Ebp, _) => {
                unreachable!("RegName::new rejects sub-registers of {}", self.gpr)
            }
        }
    }

    /// Case-sensitive lookup, matching how commands are dispatched.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for RegName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown register: {0}")]
pub struct ParseRegNameError(pub String);

impl FromStr for RegName {
    type Err = ParseRegNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ParseRegNameError(s.to_owned()))
    }
}
