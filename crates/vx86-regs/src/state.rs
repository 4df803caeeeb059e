use std::fmt;

use thiserror::Error;

use crate::names::{Gpr, RegName, Width};

const DWORD_MODULUS: i128 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("register {name} cannot accept a value greater than {bits} bits (got {value:#x})")]
    OperandRange { name: RegName, bits: u32, value: u64 },

    #[error("register {gpr} has no {width} view")]
    NoSubRegister { gpr: Gpr, width: Width },
}

/// A dword write whose requested value did not fit in 32 bits and was wrapped.
///
/// This is a warning, not an error: the wrapped value has already been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub gpr: Gpr,
    pub requested: i128,
    pub stored: u32,
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "overflow occurred with register {} ({} wrapped to {:#010x})",
            self.gpr, self.requested, self.stored
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gprs: [u32; 8],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.gprs = [0; 8];
    }

    pub fn has_register(name: &str) -> bool {
        RegName::lookup(name).is_some()
    }

    pub fn read_dword(&self, gpr: Gpr) -> u32 {
        self.gprs[gpr as usize]
    }

    /// Stores `value mod 2^32`. Returns the overflow description when wrapping lost
    /// information.
    pub fn write_dword(&mut self, gpr: Gpr, value: i128) -> Option<Overflow> {
        let stored = value.rem_euclid(DWORD_MODULUS) as u32;
        self.gprs[gpr as usize] = stored;

        if (0..DWORD_MODULUS).contains(&value) {
            return None;
        }

        let overflow = Overflow {
            gpr,
            requested: value,
            stored,
        };
        tracing::warn!(register = %gpr, requested = %value, stored, "{overflow}");
        Some(overflow)
    }

    pub fn read_halfword(&self, gpr: Gpr) -> Result<u16, RegisterError> {
        Self::check_view(gpr, Width::HighWord)?;
        Ok((self.read_dword(gpr) >> 16) as u16)
    }

    /// Writes the half-word view (bits 16-31), keeping bits 0-15.
    pub fn write_halfword(&mut self, gpr: Gpr, value: u64) -> Result<(), RegisterError> {
        let name = Self::check_view(gpr, Width::HighWord)?;
        let value = Self::check_range(name, value)?;
        let old = self.read_dword(gpr);
        // Fixed 32-bit shifts: `(old << 16) >> 16` drops the old upper half.
        let new = ((old << 16) >> 16) | (value << 16);
        self.gprs[gpr as usize] = new;
        Ok(())
    }

    pub fn read_highbyte(&self, gpr: Gpr) -> Result<u8, RegisterError> {
        Self::check_view(gpr, Width::HighByte)?;
        Ok(((self.read_dword(gpr) >> 8) & 0xFF) as u8)
    }

    pub fn write_highbyte(&mut self, gpr: Gpr, value: u64) -> Result<(), RegisterError> {
        let name = Self::check_view(gpr, Width::HighByte)?;
        let value = Self::check_range(name, value)?;
        let old = self.read_dword(gpr);
        self.gprs[gpr as usize] = (old & 0xFFFF_00FF) | (value << 8);
        Ok(())
    }

    pub fn read_lowbyte(&self, gpr: Gpr) -> Result<u8, RegisterError> {
        Self::check_view(gpr, Width::LowByte)?;
        Ok((self.read_dword(gpr) & 0xFF) as u8)
    }

    pub fn write_lowbyte(&mut self, gpr: Gpr, value: u64) -> Result<(), RegisterError> {
        let name = Self::check_view(gpr, Width::LowByte)?;
        let value = Self::check_range(name, value)?;
        let old = self.read_dword(gpr);
        self.gprs[gpr as usize] = (old & !0xFF) | value;
        Ok(())
    }

    /// Reads whichever view `name` selects, zero-extended.
    pub fn read(&self, name: RegName) -> u32 {
        let dword = self.read_dword(name.gpr());
        let width = name.width();
        match width {
            Width::Dword => dword,
            _ => (dword >> width.shift()) & (width.max_value() as u32),
        }
    }

    /// Writes through the accessor for `name`'s view, applying that view's policy: dwords wrap
    /// with a warning, narrower views reject values that do not fit.
    pub fn write(&mut self, name: RegName, value: u64) -> Result<Option<Overflow>, RegisterError> {
        let gpr = name.gpr();
        match name.width() {
            Width::Dword => Ok(self.write_dword(gpr, value as i128)),
            Width::HighWord => self.write_halfword(gpr, value).map(|()| None),
            Width::HighByte => self.write_highbyte(gpr, value).map(|()| None),
            Width::LowByte => self.write_lowbyte(gpr, value).map(|()| None),
        }
    }

    fn check_view(gpr: Gpr, width: Width) -> Result<RegName, RegisterError> {
        RegName::new(gpr, width).ok_or(RegisterError::NoSubRegister { gpr, width })
    }

    fn check_range(name: RegName, value: u64) -> Result<u32, RegisterError> {
        let width = name.width();
        if value > width.max_value() {
            return Err(RegisterError::OperandRange {
                name,
                bits: width.bits(),
                value,
            });
        }
        Ok(value as u32)
    }
}

impl fmt::Display for RegisterFile {
    /// One line per base register; the legacy four also list their sub-registers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gpr in Gpr::ALL {
            let dword = self.read_dword(gpr);
            write!(f, "{gpr} = {dword:#010x}")?;
            if gpr.has_subregisters() {
                for width in [Width::HighWord, Width::HighByte, Width::LowByte] {
                    if let Some(name) = RegName::new(gpr, width) {
                        write!(f, "  {name} = {:#x}", self.read(name))?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
