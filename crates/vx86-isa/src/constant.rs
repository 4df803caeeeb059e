//! Assembler numeric literals.
//!
//! Accepted forms:
//!
//! * hex: `0x1F`, `0X1f`, or with a trailing `h`: `1Fh`, `0FFH`
//! * octal: a leading `0` followed by more digits (`017`)
//! * decimal: everything else made of digits (`19`, `0`)
//!
//! Signs, separators and whitespace are not accepted, so every constant is non-negative.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Hex,
    Octal,
    Decimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Octal => 8,
            Radix::Decimal => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantError {
    #[error("malformed constant: {0}")]
    Malformed(String),

    #[error("constant does not fit in 64 bits: {0}")]
    TooLarge(String),
}

/// Splits `token` into its radix and digit string, or `None` when it is not a literal.
pub fn classify(token: &str) -> Option<(Radix, &str)> {
    if let Some(digits) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return all_digits(digits, Radix::Hex).then_some((Radix::Hex, digits));
    }

    if let Some(digits) = token.strip_suffix(['h', 'H']) {
        return all_digits(digits, Radix::Hex).then_some((Radix::Hex, digits));
    }

    if let Some(digits) = token.strip_prefix('0') {
        if digits.is_empty() {
            return Some((Radix::Decimal, token));
        }
        return all_digits(digits, Radix::Octal).then_some((Radix::Octal, digits));
    }

    all_digits(token, Radix::Decimal).then_some((Radix::Decimal, token))
}

fn all_digits(digits: &str, radix: Radix) -> bool {
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix.base()))
}

pub fn resolve_constant(token: &str) -> Result<u64, ConstantError> {
    let (radix, digits) =
        classify(token).ok_or_else(|| ConstantError::Malformed(token.to_owned()))?;
    // `classify` only lets valid digits through, so the only failure left is overflow.
    u64::from_str_radix(digits, radix.base()).map_err(|_| ConstantError::TooLarge(token.to_owned()))
}

pub fn is_constant(token: &str) -> bool {
    resolve_constant(token).is_ok()
}
