//! Decimal digits as used by the EAN family.

use std::fmt;

use crate::BarcodeError;


/// A single decimal digit to encode in a barcode.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Digit(u8);
impl Digit {
    pub const fn as_u8(&self) -> u8 { self.0 }
    pub const fn try_from_u8(value: u8) -> Option<Self> {
        if value < 10 {
            Some(Self(value))
        } else {
            None
        }
    }
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Interprets an ASCII digit character (`'0'` to `'9'`).
    pub const fn try_from_char(c: char) -> Option<Self> {
        if c.is_ascii_digit() {
            Some(Self(c as u8 - b'0'))
        } else {
            None
        }
    }

    pub const fn to_char(&self) -> char {
        (b'0' + self.0) as char
    }

    /// Parses a string consisting only of ASCII digits.
    pub fn parse_all(digits: &str) -> Result<Vec<Digit>, BarcodeError> {
        digits.chars()
            .map(|c| Self::try_from_char(c)
                .ok_or_else(|| BarcodeError::invalid_format(format!("{:?} is not a digit", c)))
            )
            .collect()
    }
}
impl From<Digit> for u8 {
    fn from(value: Digit) -> Self {
        value.as_u8()
    }
}
impl TryFrom<u8> for Digit {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value)
            .ok_or(value)
    }
}
impl fmt::Debug for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
