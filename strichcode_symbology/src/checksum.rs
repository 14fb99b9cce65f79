//! Check digit and check character calculation.

use std::fmt;

use crate::BarcodeError;
use crate::barcode::Barcode;
use crate::digit::Digit;
use crate::tables::{CODE39_MODULUS, code39_char, code39_value};


/// The positional weights of an EAN-style modulo-10 checksum.
///
/// Positions are counted from the left starting at 0.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Weights {
    pub odd: u32,
    pub even: u32,
}
impl Weights {
    pub const fn new(odd: u32, even: u32) -> Self {
        Self { odd, even }
    }
}


/// The outcome of a checksum calculation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CheckValue {
    /// An EAN-family check digit.
    Digit(Digit),

    /// A CODE39 check character along with its numeric value (0-42).
    Code39 { value: usize, character: char },
}
impl CheckValue {
    pub fn as_char(&self) -> char {
        match self {
            Self::Digit(d) => d.to_char(),
            Self::Code39 { character, .. } => *character,
        }
    }

    /// The numeric value: the digit itself, or the CODE39 check value.
    pub fn value(&self) -> usize {
        match self {
            Self::Digit(d) => d.as_usize(),
            Self::Code39 { value, .. } => *value,
        }
    }
}
impl fmt::Display for CheckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}


/// Something a checksum can be calculated from.
#[derive(Clone, Copy, Debug)]
pub enum ChecksumInput<'a> {
    Text(&'a str),
    Barcode(&'a Barcode),
}
impl<'a> From<&'a str> for ChecksumInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}
impl<'a> From<&'a String> for ChecksumInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}
impl<'a> From<&'a Barcode> for ChecksumInput<'a> {
    fn from(value: &'a Barcode) -> Self {
        Self::Barcode(value)
    }
}


/// Calculates the modulo-10 check digit of an EAN-family payload.
///
/// The payload must consist of exactly `required_length` digits.
pub fn compute_check_digit(payload: &[Digit], weights: Weights, required_length: usize) -> Result<Digit, BarcodeError> {
    if payload.len() != required_length {
        return Err(BarcodeError::InvalidLength {
            expected: required_length,
            obtained: payload.len(),
        });
    }

    let mut odd_sum: u32 = 0;
    let mut even_sum: u32 = 0;
    for (i, digit) in payload.iter().enumerate() {
        if i % 2 == 0 {
            even_sum += u32::from(digit.as_u8());
        } else {
            odd_sum += u32::from(digit.as_u8());
        }
    }
    let weighted_sum = odd_sum * weights.odd + even_sum * weights.even;

    let check_digit_value = (10 - (weighted_sum % 10)) % 10;
    // always in 0..=9
    Ok(Digit::try_from_u8(check_digit_value as u8).unwrap_or_default())
}


/// Calculates the CODE39 modulo-43 check character of a payload.
///
/// The payload is uppercased before the lookup. Characters outside the CODE39 alphabet are
/// rejected.
pub fn compute_code39_check(payload: &str) -> Result<CheckValue, BarcodeError> {
    let upper_payload = payload.to_uppercase();
    if upper_payload.is_empty() {
        return Err(BarcodeError::InvalidLength { expected: 1, obtained: 0 });
    }

    let mut total: usize = 0;
    for c in upper_payload.chars() {
        let value = code39_value(c)
            .ok_or_else(|| BarcodeError::invalid_format(format!("character {:?} is not supported by CODE39", c)))?;
        total += value;
    }

    let value = total % CODE39_MODULUS;
    let character = code39_char(value)
        .ok_or_else(|| BarcodeError::invalid_format(format!("CODE39 check value {} out of range", value)))?;
    Ok(CheckValue::Code39 { value, character })
}
