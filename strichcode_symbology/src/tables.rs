//! Static pattern tables for the EAN family and CODE39.

use std::fmt;

use crate::digit::Digit;


/// The L encoding for digits 0-9.
///
/// The L and G encodings are used to encode the left group of digits. For symbologies with a
/// structure digit, the exact pattern of whether an L or G was used for a specific digit encodes
/// the leftmost (lone) digit.
static L_DIGITS: [[bool; 7]; 10] = [
    [false, false, false, true,  true,  false, true],
    [false, false, true,  true,  false, false, true],
    [false, false, true,  false, false, true,  true],
    [false, true,  true,  true,  true,  false, true],
    [false, true,  false, false, false, true,  true],
    [false, true,  true,  false, false, false, true],
    [false, true,  false, true,  true,  true,  true],
    [false, true,  true,  true,  false, true,  true],
    [false, true,  true,  false, true,  true,  true],
    [false, false, false, true,  false, true,  true],
];

/// The G encoding for digits 0-9.
static G_DIGITS: [[bool; 7]; 10] = [
    [false, true,  false, false, true,  true,  true],
    [false, true,  true,  false, false, true,  true],
    [false, false, true,  true,  false, true,  true],
    [false, true,  false, false, false, false, true],
    [false, false, true,  true,  true,  false, true],
    [false, true,  true,  true,  false, false, true],
    [false, false, false, false, true,  false, true],
    [false, false, true,  false, false, false, true],
    [false, false, false, true,  false, false, true],
    [false, false, true,  false, true,  true,  true],
];

/// The R encoding for digits 0-9.
///
/// The R encoding is used for every digit of the right group, including the check digit.
static R_DIGITS: [[bool; 7]; 10] = [
    [true,  true,  true,  false, false, true,  false],
    [true,  true,  false, false, true,  true,  false],
    [true,  true,  false, true,  true,  false, false],
    [true,  false, false, false, false, true,  false],
    [true,  false, true,  true,  true,  false, false],
    [true,  false, false, true,  true,  true,  false],
    [true,  false, true,  false, false, false, false],
    [true,  false, false, false, true,  false, false],
    [true,  false, false, true,  false, false, false],
    [true,  true,  true,  false, true,  false, false],
];

pub const EAN_LEFT_GUARD: [bool; 3] = [true, false, true];
pub const EAN_CENTER_GUARD: [bool; 5] = [false, true, false, true, false];
pub const EAN_RIGHT_GUARD: [bool; 3] = [true, false, true];

/// Width of a single encoded EAN digit, in modules.
pub const EAN_DIGIT_WIDTH: usize = 7;


/// One of the three EAN digit encoding tables.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EncodingTable {
    /// The L (odd parity) table.
    Left,

    /// The G (even parity) table.
    Alternate,

    /// The R table, used for the right group.
    Right,
}
impl EncodingTable {
    pub fn pattern(&self, digit: Digit) -> &'static [bool; EAN_DIGIT_WIDTH] {
        match self {
            Self::Left => &L_DIGITS[digit.as_usize()],
            Self::Alternate => &G_DIGITS[digit.as_usize()],
            Self::Right => &R_DIGITS[digit.as_usize()],
        }
    }

    pub const fn as_char(&self) -> char {
        match self {
            Self::Left => 'L',
            Self::Alternate => 'G',
            Self::Right => 'R',
        }
    }
}
impl fmt::Display for EncodingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}


/// The CODE39 character set, ordered by check value.
pub const CODE39_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// The modulus of the CODE39 check character.
pub const CODE39_MODULUS: usize = 43;

/// The CODE39 element patterns, indexed by check value, followed by the start/stop character
/// (`*`).
///
/// Each entry describes the nine elements of a character from left to right (bar, space, bar,
/// ..., bar); the most significant of the nine bits is the first element. A set bit marks a wide
/// element. Exactly three elements of every character are wide.
static CODE39_PATTERNS: [u16; CODE39_MODULUS + 1] = [
    0b000110100, // 0
    0b100100001, // 1
    0b001100001, // 2
    0b101100000, // 3
    0b000110001, // 4
    0b100110000, // 5
    0b001110000, // 6
    0b000100101, // 7
    0b100100100, // 8
    0b001100100, // 9
    0b100001001, // A
    0b001001001, // B
    0b101001000, // C
    0b000011001, // D
    0b100011000, // E
    0b001011000, // F
    0b000001101, // G
    0b100001100, // H
    0b001001100, // I
    0b000011100, // J
    0b100000011, // K
    0b001000011, // L
    0b101000010, // M
    0b000010011, // N
    0b100010010, // O
    0b001010010, // P
    0b000000111, // Q
    0b100000110, // R
    0b001000110, // S
    0b000010110, // T
    0b110000001, // U
    0b011000001, // V
    0b111000000, // W
    0b010010001, // X
    0b110010000, // Y
    0b011010000, // Z
    0b010000101, // -
    0b110000100, // .
    0b011000100, // space
    0b010101000, // $
    0b010100010, // /
    0b010001010, // +
    0b000101010, // %
    0b010010100, // * (start/stop)
];

const CODE39_GUARD_INDEX: usize = CODE39_MODULUS;
pub const CODE39_ELEMENT_COUNT: usize = 9;


/// A single element of a CODE39 character.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Code39Element {
    NarrowBar,
    WideBar,
    NarrowSpace,
    WideSpace,
}

/// Returns the check value (0-42) of a CODE39 character, or `None` if the character is not part
/// of the alphabet. Lowercase letters are not part of the alphabet.
pub fn code39_value(c: char) -> Option<usize> {
    CODE39_ALPHABET.chars().position(|a| a == c)
}

/// Returns the CODE39 character with the given check value.
pub fn code39_char(value: usize) -> Option<char> {
    CODE39_ALPHABET.chars().nth(value)
}

fn code39_elements_at(index: usize) -> [Code39Element; CODE39_ELEMENT_COUNT] {
    let pattern = CODE39_PATTERNS[index];
    let mut ret = [Code39Element::NarrowBar; CODE39_ELEMENT_COUNT];
    for (i, element) in ret.iter_mut().enumerate() {
        let wide = pattern & (1 << (CODE39_ELEMENT_COUNT - 1 - i)) != 0;
        let bar = i % 2 == 0;
        *element = match (bar, wide) {
            (true, false) => Code39Element::NarrowBar,
            (true, true) => Code39Element::WideBar,
            (false, false) => Code39Element::NarrowSpace,
            (false, true) => Code39Element::WideSpace,
        };
    }
    ret
}

/// The elements of the character with the given check value.
pub fn code39_elements(value: usize) -> Option<[Code39Element; CODE39_ELEMENT_COUNT]> {
    if value < CODE39_MODULUS {
        Some(code39_elements_at(value))
    } else {
        None
    }
}

/// The elements of the start/stop character.
pub fn code39_guard_elements() -> [Code39Element; CODE39_ELEMENT_COUNT] {
    code39_elements_at(CODE39_GUARD_INDEX)
}
