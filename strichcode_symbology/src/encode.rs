//! Generation of the bit string from which a barcode is drawn.

use std::fmt;

use crate::digit::Digit;
use crate::structure::{Structure, select_structure};
use crate::symbology::{EanLayout, SymbologyDescriptor, SymbologyLayout};
use crate::tables::{
    CODE39_ELEMENT_COUNT, Code39Element, EAN_CENTER_GUARD, EAN_LEFT_GUARD, EAN_RIGHT_GUARD,
    EncodingTable, code39_elements, code39_guard_elements, code39_value,
};


pub const NARROW_BAR: char = '0';
pub const WIDE_BAR: char = '1';
pub const WIDE_SPACE: char = ' ';


/// The encoded form of a barcode.
///
/// For the EAN family, every character is one module: `'1'` is a bar and `'0'` is a space.
///
/// For CODE39, every character is one element: `'0'` is a narrow bar, `'1'` is a wide bar and
/// `' '` is a wide space. Narrow spaces are not stored; a narrow space follows every bar that is
/// not followed by a wide space, which also separates consecutive characters.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct BitString(String);
impl BitString {
    pub fn as_str(&self) -> &str { self.0.as_str() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn chars(&self) -> std::str::Chars<'_> { self.0.chars() }
    pub fn into_string(self) -> String { self.0 }

    fn push_modules(&mut self, modules: &[bool]) {
        for &module in modules {
            self.0.push(if module { '1' } else { '0' });
        }
    }

    fn push_code39_elements(&mut self, elements: &[Code39Element; CODE39_ELEMENT_COUNT]) {
        for element in elements {
            match element {
                Code39Element::NarrowBar => self.0.push(NARROW_BAR),
                Code39Element::WideBar => self.0.push(WIDE_BAR),
                Code39Element::WideSpace => self.0.push(WIDE_SPACE),
                Code39Element::NarrowSpace => {},
            }
        }
    }
}
impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl PartialEq<str> for BitString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for BitString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}


/// Encodes a normalized code according to its symbology.
///
/// The code must have been produced by [`normalize`](crate::normalize::normalize) with the same
/// descriptor; [`Barcode::bit_string`](crate::barcode::Barcode::bit_string) guarantees this.
///
/// # Panics
///
/// Panics if an EAN-family code is shorter than its layout requires.
pub(crate) fn build_bit_string(code: &str, descriptor: &SymbologyDescriptor) -> BitString {
    match &descriptor.layout {
        SymbologyLayout::Ean(layout) => encode_ean(code, layout),
        SymbologyLayout::Code39 => encode_code39(code),
    }
}


/// Encodes an EAN-family bar code.
///
/// The barcode has the following pattern:
/// 1. start marker `101`
/// 2. the digits of the first section with seven modules each, in the tables chosen by the
///    structure digit (or all L if there is none)
/// 3. center marker `01010`
/// 4. the digits of the second section with seven modules each, all in the R table
/// 5. end marker `101`
fn encode_ean(code: &str, layout: &EanLayout) -> BitString {
    // a normalized code only consists of digits
    let all_digits: Vec<Digit> = code.chars()
        .filter_map(Digit::try_from_char)
        .collect();

    let (structure, digits) = if layout.has_structure {
        (select_structure(all_digits[0]), &all_digits[1..])
    } else {
        (Structure::all_left(), &all_digits[..])
    };

    let mut ret = BitString(String::with_capacity(layout.module_count()));
    ret.push_modules(&EAN_LEFT_GUARD);

    for (position, digit) in digits[layout.first_section.clone()].iter().enumerate() {
        let table = structure.table_at(position);
        ret.push_modules(table.pattern(*digit));
    }

    ret.push_modules(&EAN_CENTER_GUARD);

    for digit in &digits[layout.second_section.clone()] {
        ret.push_modules(EncodingTable::Right.pattern(*digit));
    }

    ret.push_modules(&EAN_RIGHT_GUARD);
    ret
}


/// Encodes a CODE39 bar code, framed by start/stop characters.
fn encode_code39(code: &str) -> BitString {
    let guard = code39_guard_elements();

    let mut ret = BitString(String::with_capacity((code.len() + 2) * 6));
    ret.push_code39_elements(&guard);
    for c in code.chars() {
        if let Some(elements) = code39_value(c).and_then(code39_elements) {
            ret.push_code39_elements(&elements);
        }
    }
    ret.push_code39_elements(&guard);
    ret
}


/// The number of narrow modules a rasterizer needs for the given bit string.
///
/// For the EAN family, this is the length of the bit string. For CODE39, narrow bars count as
/// one module, wide bars and wide spaces as three, and every bar not followed by a wide space is
/// followed by a one-module narrow space.
pub fn column_count(bits: &BitString, descriptor: &SymbologyDescriptor) -> usize {
    match &descriptor.layout {
        SymbologyLayout::Ean(_) => bits.len(),
        SymbologyLayout::Code39 => {
            let symbols: Vec<char> = bits.chars().collect();
            let mut columns = 0;
            for (i, symbol) in symbols.iter().enumerate() {
                match *symbol {
                    NARROW_BAR => columns += 1,
                    WIDE_BAR|WIDE_SPACE => columns += 3,
                    _ => {},
                }
                if *symbol != WIDE_SPACE && symbols.get(i + 1) != Some(&WIDE_SPACE) {
                    columns += 1;
                }
            }
            columns
        },
    }
}
