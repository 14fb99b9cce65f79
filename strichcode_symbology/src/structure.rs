//! Selection of the left-group encoding tables from the structure (leading) digit.

use std::fmt;

use crate::digit::Digit;
use crate::tables::EncodingTable;


/// Number of left-group positions whose table is chosen by the structure digit.
pub const STRUCTURE_WIDTH: usize = 6;

/// The L-or-G decision table for encoding the leftmost (lone) digit.
///
/// When encoding the left group of six digits, the value of the leftmost (lone) digit is used to
/// pick the row in this table. Then, for each of the six digits in the left group, the
/// corresponding entry in the row is consulted to decide which encoding to use for that digit. If
/// the entry is `true`, the digit is encoded using the G encoding; if the entry is `false`, the L
/// encoding is used.
const FIRST_DIGIT_USE_G: [[bool; STRUCTURE_WIDTH]; 10] = [
    [false, false, false, false, false, false],
    [false, false, true,  false, true,  true],
    [false, false, true,  true,  false, true],
    [false, false, true,  true,  true,  false],
    [false, true,  false, false, true,  true],
    [false, true,  true,  false, false, true],
    [false, true,  true,  true,  false, false],
    [false, true,  false, true,  false, true],
    [false, true,  false, true,  true,  false],
    [false, true,  true,  false, true,  false],
];


/// The encoding tables of the left group, as selected by the structure digit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Structure([EncodingTable; STRUCTURE_WIDTH]);
impl Structure {
    /// A structure that encodes every left-group position using the L table.
    pub const fn all_left() -> Self {
        Self([EncodingTable::Left; STRUCTURE_WIDTH])
    }

    /// The table for the given left-group position.
    ///
    /// Positions beyond the structure width (not used by any registered symbology) fall back to
    /// the L table.
    pub fn table_at(&self, position: usize) -> EncodingTable {
        self.0.get(position)
            .copied()
            .unwrap_or(EncodingTable::Left)
    }
}
impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.0 {
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}


/// Selects the left-group structure encoded by the given leading digit.
pub fn select_structure(leading: Digit) -> Structure {
    let use_g_pattern = &FIRST_DIGIT_USE_G[leading.as_usize()];
    let mut tables = [EncodingTable::Left; STRUCTURE_WIDTH];
    for (table, &use_g) in tables.iter_mut().zip(use_g_pattern.iter()) {
        if use_g {
            *table = EncodingTable::Alternate;
        }
    }
    Structure(tables)
}


#[cfg(test)]
mod tests {
    use super::{Structure, select_structure};
    use crate::digit::Digit;

    #[test]
    fn test_select_structure() {
        let expected = [
            "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG",
            "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL", "LGGLGL",
        ];
        for (raw, exp) in expected.iter().enumerate() {
            let digit = Digit::try_from_u8(raw as u8).unwrap();
            assert_eq!(&select_structure(digit).to_string(), exp);
        }
    }

    #[test]
    fn test_zero_is_all_left() {
        assert_eq!(select_structure(Digit::default()), Structure::all_left());
    }
}
