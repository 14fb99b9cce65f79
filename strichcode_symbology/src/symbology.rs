//! The registry of supported symbologies and their constant parameters.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::BarcodeError;
use crate::checksum::{CheckValue, ChecksumInput, Weights, compute_check_digit, compute_code39_check};
use crate::digit::Digit;
use crate::tables::{EAN_CENTER_GUARD, EAN_DIGIT_WIDTH, EAN_LEFT_GUARD, EAN_RIGHT_GUARD};


/// A post-normalization rule run on the final code.
pub type CodeValidator = fn(&str) -> Result<(), BarcodeError>;


/// A supported barcode symbology.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Symbology {
    Ean13,
    Ean8,
    Ean14,
    Jan,
    Code39,
}
impl Symbology {
    pub const ALL: [Symbology; 5] = [
        Symbology::Ean13, Symbology::Ean8, Symbology::Ean14, Symbology::Jan, Symbology::Code39,
    ];

    pub fn descriptor(&self) -> &'static SymbologyDescriptor {
        match self {
            Self::Ean13 => &EAN13,
            Self::Ean8 => &EAN8,
            Self::Ean14 => &EAN14,
            Self::Jan => &JAN,
            Self::Code39 => &CODE39,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Whether barcodes of the `other` symbology are also barcodes of this symbology.
    ///
    /// JAN codes are EAN-13 codes with a restricted prefix, so every JAN barcode is an EAN-13
    /// barcode but not vice versa.
    pub fn accepts(&self, other: Symbology) -> bool {
        *self == other
            || (*self == Symbology::Ean13 && other == Symbology::Jan)
    }

    /// Calculates the check digit or check character for the given input.
    ///
    /// EAN-family text longer than the payload length is truncated first; shorter text fails with
    /// [`BarcodeError::InvalidLength`]. A barcode passed as input must be of a symbology this one
    /// [accepts](Self::accepts); its payload (the code without its check character) is used.
    pub fn checksum<'a, I: Into<ChecksumInput<'a>>>(&self, input: I) -> Result<CheckValue, BarcodeError> {
        let text = match input.into() {
            ChecksumInput::Text(t) => t,
            ChecksumInput::Barcode(b) => {
                if !self.accepts(b.symbology()) {
                    return Err(BarcodeError::UnsupportedType {
                        expected: *self,
                        obtained: b.symbology(),
                    });
                }
                b.payload()
            },
        };

        match &self.descriptor().layout {
            SymbologyLayout::Ean(layout) => {
                let char_count = text.chars().count();
                if char_count < layout.length {
                    return Err(BarcodeError::InvalidLength {
                        expected: layout.length,
                        obtained: char_count,
                    });
                }
                // truncate first; anything past the payload is ignored
                let payload: String = text.chars().take(layout.length).collect();
                let digits = Digit::parse_all(&payload)?;
                let check_digit = compute_check_digit(&digits, layout.weights, layout.length)?;
                Ok(CheckValue::Digit(check_digit))
            },
            SymbologyLayout::Code39 => compute_code39_check(text),
        }
    }
}
impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Symbology {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Symbology::ALL.iter()
            .copied()
            .find(|sym| sym.name() == normalized)
            .ok_or_else(|| BarcodeError::UnknownSymbology(s.to_owned()))
    }
}


/// The structural parameters of an EAN-family symbology.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EanLayout {
    /// Number of payload digits, not counting the check digit.
    pub length: usize,

    /// Indices of the digits in the left group.
    ///
    /// If the symbology has a structure digit, indices are counted after it.
    pub first_section: Range<usize>,

    /// Indices of the digits in the right group, counted like `first_section`.
    pub second_section: Range<usize>,

    pub weights: Weights,

    /// Whether the leading digit selects the encoding tables of the left group instead of being
    /// encoded itself.
    pub has_structure: bool,
}
impl EanLayout {
    /// Offset of the center guard in the bit string.
    pub fn center_guard_offset(&self) -> usize {
        EAN_LEFT_GUARD.len() + self.first_section.len() * EAN_DIGIT_WIDTH
    }

    /// Total number of modules of the bit string.
    pub fn module_count(&self) -> usize {
        EAN_LEFT_GUARD.len()
            + self.first_section.len() * EAN_DIGIT_WIDTH
            + EAN_CENTER_GUARD.len()
            + self.second_section.len() * EAN_DIGIT_WIDTH
            + EAN_RIGHT_GUARD.len()
    }
}


#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SymbologyLayout {
    Ean(EanLayout),
    Code39,
}


#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ImageWidth {
    Fixed(u32),

    /// The width depends on the number of characters in the code.
    PerCharacter,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ImageSize {
    pub width: ImageWidth,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Padding {
    pub width: u32,
    pub height: u32,
}

/// The image geometry used when rendering barcodes of a symbology.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Geometry {
    /// The size of the bar area, not including padding.
    pub image_size: ImageSize,
    pub font_size: u32,

    /// White space around the bar area; half of it on each side.
    pub padding: Padding,
}


/// The immutable description of a symbology.
#[derive(Clone)]
pub struct SymbologyDescriptor {
    pub name: &'static str,
    pub layout: SymbologyLayout,
    pub geometry: Geometry,
    pub post_validators: &'static [CodeValidator],
}
impl SymbologyDescriptor {
    /// The EAN layout, if this is an EAN-family symbology.
    pub fn ean_layout(&self) -> Option<&EanLayout> {
        match &self.layout {
            SymbologyLayout::Ean(l) => Some(l),
            SymbologyLayout::Code39 => None,
        }
    }
}
impl fmt::Debug for SymbologyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbologyDescriptor")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("geometry", &self.geometry)
            .field("post_validators", &self.post_validators.len())
            .finish()
    }
}


const EAN13_LAYOUT: EanLayout = EanLayout {
    length: 12,
    first_section: 0..6,
    second_section: 6..12,
    weights: Weights::new(3, 1),
    has_structure: true,
};

const EAN13_GEOMETRY: Geometry = Geometry {
    image_size: ImageSize { width: ImageWidth::Fixed(720), height: 360 },
    font_size: 46,
    padding: Padding { width: 100, height: 200 },
};

pub static EAN13: SymbologyDescriptor = SymbologyDescriptor {
    name: "EAN13",
    layout: SymbologyLayout::Ean(EAN13_LAYOUT),
    geometry: EAN13_GEOMETRY,
    post_validators: &[],
};

pub static EAN8: SymbologyDescriptor = SymbologyDescriptor {
    name: "EAN8",
    layout: SymbologyLayout::Ean(EanLayout {
        length: 7,
        first_section: 0..4,
        second_section: 4..8,
        weights: Weights::new(1, 3),
        has_structure: false,
    }),
    geometry: Geometry {
        image_size: ImageSize { width: ImageWidth::Fixed(480), height: 240 },
        font_size: 40,
        padding: Padding { width: 0, height: 200 },
    },
    post_validators: &[],
};

pub static EAN14: SymbologyDescriptor = SymbologyDescriptor {
    name: "EAN14",
    layout: SymbologyLayout::Ean(EanLayout {
        length: 13,
        first_section: 0..6,
        second_section: 6..13,
        weights: Weights::new(1, 3),
        has_structure: true,
    }),
    geometry: EAN13_GEOMETRY,
    post_validators: &[],
};

pub static JAN: SymbologyDescriptor = SymbologyDescriptor {
    name: "JAN",
    layout: SymbologyLayout::Ean(EAN13_LAYOUT),
    geometry: EAN13_GEOMETRY,
    post_validators: &[validate_jan_prefix],
};

pub static CODE39: SymbologyDescriptor = SymbologyDescriptor {
    name: "CODE39",
    layout: SymbologyLayout::Code39,
    geometry: Geometry {
        image_size: ImageSize { width: ImageWidth::PerCharacter, height: 240 },
        font_size: 30,
        padding: Padding { width: 100, height: 200 },
    },
    post_validators: &[],
};


const JAN_PREFIXES: [&str; 2] = ["45", "49"];

/// Ensures the code carries one of the Japanese GS1 country prefixes.
pub fn validate_jan_prefix(code: &str) -> Result<(), BarcodeError> {
    if JAN_PREFIXES.iter().any(|p| code.starts_with(p)) {
        Ok(())
    } else {
        Err(BarcodeError::invalid_format("JAN barcodes must start with country code 45 or 49"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbology() {
        assert_eq!("EAN13".parse::<Symbology>().unwrap(), Symbology::Ean13);
        assert_eq!("ean-8".parse::<Symbology>().unwrap(), Symbology::Ean8);
        assert_eq!("ean_14".parse::<Symbology>().unwrap(), Symbology::Ean14);
        assert_eq!("jan".parse::<Symbology>().unwrap(), Symbology::Jan);
        assert_eq!("Code39".parse::<Symbology>().unwrap(), Symbology::Code39);
        assert_eq!(
            "UPC".parse::<Symbology>().unwrap_err(),
            BarcodeError::UnknownSymbology("UPC".to_owned()),
        );
    }

    #[test]
    fn test_display_round_trips() {
        for sym in Symbology::ALL {
            assert_eq!(sym.to_string().parse::<Symbology>().unwrap(), sym);
        }
    }

    #[test]
    fn test_layout_offsets() {
        let ean13 = EAN13.ean_layout().unwrap();
        assert_eq!(ean13.center_guard_offset(), 45);
        assert_eq!(ean13.module_count(), 95);

        let ean14 = EAN14.ean_layout().unwrap();
        assert_eq!(ean14.center_guard_offset(), 45);
        assert_eq!(ean14.module_count(), 102);

        let ean8 = EAN8.ean_layout().unwrap();
        assert_eq!(ean8.center_guard_offset(), 31);
        assert_eq!(ean8.module_count(), 67);

        assert!(CODE39.ean_layout().is_none());
    }

    #[test]
    fn test_jan_shares_ean13_parameters() {
        assert_eq!(JAN.layout, EAN13.layout);
        assert_eq!(JAN.geometry, EAN13.geometry);
        assert_eq!(JAN.post_validators.len(), 1);
        assert!(EAN13.post_validators.is_empty());
    }

    #[test]
    fn test_checksums() {
        assert_eq!(Symbology::Ean13.checksum("400638133393").unwrap().value(), 1);
        assert_eq!(Symbology::Ean8.checksum("0123456").unwrap().value(), 5);
        assert_eq!(Symbology::Ean14.checksum("4070071967072").unwrap().value(), 0);
        assert_eq!(Symbology::Jan.checksum("450638133393").unwrap().value(), 6);
        assert_eq!(
            Symbology::Code39.checksum("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.-$+/$ ").unwrap().as_char(),
            '/',
        );
    }

    #[test]
    fn test_checksum_truncates_long_text() {
        assert_eq!(Symbology::Ean14.checksum("4070071967072013242346").unwrap().value(), 0);
        assert_eq!(
            Symbology::Ean13.checksum("40063813339398736412039867123409586345").unwrap(),
            Symbology::Ean13.checksum("400638133393").unwrap(),
        );
    }

    #[test]
    fn test_checksum_ignores_text_past_payload() {
        assert_eq!(Symbology::Ean13.checksum("400638133393x").unwrap().value(), 1);
        assert_eq!(Symbology::Ean8.checksum("0123456-abc").unwrap().value(), 5);
        assert!(matches!(Symbology::Ean13.checksum("40063813339x3"), Err(BarcodeError::InvalidFormat { .. })));
    }

    #[test]
    fn test_checksum_short_text() {
        assert_eq!(
            Symbology::Ean13.checksum("1").unwrap_err(),
            BarcodeError::InvalidLength { expected: 12, obtained: 1 },
        );
        assert!(matches!(Symbology::Ean8.checksum("01234a6"), Err(BarcodeError::InvalidFormat { .. })));
    }

    #[test]
    fn test_jan_prefix() {
        assert!(validate_jan_prefix("4506381333936").is_ok());
        assert!(validate_jan_prefix("4912345678904").is_ok());
        assert!(matches!(validate_jan_prefix("4006381333931"), Err(BarcodeError::InvalidFormat { .. })));
    }

    #[test]
    fn test_accepts() {
        assert!(Symbology::Ean13.accepts(Symbology::Jan));
        assert!(!Symbology::Jan.accepts(Symbology::Ean13));
        assert!(!Symbology::Ean8.accepts(Symbology::Ean13));
        assert!(Symbology::Code39.accepts(Symbology::Code39));
    }
}
