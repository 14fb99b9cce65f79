//! Encoding of product codes into 1-D barcode symbologies (EAN-13, EAN-8, EAN-14, JAN and
//! CODE39).
//!
//! The entry point is [`Barcode`]: it validates and normalizes raw input for a [`Symbology`]
//! (appending the check digit or character) and produces the [`BitString`] from which a
//! rasterizer draws the bars.


pub mod barcode;
pub mod checksum;
pub mod digit;
pub mod encode;
pub mod normalize;
pub mod structure;
pub mod symbology;
pub mod tables;


use std::borrow::Cow;
use std::fmt;

pub use crate::barcode::Barcode;
pub use crate::checksum::{CheckValue, ChecksumInput, Weights};
pub use crate::digit::Digit;
pub use crate::encode::BitString;
pub use crate::structure::Structure;
pub use crate::symbology::{
    Geometry, ImageSize, ImageWidth, Padding, Symbology, SymbologyDescriptor, SymbologyLayout,
};
pub use crate::tables::EncodingTable;


#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum BarcodeError {
    /// The input contains characters the symbology cannot encode, is too short, or fails a
    /// symbology-specific structural rule.
    InvalidFormat { reason: Cow<'static, str> },

    /// A check digit was requested for a payload of the wrong length.
    InvalidLength { expected: usize, obtained: usize },

    /// A checksum was requested for a barcode of an incompatible symbology.
    UnsupportedType { expected: Symbology, obtained: Symbology },

    /// The symbology name is not known.
    UnknownSymbology(String),
}
impl BarcodeError {
    pub(crate) fn invalid_format<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Self::InvalidFormat { reason: reason.into() }
    }
}
impl fmt::Display for BarcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { reason }
                => write!(f, "invalid format: {}", reason),
            Self::InvalidLength { expected, obtained }
                => write!(f, "invalid payload length; expected {} characters, obtained {}", expected, obtained),
            Self::UnsupportedType { expected, obtained }
                => write!(f, "cannot calculate a {} checksum for a {} barcode", expected, obtained),
            Self::UnknownSymbology(name)
                => write!(f, "unknown symbology {:?}", name),
        }
    }
}
impl std::error::Error for BarcodeError {
}
