//! Validated barcode values.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::BarcodeError;
use crate::checksum::CheckValue;
use crate::encode::{BitString, build_bit_string, column_count};
use crate::normalize::normalize;
use crate::symbology::{ImageWidth, Symbology, SymbologyDescriptor};


/// Length of the CODE39 start/stop pattern as used in the image width calculation.
const CODE39_GUARD_WIDTH: u32 = 6;


/// A validated barcode: the final code (check digit or character included) of a symbology.
///
/// Barcodes are immutable; everything derived from them (bit string, column count, image size)
/// is calculated on demand. Two barcodes are equal if their codes are equal, regardless of
/// symbology.
#[derive(Clone)]
pub struct Barcode {
    symbology: Symbology,
    code: String,
}
impl Barcode {
    /// Validates and normalizes the raw input as a barcode of the given symbology.
    pub fn new(symbology: Symbology, raw: &str) -> Result<Self, BarcodeError> {
        let code = normalize(raw, symbology.descriptor())?;
        Ok(Self {
            symbology,
            code,
        })
    }

    /// Creates a barcode from a number.
    ///
    /// Leading zeroes cannot be expressed this way; use [`Barcode::new`] for codes that have
    /// them.
    pub fn from_number(symbology: Symbology, number: u64) -> Result<Self, BarcodeError> {
        Self::new(symbology, &number.to_string())
    }

    pub fn symbology(&self) -> Symbology { self.symbology }
    pub fn descriptor(&self) -> &'static SymbologyDescriptor { self.symbology.descriptor() }
    pub fn code(&self) -> &str { self.code.as_str() }

    /// The code without its trailing check digit or character.
    pub fn payload(&self) -> &str {
        // the check value is always a single ASCII character
        &self.code[..self.code.len() - 1]
    }

    pub fn check_value(&self) -> Result<CheckValue, BarcodeError> {
        self.symbology.checksum(self.payload())
    }

    /// The code as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.code.as_bytes()
    }

    pub fn bit_string(&self) -> BitString {
        build_bit_string(&self.code, self.descriptor())
    }

    /// The number of narrow columns a rasterizer needs to draw this barcode.
    pub fn column_count(&self) -> usize {
        column_count(&self.bit_string(), self.descriptor())
    }

    /// The size of the bar area in pixels, as `(width, height)`, not including padding.
    pub fn image_size(&self) -> (u32, u32) {
        let size = self.descriptor().geometry.image_size;
        let width = match size.width {
            ImageWidth::Fixed(w) => w,
            ImageWidth::PerCharacter => {
                let code_length = u32::try_from(self.code.chars().count())
                    .unwrap_or(u32::MAX);
                code_length.saturating_mul(6)
                    .saturating_add(CODE39_GUARD_WIDTH * 2)
                    .saturating_mul(7)
            },
        };
        (width, size.height)
    }
}
impl fmt::Debug for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: code={}>", self.symbology, self.code)
    }
}
impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
impl PartialEq for Barcode {
    fn eq(&self, other: &Barcode) -> bool {
        self.code == other.code
    }
}
impl Eq for Barcode {
}
impl Hash for Barcode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}
impl PartialEq<str> for Barcode {
    fn eq(&self, other: &str) -> bool {
        self.code == other
    }
}
impl PartialEq<&str> for Barcode {
    fn eq(&self, other: &&str) -> bool {
        self.code == *other
    }
}
impl PartialEq<String> for Barcode {
    fn eq(&self, other: &String) -> bool {
        self.code == *other
    }
}
impl PartialEq<Barcode> for &str {
    fn eq(&self, other: &Barcode) -> bool {
        *self == other.code
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Barcode;
    use crate::BarcodeError;
    use crate::checksum::CheckValue;
    use crate::digit::Digit;
    use crate::symbology::Symbology;

    #[test]
    fn test_ean13() {
        let code = "400638133393";
        let barcode = Barcode::new(Symbology::Ean13, code).unwrap();
        let barcode2 = Barcode::new(Symbology::Ean13, code).unwrap();

        assert_eq!(barcode, format!("{}1", code));
        assert_eq!(barcode, barcode2);
        assert_eq!(barcode.code(), "4006381333931");
        assert_eq!(barcode.payload(), code);
        assert_eq!(barcode.check_value().unwrap(), CheckValue::Digit(Digit::try_from_u8(1).unwrap()));
        assert_eq!(barcode.image_size(), (720, 360));
        assert_eq!(barcode.column_count(), 95);
    }

    #[test]
    fn test_equality_after_truncation() {
        let short = Barcode::new(Symbology::Ean13, "400638133393").unwrap();
        let long = Barcode::new(Symbology::Ean13, "40063813339398736412039867123409586345").unwrap();
        assert_eq!(short, long);
        assert_eq!(long, "4006381333931");
        assert!("4006381333931" == long);
        assert_ne!(long, "400638133393");
    }

    #[test]
    fn test_equality_ignores_symbology() {
        let ean13 = Barcode::new(Symbology::Ean13, "450638133393").unwrap();
        let jan = Barcode::new(Symbology::Jan, "450638133393").unwrap();
        assert_eq!(ean13, "4506381333936");
        assert_eq!(jan, "4506381333936");
        assert_eq!(ean13, jan);
        assert_ne!(ean13.symbology(), jan.symbology());

        let mut set = HashSet::new();
        set.insert(ean13);
        assert!(set.contains(&jan));

        let other = Barcode::new(Symbology::Ean13, "400638133393").unwrap();
        assert_ne!(other, jan);
    }

    #[test]
    fn test_ean8() {
        let barcode = Barcode::new(Symbology::Ean8, "012345628743652398476528347652987").unwrap();
        assert_eq!(barcode, "01234565");
        assert_eq!(barcode.image_size(), (480, 240));
    }

    #[test]
    fn test_ean14() {
        let barcode = Barcode::new(Symbology::Ean14, "4070071967072013242346").unwrap();
        assert_eq!(barcode, "40700719670720");
        assert_eq!(barcode.bit_string().len(), 102);
    }

    #[test]
    fn test_jan() {
        let barcode = Barcode::new(Symbology::Jan, "450638133393").unwrap();
        assert_eq!(barcode, "4506381333936");
        assert!(matches!(
            Barcode::new(Symbology::Jan, "400638133393"),
            Err(BarcodeError::InvalidFormat { .. }),
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(Barcode::new(Symbology::Ean13, "1"), Err(BarcodeError::InvalidFormat { .. })));
        assert!(matches!(Barcode::new(Symbology::Code39, "^"), Err(BarcodeError::InvalidFormat { .. })));
    }

    #[test]
    fn test_from_number() {
        let barcode = Barcode::from_number(Symbology::Ean13, 400638133393).unwrap();
        assert_eq!(barcode, "4006381333931");

        // leading zeroes are lost, leaving too few digits
        assert!(matches!(Barcode::from_number(Symbology::Ean8, 123456), Err(BarcodeError::InvalidFormat { .. })));

        let barcode = Barcode::from_number(Symbology::Code39, 42).unwrap();
        assert_eq!(barcode, "426");
    }

    #[test]
    fn test_code39() {
        let code = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.-$+/$ ";
        let barcode = Barcode::new(Symbology::Code39, code).unwrap();
        assert_eq!(barcode, format!("{}/", code));
        assert_eq!(barcode.as_bytes(), format!("{}/", code).as_bytes());
        assert_eq!(barcode.check_value().unwrap().value(), 40);

        // 44 characters including the check character
        assert_eq!(barcode.image_size(), ((44 * 6 + 12) * 7, 240));
    }

    #[test]
    fn test_checksum_of_barcode() {
        let jan = Barcode::new(Symbology::Jan, "450638133393").unwrap();
        assert_eq!(Symbology::Ean13.checksum(&jan).unwrap().value(), 6);
        assert_eq!(Symbology::Jan.checksum(&jan).unwrap().value(), 6);

        let ean13 = Barcode::new(Symbology::Ean13, "400638133393").unwrap();
        assert_eq!(
            Symbology::Jan.checksum(&ean13).unwrap_err(),
            BarcodeError::UnsupportedType { expected: Symbology::Jan, obtained: Symbology::Ean13 },
        );
        assert_eq!(
            Symbology::Code39.checksum(&ean13).unwrap_err(),
            BarcodeError::UnsupportedType { expected: Symbology::Code39, obtained: Symbology::Ean13 },
        );
    }

    #[test]
    fn test_display_and_debug() {
        let barcode = Barcode::new(Symbology::Ean8, "0123456").unwrap();
        assert_eq!(barcode.to_string(), "01234565");
        assert_eq!(format!("{:?}", barcode), "<EAN8: code=01234565>");
    }

    #[test]
    fn test_concurrent_construction() {
        let inputs = ["400638133393", "450638133393", "871234567890", "000000000000"];
        let bit_strings: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs.iter()
                .map(|raw| scope.spawn(move || {
                    Barcode::new(Symbology::Ean13, raw).unwrap().bit_string().into_string()
                }))
                .collect();
            handles.into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });
        for (raw, bits) in inputs.iter().zip(bit_strings.iter()) {
            let sequential = Barcode::new(Symbology::Ean13, raw).unwrap().bit_string();
            assert_eq!(&sequential, bits.as_str());
        }
    }
}
