//! Validation and canonicalization of raw barcode input.

use tracing::debug;

use crate::BarcodeError;
use crate::checksum::{compute_check_digit, compute_code39_check};
use crate::digit::Digit;
use crate::symbology::{EanLayout, SymbologyDescriptor, SymbologyLayout};
use crate::tables::code39_value;


/// Turns raw input into the final code of the given symbology, check digit or character
/// included.
///
/// EAN-family input longer than the payload length is truncated before the check digit is
/// calculated. After normalization, the descriptor's post-validators are run on the final code.
pub fn normalize(raw: &str, descriptor: &SymbologyDescriptor) -> Result<String, BarcodeError> {
    let code = match &descriptor.layout {
        SymbologyLayout::Ean(layout) => normalize_ean(raw, descriptor.name, layout)?,
        SymbologyLayout::Code39 => normalize_code39(raw)?,
    };

    for validator in descriptor.post_validators {
        validator(&code)?;
    }

    Ok(code)
}


fn normalize_ean(raw: &str, name: &str, layout: &EanLayout) -> Result<String, BarcodeError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(BarcodeError::invalid_format(format!("{} barcodes can only contain digits", name)));
    }
    if raw.len() < layout.length {
        return Err(BarcodeError::invalid_format(format!(
            "{} barcodes must be at least {} digits long, not {}",
            name, layout.length, raw.len(),
        )));
    }

    // only ASCII digits at this point, so byte slicing is safe
    let payload = &raw[..layout.length];
    if payload.len() < raw.len() {
        debug!("truncating {} input {:?} to {:?}", name, raw, payload);
    }

    let digits = Digit::parse_all(payload)?;
    let check_digit = compute_check_digit(&digits, layout.weights, layout.length)?;

    let mut code = String::with_capacity(layout.length + 1);
    code.push_str(payload);
    code.push(check_digit.to_char());
    Ok(code)
}


fn normalize_code39(raw: &str) -> Result<String, BarcodeError> {
    let payload = raw.to_uppercase();
    if payload.is_empty() {
        return Err(BarcodeError::invalid_format("CODE39 barcodes must contain at least one character"));
    }
    if let Some(bad) = payload.chars().find(|c| code39_value(*c).is_none()) {
        return Err(BarcodeError::invalid_format(format!("character {:?} is not supported by CODE39", bad)));
    }

    let check = compute_code39_check(&payload)?;

    let mut code = payload;
    code.push(check.as_char());
    Ok(code)
}
