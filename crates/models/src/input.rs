//! Parsing and checks for raw form text.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::ModelError;

/// Fails with `<field> is required` when `value` is blank after trimming.
pub fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::required(field));
    }
    Ok(())
}

/// Parse a monetary value; accepts `,` as the decimal separator ("12,50").
pub fn parse_amount(field: &str, text: &str) -> Result<Decimal, ModelError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ModelError::required(field));
    }
    Decimal::from_str(&trimmed.replace(',', "."))
        .map_err(|_| ModelError::Validation(format!("{} must be a decimal number", field)))
}

/// Parse a base-10 non-negative integer quantity.
pub fn parse_quantity(field: &str, text: &str) -> Result<u32, ModelError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ModelError::required(field));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ModelError::Validation(format!("{} must be a whole number", field)))
}
