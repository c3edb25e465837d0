use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{internal::InternalError, AppError};

/// Parses an exact decimal from its stored string form
///
/// # Arguments
/// - `value` - The String to attempt to parse into `Decimal`
///
/// # Returns
/// - `Ok(Decimal)` - Successfully parsed String to `Decimal`
/// - `Err(AppError::InternalErr(ParseDecimal))` - Failed to parse the string
pub fn parse_decimal(value: &str) -> Result<Decimal, AppError> {
    let result = Decimal::from_str(value.trim()).map_err(|e| InternalError::ParseDecimal {
        value: value.to_string(),
        source: e,
    })?;

    Ok(result)
}

/// Formats a decimal for storage without trailing zeros
///
/// `0.0020000000` is stored as `0.002` so stored prices stay readable and
/// compare equal regardless of the scale they were computed at.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
