//! Conversion arithmetic.
//!
//! Pure functions over `f64`. Nothing here rounds unless asked to via
//! [`round`], which is meant for presentation only.

use crate::error::ConversionError;

/// `amount * rate`, unrounded.
pub fn convert(amount: f64, rate: f64) -> Result<f64, ConversionError> {
    ensure_non_negative(amount, "amount")?;
    ensure_non_negative(rate, "rate")?;
    Ok(amount * rate)
}

/// Recovers the original amount from a converted one.
pub fn reverse_conversion(converted_amount: f64, rate: f64) -> Result<f64, ConversionError> {
    ensure_non_negative(converted_amount, "converted amount")?;
    ensure_non_negative(rate, "rate")?;
    if rate == 0.0 {
        return Err(ConversionError::ZeroRate);
    }
    Ok(converted_amount / rate)
}

/// `1 / rate`. A zero rate has no inverse.
pub fn inverse_rate(rate: f64) -> Result<f64, ConversionError> {
    ensure_non_negative(rate, "rate")?;
    if rate == 0.0 {
        return Err(ConversionError::ZeroRate);
    }
    Ok(1.0 / rate)
}

/// Gain or loss in percent going from `original` to `converted`.
///
/// Returns `0` when `original` is zero.
pub fn percentage_difference(original: f64, converted: f64) -> Result<f64, ConversionError> {
    ensure_non_negative(original, "original value")?;
    if original == 0.0 {
        return Ok(0.0);
    }
    Ok((converted - original) / original * 100.0)
}

/// Rounds half away from zero to `decimal_places`.
pub fn round(value: f64, decimal_places: u32) -> f64 {
    let multiplier = 10f64.powi(decimal_places as i32);
    (value * multiplier).round() / multiplier
}

fn ensure_non_negative(value: f64, name: &str) -> Result<(), ConversionError> {
    if value < 0.0 || value.is_nan() {
        return Err(ConversionError::InvalidArgument(format!(
            "{} cannot be negative: {}",
            name, value
        )));
    }
    Ok(())
}
