//! Boundary validation shared by the HTTP and console adapters.

use fxconv_types::{AppError, CurrencyCode};

/// Parses a user-supplied amount. Accepts `,` as decimal separator and
/// rejects anything that is not a finite number above zero.
pub(crate) fn parse_amount(input: &str) -> Result<f64, AppError> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(AppError::BadRequest(format!(
            "Invalid amount '{}': must be a positive number, e.g. 100 or 100.50",
            input.trim()
        ))),
    }
}

/// Parses a currency code against the supported table.
pub(crate) fn parse_currency(input: &str) -> Result<CurrencyCode, AppError> {
    input
        .parse::<CurrencyCode>()
        .map_err(|_| AppError::InvalidCurrency {
            code: input.trim().to_string(),
            supported: CurrencyCode::codes(),
        })
}
