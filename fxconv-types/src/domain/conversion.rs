//! Conversion result and history entry models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::calculator;
use crate::error::ConversionError;

/// Outcome of a detailed conversion. Derived per call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub original_amount: f64,
    pub from_currency: String,
    pub converted_amount: f64,
    pub to_currency: String,
    pub rate: f64,
    pub inverse_rate: f64,
}

impl ConversionResult {
    /// Builds a result, computing the inverse rate. Fails on a zero rate.
    pub fn new(
        original_amount: f64,
        from_currency: impl Into<String>,
        converted_amount: f64,
        to_currency: impl Into<String>,
        rate: f64,
    ) -> Result<Self, ConversionError> {
        let inverse_rate = calculator::inverse_rate(rate)?;
        Ok(Self {
            original_amount,
            from_currency: from_currency.into(),
            converted_amount,
            to_currency: to_currency.into(),
            rate,
            inverse_rate,
        })
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {} (rate: {:.6})",
            self.original_amount,
            self.from_currency,
            self.converted_amount,
            self.to_currency,
            self.rate
        )
    }
}

/// One line of the conversion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "BRL")]
    pub to: String,
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(example = 525.0)]
    pub result: f64,
    #[schema(example = 5.25)]
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: f64,
        result: f64,
        rate: f64,
    ) -> Self {
        Self::at(from, to, amount, result, rate, Utc::now())
    }

    pub fn at(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: f64,
        result: f64,
        rate: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            result,
            rate,
            timestamp,
        }
    }

    pub fn from_result(result: &ConversionResult) -> Self {
        Self::new(
            result.from_currency.clone(),
            result.to_currency.clone(),
            result.original_amount,
            result.converted_amount,
            result.rate,
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:.2} {} → {:.2} {} (rate: {:.4})",
            self.timestamp.format("%d/%m/%Y %H:%M:%S"),
            self.amount,
            self.from,
            self.result,
            self.to,
            self.rate
        )
    }
}
