//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::HistoryEntry;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /api/convert`.
///
/// Every field is optional at the extractor level so that missing parameters
/// produce the API's own error body instead of a framework rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct ConvertQuery {
    /// Origin currency code
    #[param(example = "USD")]
    pub from: Option<String>,
    /// Destination currency code
    #[param(example = "BRL")]
    pub to: Option<String>,
    /// Amount to convert; `,` is accepted as decimal separator
    #[param(example = "100")]
    pub amount: Option<String>,
}

/// Response of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "BRL")]
    pub to: String,
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Converted amount, unrounded
    #[schema(example = 525.0)]
    pub result: f64,
    /// Units of `to` per unit of `from`
    #[schema(example = 5.25)]
    pub rate: f64,
    #[schema(example = 0.190476)]
    pub inverse_rate: f64,
    /// Epoch milliseconds
    #[schema(example = 1718000000000i64)]
    pub timestamp: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /api/rates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct RatesQuery {
    /// Base currency code
    #[param(example = "USD")]
    pub from: Option<String>,
}

/// Rates from one base currency to every other supported currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    #[schema(example = "USD")]
    pub base: String,
    #[schema(example = json!({"BRL": 5.25, "EUR": 0.92}))]
    pub rates: BTreeMap<String, f64>,
    /// Epoch milliseconds
    pub timestamp: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One supported currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyInfo {
    #[schema(example = "BRL")]
    pub code: String,
    #[schema(example = "R$")]
    pub symbol: String,
    #[schema(example = "Brazilian real")]
    pub description: String,
}

impl From<crate::CurrencyCode> for CurrencyInfo {
    fn from(code: crate::CurrencyCode) -> Self {
        Self {
            code: code.code().to_string(),
            symbol: code.symbol().to_string(),
            description: code.description().to_string(),
        }
    }
}

/// Supported currency list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyInfo>,
    pub count: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// History DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /api/history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Only return the most recent `limit` entries; parsed by the handler
    #[param(example = "10")]
    pub limit: Option<String>,
}

/// Recent conversions, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub count: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "fxconv")]
    pub service: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiInfoResponse {
    #[schema(example = "fxconv")]
    pub name: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub endpoints: Vec<String>,
}
