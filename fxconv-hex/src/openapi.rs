//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fxconv_types::dto::{
    ApiInfoResponse, ConvertQuery, ConvertResponse, CurrenciesResponse, CurrencyInfo,
    HealthResponse, HistoryQuery, HistoryResponse, RatesQuery, RatesResponse,
};
use fxconv_types::{CurrencyCode, HistoryEntry};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// API information
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service name, version and endpoints", body = ApiInfoResponse)
    )
)]
async fn root() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "conversion",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Conversion result", body = ConvertResponse),
        (status = 400, description = "Missing parameter, unknown currency or invalid amount",
            body = inline(serde_json::Value),
            example = json!({"error": "Invalid currency code: XYZ", "supported": ["BRL", "USD"], "code": 400})),
        (status = 503, description = "Exchange rate unavailable and nothing cached",
            body = inline(serde_json::Value),
            example = json!({"error": "Exchange rate service temporarily unavailable", "message": "...", "code": 503}))
    )
)]
async fn convert() {}

/// Rates from one currency to every other supported currency
#[utoipa::path(
    get,
    path = "/api/rates",
    tag = "conversion",
    params(RatesQuery),
    responses(
        (status = 200, description = "Rates keyed by destination code", body = RatesResponse),
        (status = 400, description = "Missing or unknown base currency"),
        (status = 503, description = "At least one rate is unavailable")
    )
)]
async fn rates() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Supported currencies", body = CurrenciesResponse)
    )
)]
async fn currencies() {}

/// Recent conversions
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Conversions, oldest first", body = HistoryResponse)
    )
)]
async fn list_history() {}

/// Clear the conversion history
#[utoipa::path(
    delete,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 204, description = "History cleared")
    )
)]
async fn clear_history() {}

/// OpenAPI documentation for the conversion API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Converts amounts between 20 supported currencies using live exchange rates.\n\nRates are cached per pair for a configurable TTL. When the upstream API fails, the last known rate for the pair is served instead.",
        license(name = "MIT"),
    ),
    paths(
        root,
        health,
        convert,
        rates,
        currencies,
        list_history,
        clear_history,
    ),
    components(
        schemas(
            ConvertResponse,
            RatesResponse,
            CurrencyInfo,
            CurrenciesResponse,
            HistoryEntry,
            HistoryResponse,
            HealthResponse,
            ApiInfoResponse,
            CurrencyCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conversion", description = "Currency conversion and rate lookup"),
        (name = "currencies", description = "Supported currency catalogue"),
        (name = "history", description = "Recent conversion log"),
    )
)]
pub struct ApiDoc;
