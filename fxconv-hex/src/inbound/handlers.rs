//! HTTP request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use futures::future::join_all;
use utoipa::OpenApi;

use fxconv_types::{
    ApiInfoResponse, AppError, Clock, ConversionError, ConvertQuery, ConvertResponse,
    CurrenciesResponse, CurrencyCode, CurrencyInfo, HealthResponse, HistoryEntry, HistoryQuery,
    HistoryResponse, RateFetcher, RatesQuery, RatesResponse,
};

use super::input::{parse_amount, parse_currency};
use crate::openapi::ApiDoc;
use crate::{ConversionService, HistoryService};

/// Application state shared across handlers.
pub struct AppState<F: RateFetcher, C: Clock> {
    pub service: ConversionService<F, C>,
    pub history: HistoryService,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mut body) = match &self.0 {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            AppError::InvalidCurrency { code, supported } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": format!("Invalid currency code: {}", code),
                    "supported": supported,
                }),
            ),
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Responding 503: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    serde_json::json!({
                        "error": "Exchange rate service temporarily unavailable",
                        "message": msg,
                    }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Responding 500: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "Internal server error",
                        "message": msg,
                    }),
                )
            }
        };

        body["code"] = status.as_u16().into();
        (status, Json(body)).into_response()
    }
}

const ENDPOINTS: &[&str] = &[
    "/api/convert?from=USD&to=BRL&amount=100",
    "/api/rates?from=USD",
    "/api/currencies",
    "/api/history?limit=10",
    "/api-docs/openapi.json",
    "/health",
];

/// API information.
pub async fn root() -> impl IntoResponse {
    Json(ApiInfoResponse {
        name: "fxconv".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        service: "fxconv".into(),
    })
}

/// OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Convert an amount between two currencies.
#[tracing::instrument(skip(state))]
pub async fn convert<F: RateFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(from), Some(to), Some(amount)) = (query.from, query.to, query.amount) else {
        return Err(AppError::BadRequest(
            "Missing required parameters: from, to, amount (e.g. /api/convert?from=USD&to=BRL&amount=100)"
                .into(),
        )
        .into());
    };

    let from = parse_currency(&from)?;
    let to = parse_currency(&to)?;
    let amount = parse_amount(&amount)?;

    let result = state
        .service
        .convert_detailed(amount, from.code(), to.code())
        .await?;
    state.history.record(HistoryEntry::from_result(&result));

    Ok(Json(ConvertResponse {
        from: result.from_currency,
        to: result.to_currency,
        amount: result.original_amount,
        result: result.converted_amount,
        rate: result.rate,
        inverse_rate: result.inverse_rate,
        timestamp: Utc::now().timestamp_millis(),
    }))
}

/// Rates from one currency to every other supported currency.
#[tracing::instrument(skip(state))]
pub async fn rates<F: RateFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
    Query(query): Query<RatesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(from) = query.from else {
        return Err(AppError::BadRequest(
            "Missing required parameter 'from' (e.g. /api/rates?from=USD)".into(),
        )
        .into());
    };
    let base = parse_currency(&from)?;

    let targets: Vec<CurrencyCode> = CurrencyCode::all()
        .iter()
        .copied()
        .filter(|code| *code != base)
        .collect();

    let lookups = targets.iter().map(|target| {
        let service = &state.service;
        async move {
            let rate = service.get_rate(base.code(), target.code()).await?;
            Ok::<_, ConversionError>((target.code().to_string(), rate))
        }
    });
    // Every lookup runs to completion; a failed pair must not cancel its siblings.
    let rates = join_all(lookups)
        .await
        .into_iter()
        .collect::<Result<BTreeMap<String, f64>, ConversionError>>()?;

    Ok(Json(RatesResponse {
        base: base.code().to_string(),
        rates,
        timestamp: Utc::now().timestamp_millis(),
    }))
}

/// List supported currencies.
pub async fn currencies() -> impl IntoResponse {
    let currencies: Vec<CurrencyInfo> = CurrencyCode::all()
        .iter()
        .copied()
        .map(CurrencyInfo::from)
        .collect();
    let count = currencies.len();
    Json(CurrenciesResponse { currencies, count })
}

/// Recent conversions.
#[tracing::instrument(skip(state))]
pub async fn list_history<F: RateFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = match query.limit.as_deref().map(str::trim) {
        Some(raw) => {
            let limit = raw.parse::<usize>().map_err(|_| {
                AppError::BadRequest(format!(
                    "Invalid limit '{}': must be a non-negative integer",
                    raw
                ))
            })?;
            state.history.last(limit)
        }
        None => state.history.list(),
    };
    let count = entries.len();
    Ok(Json(HistoryResponse { entries, count }))
}

/// Forget every recorded conversion.
#[tracing::instrument(skip(state))]
pub async fn clear_history<F: RateFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
) -> impl IntoResponse {
    state.history.clear();
    StatusCode::NO_CONTENT
}
