//! ExchangeRate-API v6 `pair` endpoint client.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use fxconv_types::{FetchError, RateFetcher};

use crate::FetcherConfig;

const USER_AGENT: &str = concat!("fxconv/", env!("CARGO_PKG_VERSION"));

/// HTTP client for `GET {base}/{key}/pair/{FROM}/{TO}`.
pub struct ExchangeRateApiClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ExchangeRateApiClient {
    pub fn new(config: FetcherConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        })
    }

    fn endpoint(&self, from: &str, to: &str) -> String {
        format!("{}/{}/pair/{}/{}", self.base_url, self.api_key, from, to)
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    target_code: Option<String>,
    #[serde(default)]
    conversion_rate: Option<f64>,
    #[serde(default)]
    time_last_update_unix: Option<i64>,
}

#[async_trait]
impl RateFetcher for ExchangeRateApiClient {
    #[instrument(name = "ExchangeRatePairFetch", skip(self))]
    async fn fetch_pair(&self, from: &str, to: &str) -> Result<f64, FetchError> {
        debug!("Requesting {}/<key>/pair/{}/{}", self.base_url, from, to);

        let response = self
            .http
            .get(self.endpoint(from, to))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response.headers();
        if let Some(request_id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            debug!(request_id, "x-request-id");
        }
        if let Some(rate_limit) = headers.get("rate-limit").and_then(|v| v.to_str().ok()) {
            debug!(rate_limit, "rate-limit");
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_pair_response(status, &body)
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        // The URL embeds the API key.
        FetchError::Network(err.without_url().to_string())
    }
}

/// Turns a raw `pair` response into a rate or a typed failure.
pub(crate) fn parse_pair_response(status: u16, body: &str) -> Result<f64, FetchError> {
    if status != 200 {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| api_error_message(&json))
            .unwrap_or_else(|| "no error details".to_string());
        return Err(FetchError::HttpStatus { status, message });
    }

    let json: Value = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse JSON response: {}", e);
        FetchError::MalformedResponse(format!("invalid JSON: {}", e))
    })?;

    if let Some(result) = json.get("result") {
        let result = result.as_str().unwrap_or_default();
        if !result.eq_ignore_ascii_case("success") && !result.eq_ignore_ascii_case("ok") {
            let message = api_error_message(&json).unwrap_or_else(|| result.to_string());
            return Err(FetchError::Api(message));
        }
    }

    let pair: PairResponse = serde_json::from_value(json)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let rate = pair
        .conversion_rate
        .ok_or_else(|| FetchError::MalformedResponse("missing 'conversion_rate'".into()))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(FetchError::MalformedResponse(format!(
            "conversion_rate must be positive, got {}",
            rate
        )));
    }

    debug!(
        base = pair.base_code.as_deref().unwrap_or("?"),
        target = pair.target_code.as_deref().unwrap_or("?"),
        rate,
        last_update = pair.time_last_update_unix,
        "Received pair rate"
    );

    Ok(rate)
}

/// Error text from an API payload: `error-type`, then `error`, then `message`.
fn api_error_message(json: &Value) -> Option<String> {
    ["error-type", "error", "message"]
        .iter()
        .find_map(|field| json.get(*field).and_then(Value::as_str))
        .map(String::from)
}
