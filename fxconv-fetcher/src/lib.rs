//! # Fxconv Fetcher
//!
//! Concrete rate fetcher implementations (adapters) for the converter.
//! This crate provides the ExchangeRate-API v6 adapter that implements the
//! `RateFetcher` port.

use std::time::Duration;

pub mod exchangerate_api;

pub use exchangerate_api::ExchangeRateApiClient;

/// Public endpoint of ExchangeRate-API v6.
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Connect and response timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the outbound HTTP client.
#[derive(Clone)]
pub struct FetcherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl FetcherConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build a ready-to-use fetcher.
///
/// # Examples
///
/// ```ignore
/// let fetcher = build_fetcher(FetcherConfig::new(api_key))?;
/// let rate = fetcher.fetch_pair("USD", "BRL").await?;
/// ```
pub fn build_fetcher(config: FetcherConfig) -> anyhow::Result<ExchangeRateApiClient> {
    ExchangeRateApiClient::new(config)
}
