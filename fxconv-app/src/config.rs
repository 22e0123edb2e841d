//! Configuration loading from command-line flags and environment.

use std::env;
use std::time::Duration;

use clap::Parser;

use fxconv_fetcher::{DEFAULT_BASE_URL, FetcherConfig};

/// Command-line arguments. Every flag falls back to an environment variable.
#[derive(Debug, Parser)]
#[command(name = "fxconv")]
#[command(author, version, long_about = None)]
#[command(about = "Currency converter backed by ExchangeRate-API")]
pub struct Args {
    /// ExchangeRate-API key
    #[arg(long, env = "EXCHANGE_RATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Serve the HTTP API instead of the interactive menu (also SERVER_MODE=true)
    #[arg(long)]
    pub server: bool,

    /// HTTP port in server mode
    #[arg(long, env = "PORT", default_value_t = 7000)]
    pub port: u16,

    /// How long a fetched rate is reused, in milliseconds
    #[arg(long, env = "CACHE_TTL_MS", default_value_t = 300_000)]
    pub cache_ttl_ms: u64,

    /// Base URL of the ExchangeRate-API v6 endpoint
    #[arg(long, env = "EXCHANGE_RATE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Connect and response timeout for rate requests, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

/// Application configuration.
pub struct Config {
    pub api_key: String,
    pub server_mode: bool,
    pub port: u16,
    pub cache_ttl: Duration,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Parses the process arguments and environment.
    pub fn load() -> anyhow::Result<Self> {
        let server_env = env::var("SERVER_MODE").ok();
        Self::from_args(Args::parse(), server_env.as_deref())
    }

    /// Validates parsed arguments. `server_env` is the raw `SERVER_MODE` value.
    pub fn from_args(args: Args, server_env: Option<&str>) -> anyhow::Result<Self> {
        let api_key = args
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "EXCHANGE_RATE_API_KEY environment variable is required \
                     (get a free key at https://www.exchangerate-api.com and add it to .env)"
                )
            })?;

        if args.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            api_key,
            server_mode: args.server || is_truthy(server_env),
            port: args.port,
            cache_ttl: Duration::from_millis(args.cache_ttl_ms),
            api_base_url: args.api_base_url,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::new(self.api_key.clone())
            .with_base_url(self.api_base_url.clone())
            .with_timeout(self.request_timeout)
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1")
    )
}
