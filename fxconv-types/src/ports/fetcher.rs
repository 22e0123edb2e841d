//! Rate fetcher port.
//!
//! This trait defines the interface for exchange rate sources.
//! Implementations can be HTTP clients, mock providers, etc.

use std::sync::Arc;

use crate::error::FetchError;

/// Port trait for a remote exchange rate source.
#[async_trait::async_trait]
pub trait RateFetcher: Send + Sync + 'static {
    /// Performs one round trip for the pair and returns how many units of
    /// `to` one unit of `from` buys. Codes arrive already upper-cased.
    ///
    /// Implementations never retry; a successful result is always a positive,
    /// finite number.
    async fn fetch_pair(&self, from: &str, to: &str) -> Result<f64, FetchError>;
}

#[async_trait::async_trait]
impl<T: RateFetcher + ?Sized> RateFetcher for Arc<T> {
    async fn fetch_pair(&self, from: &str, to: &str) -> Result<f64, FetchError> {
        (**self).fetch_pair(from, to).await
    }
}
