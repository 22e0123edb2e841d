//! Conversion Application Service
//!
//! Orchestrates rate lookups through the fetcher port and a TTL cache.
//! Contains NO infrastructure logic - pure caching policy and conversion math.

use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, warn};

use fxconv_types::{
    CachedRate, Clock, ConversionError, ConversionResult, CurrencyPair, RateFetcher, SystemClock,
    calculator,
};

/// How long a fetched rate is trusted without asking the API again.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Application service for currency conversion.
///
/// Generic over `F: RateFetcher` and `C: Clock` - both are injected at
/// construction. This enables:
/// - Swapping the upstream API without code changes
/// - Testing with a scripted fetcher and a manual clock
/// - Compile-time checks for port implementation
///
/// The service is the sole owner of the rate cache. Entries are replaced
/// whole, never evicted, and survive expiry so they can serve as a fallback
/// when the upstream API is down.
pub struct ConversionService<F: RateFetcher, C: Clock = SystemClock> {
    fetcher: F,
    clock: C,
    ttl: Duration,
    cache: DashMap<String, CachedRate>,
}

impl<F: RateFetcher> ConversionService<F> {
    /// Creates a service with the system clock and the default TTL.
    pub fn new(fetcher: F) -> Self {
        Self::with_clock(fetcher, SystemClock, DEFAULT_TTL)
    }

    /// Creates a service with the system clock and a custom TTL.
    pub fn with_ttl(fetcher: F, ttl: Duration) -> Self {
        Self::with_clock(fetcher, SystemClock, ttl)
    }
}

impl<F: RateFetcher, C: Clock> ConversionService<F, C> {
    pub fn with_clock(fetcher: F, clock: C, ttl: Duration) -> Self {
        Self {
            fetcher,
            clock,
            ttl,
            cache: DashMap::new(),
        }
    }

    /// Returns a reference to the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns a reference to the clock used for freshness checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Lookup
    // ─────────────────────────────────────────────────────────────────────────────

    /// Rate from `from` to `to`, served from cache while fresh.
    ///
    /// On a miss or an expired entry, one fetch is attempted. If it fails and
    /// any entry exists for the pair, that rate is returned regardless of age.
    /// Only a failed fetch with nothing cached is an error.
    pub async fn get_rate(&self, from: &str, to: &str) -> Result<f64, ConversionError> {
        let pair = CurrencyPair::new(from, to)?;
        self.rate_for(&pair).await
    }

    async fn rate_for(&self, pair: &CurrencyPair) -> Result<f64, ConversionError> {
        let key = pair.cache_key();

        // Copy the entry out so no map guard is held across the fetch.
        let cached = self.cache.get(&key).map(|entry| *entry);
        if let Some(entry) = cached {
            if entry.is_fresh(self.clock.now(), self.ttl) {
                debug!(pair = %key, rate = entry.rate, "Rate cache HIT");
                return Ok(entry.rate);
            }
            debug!(pair = %key, "Rate cache entry expired");
        } else {
            debug!(pair = %key, "Rate cache MISS");
        }

        match self.fetcher.fetch_pair(pair.from(), pair.to()).await {
            Ok(rate) => {
                self.cache
                    .insert(key.clone(), CachedRate::new(rate, self.clock.now()));
                debug!(pair = %key, rate, "Rate cache PUT");
                Ok(rate)
            }
            Err(err) => {
                // Re-read: picks up a concurrent refresh, but a clear_cache that
                // ran during the fetch leaves nothing to fall back on.
                let fallback = self.cache.get(&key).map(|entry| *entry);
                match fallback {
                    Some(entry) => {
                        warn!(
                            pair = %key,
                            error = %err,
                            age_ms = entry.age(self.clock.now()).as_millis() as u64,
                            "Fetch failed, serving cached rate"
                        );
                        Ok(entry.rate)
                    }
                    None => {
                        warn!(pair = %key, error = %err, "Fetch failed with nothing cached");
                        Err(ConversionError::FetchFailed {
                            pair: key,
                            source: err,
                        })
                    }
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` units of `from` into `to`. Unrounded.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        ensure_valid_amount(amount)?;
        let rate = self.get_rate(from, to).await?;
        calculator::convert(amount, rate)
    }

    /// Like [`convert`](Self::convert), also reporting the rate and its inverse.
    pub async fn convert_detailed(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        ensure_valid_amount(amount)?;
        let pair = CurrencyPair::new(from, to)?;
        let rate = self.rate_for(&pair).await?;
        let converted = calculator::convert(amount, rate)?;
        ConversionResult::new(amount, pair.from(), converted, pair.to(), rate)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cache Management
    // ─────────────────────────────────────────────────────────────────────────────

    /// Entry currently held for the pair, fresh or not. Never fetches.
    pub fn cached_rate(&self, from: &str, to: &str) -> Option<CachedRate> {
        let pair = CurrencyPair::new(from, to).ok()?;
        self.cache.get(&pair.cache_key()).map(|entry| *entry)
    }

    /// Number of pairs in the cache.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached rate.
    pub fn clear_cache(&self) {
        let count = self.cache.len();
        self.cache.clear();
        debug!(count, "Rate cache cleared");
    }
}

fn ensure_valid_amount(amount: f64) -> Result<(), ConversionError> {
    if amount.is_nan() || amount < 0.0 {
        return Err(ConversionError::InvalidArgument(format!(
            "amount cannot be negative: {}",
            amount
        )));
    }
    Ok(())
}
