//! Currency pair and cached rate domain models.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::ConversionError;

/// An ordered (origin, destination) currency combination.
///
/// Codes are trimmed and upper-cased on construction. They are otherwise
/// opaque: the pair never checks them against the supported currency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    from: String,
    to: String,
}

impl CurrencyPair {
    /// Creates a normalised pair. Empty codes are rejected.
    pub fn new(from: &str, to: &str) -> Result<Self, ConversionError> {
        let from = normalize(from, "from")?;
        let to = normalize(to, "to")?;
        Ok(Self { from, to })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Cache key in the `ORIGIN:DEST` form.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.from, self.to)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

fn normalize(code: &str, field: &str) -> Result<String, ConversionError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ConversionError::InvalidArgument(format!(
            "'{}' currency code cannot be empty",
            field
        )));
    }
    Ok(code.to_uppercase())
}

/// Last known rate for a pair and when it was fetched.
///
/// Stored and replaced as a single value so readers never see a rate from
/// one fetch paired with the timestamp of another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub rate: f64,
    pub fetched_at: Instant,
}

impl CachedRate {
    pub fn new(rate: f64, fetched_at: Instant) -> Self {
        Self { rate, fetched_at }
    }

    /// Age of the entry at `now`. Saturates at zero if `now` is earlier.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    /// Fresh iff `age < ttl`.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}
