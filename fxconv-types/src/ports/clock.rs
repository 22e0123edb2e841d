//! Clock port.
//!
//! Cache freshness is measured against this clock so tests can move time
//! forward without sleeping.

use std::time::Instant;

/// Source of monotonic time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Monotonic clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
