//! ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use fxconv_types::{Clock, ConversionError, ErrorKind, FetchError, RateFetcher};

    use crate::ConversionService;
    use crate::service::DEFAULT_TTL;

    /// Scripted fetcher that counts calls and records the pairs it saw.
    pub struct MockFetcher {
        response: Mutex<Result<f64, FetchError>>,
        calls: AtomicUsize,
        requested: Mutex<Vec<(String, String)>>,
    }

    impl MockFetcher {
        pub fn returning(rate: f64) -> Self {
            Self::with_response(Ok(rate))
        }

        pub fn failing() -> Self {
            Self::with_response(Err(FetchError::Network("connection refused".into())))
        }

        fn with_response(response: Result<f64, FetchError>) -> Self {
            Self {
                response: Mutex::new(response),
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn set_rate(&self, rate: f64) {
            *self.response.lock().unwrap() = Ok(rate);
        }

        pub fn fail_with(&self, err: FetchError) {
            *self.response.lock().unwrap() = Err(err);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requested(&self) -> Vec<(String, String)> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RateFetcher for MockFetcher {
        async fn fetch_pair(&self, from: &str, to: &str) -> Result<f64, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested
                .lock()
                .unwrap()
                .push((from.to_string(), to.to_string()));
            self.response.lock().unwrap().clone()
        }
    }

    /// Clock that only moves when told to.
    pub struct ManualClock {
        base: Instant,
        offset_ms: AtomicU64,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                base: Instant::now(),
                offset_ms: AtomicU64::new(0),
            }
        }

        pub fn advance(&self, ms: u64) {
            self.offset_ms.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
        }
    }

    fn service(fetcher: MockFetcher) -> ConversionService<MockFetcher, ManualClock> {
        ConversionService::with_clock(fetcher, ManualClock::new(), DEFAULT_TTL)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cache policy
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_first_lookup_fetches_and_caches() {
        let service = service(MockFetcher::returning(5.25));
        let t0 = service.clock().now();

        let converted = service.convert(100.0, "USD", "BRL").await.unwrap();

        assert_eq!(converted, 525.0);
        assert_eq!(service.fetcher().calls(), 1);
        let entry = service.cached_rate("USD", "BRL").unwrap();
        assert_eq!(entry.rate, 5.25);
        assert_eq!(entry.fetched_at, t0);
    }

    #[tokio::test]
    async fn test_codes_are_normalized_before_fetch_and_caching() {
        let service = service(MockFetcher::returning(5.25));

        service.get_rate("usd", " brl").await.unwrap();
        service.get_rate("USD", "BRL").await.unwrap();

        assert_eq!(service.fetcher().calls(), 1);
        assert_eq!(
            service.fetcher().requested(),
            vec![("USD".to_string(), "BRL".to_string())]
        );
        assert_eq!(service.cached_pairs(), 1);
    }

    #[tokio::test]
    async fn test_repeated_reads_within_ttl_fetch_once() {
        let service = service(MockFetcher::returning(5.25));

        for _ in 0..10 {
            assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.25);
        }

        assert_eq!(service.fetcher().calls(), 1);
    }

    #[tokio::test]
    async fn test_hit_inside_window_ignores_new_upstream_rate() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();

        service.fetcher().set_rate(6.0);
        service.clock().advance(200_000);

        assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.25);
        assert_eq!(service.fetcher().calls(), 1);
    }

    #[tokio::test]
    async fn test_one_ms_before_ttl_is_a_hit() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();

        service.clock().advance(DEFAULT_TTL.as_millis() as u64 - 1);
        service.get_rate("USD", "BRL").await.unwrap();

        assert_eq!(service.fetcher().calls(), 1);
    }

    #[tokio::test]
    async fn test_at_ttl_refetches_and_overwrites() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();

        service.fetcher().set_rate(5.40);
        service.clock().advance(DEFAULT_TTL.as_millis() as u64);

        assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.40);
        assert_eq!(service.fetcher().calls(), 2);

        let entry = service.cached_rate("USD", "BRL").unwrap();
        assert_eq!(entry.rate, 5.40);
        assert_eq!(entry.fetched_at, service.clock().now());
    }

    #[tokio::test]
    async fn test_pairs_are_cached_independently() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();

        service.fetcher().set_rate(0.19);
        assert_eq!(service.get_rate("BRL", "USD").await.unwrap(), 0.19);
        assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.25);
        assert_eq!(service.fetcher().calls(), 2);
        assert_eq!(service.cached_pairs(), 2);
    }

    #[tokio::test]
    async fn test_custom_ttl() {
        let service = ConversionService::with_clock(
            MockFetcher::returning(1.1),
            ManualClock::new(),
            Duration::from_millis(1_000),
        );
        assert_eq!(service.ttl(), Duration::from_millis(1_000));

        service.get_rate("EUR", "USD").await.unwrap();
        service.clock().advance(999);
        service.get_rate("EUR", "USD").await.unwrap();
        assert_eq!(service.fetcher().calls(), 1);

        service.clock().advance(1);
        service.get_rate("EUR", "USD").await.unwrap();
        assert_eq!(service.fetcher().calls(), 2);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Failure handling
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_expired_entry_served_when_fetch_fails() {
        let service = service(MockFetcher::returning(5.00));
        service.get_rate("USD", "BRL").await.unwrap();
        let before = service.cached_rate("USD", "BRL").unwrap();

        service.clock().advance(DEFAULT_TTL.as_millis() as u64 * 2);
        service
            .fetcher()
            .fail_with(FetchError::Network("connection reset".into()));

        assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.00);
        assert_eq!(service.fetcher().calls(), 2);
        assert_eq!(service.cached_rate("USD", "BRL").unwrap(), before);
    }

    #[tokio::test]
    async fn test_every_fetch_error_kind_falls_back() {
        let errors = [
            FetchError::Network("down".into()),
            FetchError::Timeout,
            FetchError::HttpStatus {
                status: 500,
                message: "boom".into(),
            },
            FetchError::Api("quota-reached".into()),
            FetchError::MalformedResponse("not json".into()),
        ];

        for err in errors {
            let service = service(MockFetcher::returning(3.0));
            service.get_rate("USD", "PEN").await.unwrap();
            service.clock().advance(DEFAULT_TTL.as_millis() as u64);
            service.fetcher().fail_with(err);

            assert_eq!(service.get_rate("USD", "PEN").await.unwrap(), 3.0);
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_with_empty_cache_is_an_error() {
        let service = service(MockFetcher::failing());

        let err = service.get_rate("USD", "BRL").await.unwrap_err();

        assert_eq!(
            err,
            ConversionError::FetchFailed {
                pair: "USD:BRL".into(),
                source: FetchError::Network("connection refused".into()),
            }
        );
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(service.cached_pairs(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_retried_on_next_call() {
        let service = service(MockFetcher::failing());
        assert!(service.get_rate("USD", "BRL").await.is_err());
        assert_eq!(service.fetcher().calls(), 1);

        service.fetcher().set_rate(5.25);
        assert_eq!(service.get_rate("USD", "BRL").await.unwrap(), 5.25);
        assert_eq!(service.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_fallback_does_not_refresh_timestamp() {
        let service = service(MockFetcher::returning(5.00));
        service.get_rate("USD", "BRL").await.unwrap();
        service.clock().advance(DEFAULT_TTL.as_millis() as u64);
        service.fetcher().fail_with(FetchError::Timeout);

        service.get_rate("USD", "BRL").await.unwrap();
        service.get_rate("USD", "BRL").await.unwrap();

        // Still stale, so every call tries upstream again.
        assert_eq!(service.fetcher().calls(), 3);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_zero_amount() {
        let service = service(MockFetcher::returning(0.5));
        assert_eq!(service.convert(0.0, "USD", "GBP").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_convert_negative_amount_rejected_without_fetch() {
        let service = service(MockFetcher::returning(0.5));

        let err = service.convert(-1.0, "USD", "GBP").await.unwrap_err();

        assert!(matches!(err, ConversionError::InvalidArgument(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(service.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_is_unrounded() {
        let service = service(MockFetcher::returning(0.123456789));
        let converted = service.convert(3.3333, "USD", "GBP").await.unwrap();
        assert_eq!(converted, 3.3333 * 0.123456789);
    }

    #[tokio::test]
    async fn test_convert_detailed() {
        let service = service(MockFetcher::returning(4.0));

        let result = service.convert_detailed(10.0, "usd", "brl").await.unwrap();

        assert_eq!(result.original_amount, 10.0);
        assert_eq!(result.from_currency, "USD");
        assert_eq!(result.converted_amount, 40.0);
        assert_eq!(result.to_currency, "BRL");
        assert_eq!(result.rate, 4.0);
        assert_eq!(result.inverse_rate, 0.25);
    }

    #[tokio::test]
    async fn test_convert_detailed_zero_rate_fails() {
        let service = service(MockFetcher::returning(0.0));
        let err = service.convert_detailed(10.0, "USD", "BRL").await.unwrap_err();
        assert_eq!(err, ConversionError::ZeroRate);
    }

    #[tokio::test]
    async fn test_empty_currency_rejected() {
        let service = service(MockFetcher::returning(1.0));
        let err = service.get_rate("", "BRL").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidArgument(_)));
        assert_eq!(service.fetcher().calls(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cache management & concurrency
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();

        service.clear_cache();

        assert_eq!(service.cached_pairs(), 0);
        assert!(service.cached_rate("USD", "BRL").is_none());
        service.get_rate("USD", "BRL").await.unwrap();
        assert_eq!(service.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_removes_fallback() {
        let service = service(MockFetcher::returning(5.25));
        service.get_rate("USD", "BRL").await.unwrap();
        service.clear_cache();
        service.fetcher().fail_with(FetchError::Timeout);

        assert!(service.get_rate("USD", "BRL").await.is_err());
    }

    /// Answers the first fetch, then parks each later one until released and fails it.
    struct GatedFetcher {
        primed: AtomicBool,
        release: Notify,
    }

    #[async_trait]
    impl RateFetcher for GatedFetcher {
        async fn fetch_pair(&self, _from: &str, _to: &str) -> Result<f64, FetchError> {
            if !self.primed.swap(true, Ordering::SeqCst) {
                return Ok(5.25);
            }
            self.release.notified().await;
            Err(FetchError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_clear_during_fetch_leaves_no_fallback() {
        let fetcher = GatedFetcher {
            primed: AtomicBool::new(false),
            release: Notify::new(),
        };
        let service = ConversionService::with_clock(fetcher, ManualClock::new(), DEFAULT_TTL);
        service.get_rate("USD", "BRL").await.unwrap();
        service.clock().advance(DEFAULT_TTL.as_millis() as u64);

        // The lookup sees the stale entry, then the cache is cleared mid-fetch.
        let lookup = service.get_rate("USD", "BRL");
        let clear = async {
            tokio::task::yield_now().await;
            service.clear_cache();
            service.fetcher().release.notify_one();
        };
        let (result, ()) = tokio::join!(lookup, clear);

        assert!(matches!(result, Err(ConversionError::FetchFailed { .. })));
        assert_eq!(service.cached_pairs(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups() {
        let service = Arc::new(ConversionService::new(MockFetcher::returning(5.25)));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = service.clone();
                let (from, to) = if i % 2 == 0 { ("USD", "BRL") } else { ("EUR", "BRL") };
                tokio::spawn(async move { service.get_rate(from, to).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 5.25);
        }

        // No coalescing: concurrent misses may each fetch, but never more than once per call.
        let calls = service.fetcher().calls();
        assert!((2..=32).contains(&calls));
        assert_eq!(service.cached_pairs(), 2);
    }
}
