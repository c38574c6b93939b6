//! Configuration for the harvesting engine.

use std::ops::Range;
use std::time::Duration;

/// External index constants.
pub mod scholar {
    use std::time::Duration;

    /// Base URL of the external bibliometric index.
    pub const BASE_URL: &str = "https://scholar.google.com";

    /// Request timeout per fetch attempt.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Pacing delay bounds before each fetch attempt (anti-detection).
    pub const FETCH_PACING: (Duration, Duration) =
        (Duration::from_secs(1), Duration::from_secs(3));

    /// Pacing delay bounds between publication pages.
    pub const PAGE_PACING: (Duration, Duration) =
        (Duration::from_secs(2), Duration::from_secs(4));

    /// Pacing delay bounds between batch queries on one worker.
    pub const BATCH_PACING: (Duration, Duration) =
        (Duration::from_secs(3), Duration::from_secs(5));

    /// Maximum fetch attempts per URL (initial try included).
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential retry backoff.
    pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

    /// Maximum jitter added on top of a backoff delay.
    pub const RETRY_MAX_JITTER: Duration = Duration::from_secs(1);

    /// Publications requested per listing page (index maximum).
    pub const PAGE_SIZE: u32 = 100;

    /// Hard ceiling on listing pages walked per author.
    pub const MAX_PAGES: u32 = 10;

    /// Search-result candidates considered per query.
    pub const CANDIDATE_LIMIT: usize = 5;

    /// Fraction of institution words that must match an affiliation.
    pub const MATCH_THRESHOLD: f64 = 0.3;

    /// Cache TTL (1 hour).
    pub const CACHE_TTL: Duration = Duration::from_secs(3600);

    /// Maximum cached authors.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Ceiling on concurrent batch workers.
    pub const MAX_WORKERS: usize = 3;
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external index (overridable for mock servers).
    pub base_url: String,

    /// Request timeout per fetch attempt.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Pacing delay range before each fetch attempt.
    pub fetch_pacing: Range<Duration>,

    /// Pacing delay range between publication pages.
    pub page_pacing: Range<Duration>,

    /// Pacing delay range between batch queries on one worker.
    pub batch_pacing: Range<Duration>,

    /// Maximum fetch attempts per URL.
    pub max_attempts: u32,

    /// Base delay for retry backoff.
    pub retry_base_delay: Duration,

    /// Maximum jitter added to backoff delays.
    pub retry_max_jitter: Duration,

    /// Publications per listing page.
    pub page_size: u32,

    /// Hard page-count ceiling per author.
    pub max_pages: u32,

    /// Candidates considered per search-results page.
    pub candidate_limit: usize,

    /// Institution match-score acceptance threshold.
    pub match_threshold: f64,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cached authors.
    pub cache_max_size: u64,

    /// Ceiling on concurrent batch workers.
    pub max_workers: usize,
}

impl Config {
    /// Create a configuration with production pacing and limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: scholar::BASE_URL.to_string(),
            request_timeout: scholar::REQUEST_TIMEOUT,
            connect_timeout: scholar::CONNECT_TIMEOUT,
            fetch_pacing: scholar::FETCH_PACING.0..scholar::FETCH_PACING.1,
            page_pacing: scholar::PAGE_PACING.0..scholar::PAGE_PACING.1,
            batch_pacing: scholar::BATCH_PACING.0..scholar::BATCH_PACING.1,
            max_attempts: scholar::MAX_ATTEMPTS,
            retry_base_delay: scholar::RETRY_BASE_DELAY,
            retry_max_jitter: scholar::RETRY_MAX_JITTER,
            page_size: scholar::PAGE_SIZE,
            max_pages: scholar::MAX_PAGES,
            candidate_limit: scholar::CANDIDATE_LIMIT,
            match_threshold: scholar::MATCH_THRESHOLD,
            cache_ttl: scholar::CACHE_TTL,
            cache_max_size: scholar::CACHE_MAX_SIZE,
            max_workers: scholar::MAX_WORKERS,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SCHOLAR_BASE_URL` overrides the index base URL (useful behind a
    /// proxy); all other values use production defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(base) = std::env::var("SCHOLAR_BASE_URL") {
            config.base_url = base;
        }
        config
    }

    /// Create a test configuration pointed at a mock server.
    ///
    /// All pacing delays are zeroed so tests run at full speed, and backoff
    /// is shrunk so retry paths stay fast.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            fetch_pacing: Duration::ZERO..Duration::ZERO,
            page_pacing: Duration::ZERO..Duration::ZERO,
            batch_pacing: Duration::ZERO..Duration::ZERO,
            max_attempts: scholar::MAX_ATTEMPTS,
            retry_base_delay: Duration::from_millis(10),
            retry_max_jitter: Duration::from_millis(5),
            page_size: scholar::PAGE_SIZE,
            max_pages: scholar::MAX_PAGES,
            candidate_limit: scholar::CANDIDATE_LIMIT,
            match_threshold: scholar::MATCH_THRESHOLD,
            cache_ttl: scholar::CACHE_TTL,
            cache_max_size: scholar::CACHE_MAX_SIZE,
            max_workers: scholar::MAX_WORKERS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
