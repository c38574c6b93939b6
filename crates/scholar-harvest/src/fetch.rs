//! Retrying page fetcher with human-like pacing.
//!
//! Retry behavior is carried by an explicit [`RetryPolicy`] value applied at
//! the call site, so suspension points are visible where requests happen.
//! Two distinct kinds of delay exist here: the pacing delay inserted before
//! every attempt (anti-detection), and the backoff delay between failed
//! attempts (load shedding). They are sampled independently.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Sample a delay uniformly from a range; empty ranges yield the start.
///
/// Test configurations zero both bounds, which `gen_range` would reject.
pub(crate) fn sample_delay(range: &Range<Duration>) -> Duration {
    if range.start >= range.end {
        range.start
    } else {
        rand::thread_rng().gen_range(range.clone())
    }
}

/// Exponential backoff policy for transient fetch failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts allowed, initial try included.
    max_attempts: u32,

    /// Delay before the first retry; doubles each subsequent retry.
    base_delay: Duration,

    /// Maximum random jitter added on top of each backoff delay.
    max_jitter: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit settings.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay, max_jitter }
    }

    /// Total attempts allowed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff delay after the given failed attempt (1-indexed), with jitter.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(2u32.saturating_pow(attempt.min(16)));
        exp + sample_delay(&(Duration::ZERO..self.max_jitter))
    }
}

impl From<&Config> for RetryPolicy {
    fn from(config: &Config) -> Self {
        Self::new(config.max_attempts, config.retry_base_delay, config.retry_max_jitter)
    }
}

/// Issues single GET requests through one client identity.
///
/// Paces before every attempt, retries transient failures per its policy,
/// and surfaces [`FetchError::RetriesExhausted`] once the budget is spent.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
    pacing: Range<Duration>,
}

impl Fetcher {
    /// Wrap a client identity with retry and pacing behavior.
    #[must_use]
    pub fn new(client: Client, config: &Config) -> Self {
        Self { client, policy: RetryPolicy::from(config), pacing: config.fetch_pacing.clone() }
    }

    /// Fetch a URL and return its body text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RetriesExhausted`] after the final failed
    /// attempt, wrapping that attempt's error.
    pub async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            // Pacing is independent of backoff and applies to every attempt.
            tokio::time::sleep(sample_delay(&self.pacing)).await;

            match self.try_fetch(url).await {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "fetched page");
                    return Ok(body);
                }
                Err(err) if attempt < self.policy.max_attempts() => {
                    let delay = self.policy.backoff_delay(attempt);
                    warn!(
                        url,
                        attempt,
                        max = self.policy.max_attempts(),
                        ?delay,
                        error = %err,
                        "fetch failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    return Err(FetchError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(err),
                    });
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> FetchResult<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), url));
        }

        Ok(response.text().await?)
    }
}
