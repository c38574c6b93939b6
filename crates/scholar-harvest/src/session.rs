//! Outbound HTTP identities.
//!
//! Every top-level resolution run gets a fresh client identity: a randomly
//! drawn browser user-agent plus a fixed header set hinting at organic
//! traffic from the index's own front page. Identities share nothing; one
//! run uses a single identity across all of its requests.

use rand::seq::SliceRandom;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};

use crate::config::Config;

/// Browser user-agents rotated across identities.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
];

/// Produces per-run HTTP client identities.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    base_url: String,
    request_timeout: std::time::Duration,
    connect_timeout: std::time::Duration,
}

impl SessionFactory {
    /// Create a factory from the engine configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout,
            connect_timeout: config.connect_timeout,
        }
    }

    /// Build a fresh client identity with a randomized user-agent.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn create(&self) -> reqwest::Result<Client> {
        let agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(agent),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml"),
        );
        if let Ok(referer) = HeaderValue::from_str(&format!("{}/", self.base_url)) {
            headers.insert(REFERER, referer);
        }

        Client::builder()
            .default_headers(headers)
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .gzip(true)
            .build()
    }
}
