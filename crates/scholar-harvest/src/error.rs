//! Error types for the scholar harvesting engine.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations. Two layers: [`FetchError`] for the transport boundary
//! (surfaced only after bounded retries are exhausted) and [`HarvestError`]
//! for pipeline-level outcomes such as an unresolvable author.

/// Errors from the HTTP fetch layer.
///
/// A `FetchError` means the network itself failed after the retry budget was
/// spent. "The page loaded but held nothing useful" is never a `FetchError`;
/// that is a semantic outcome reported by the resolver or paginator.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (connection, DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("unexpected status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Retry budget exhausted; wraps the final attempt's failure.
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made.
        attempts: u32,
        /// The error from the last attempt.
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status { status, url: url.into() }
    }

    /// Returns true if another attempt could plausibly succeed.
    ///
    /// Everything at this layer is treated as transient: the external index
    /// answers 429/5xx under load and drops connections under automation
    /// pressure. Exhaustion itself is final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::RetriesExhausted { .. })
    }
}

/// Errors from the resolution/harvest pipeline.
#[derive(thiserror::Error, Debug)]
pub enum HarvestError {
    /// Transport failure that survived the retry budget.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The search completed but no candidate met the selection criteria.
    #[error("no author found for '{name}'")]
    NotFound {
        /// The queried name.
        name: String,
    },

    /// A URL could not be constructed from query input.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HarvestError {
    /// Create a not-found error for the given queried name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// True when the network worked but the semantic result was empty.
    ///
    /// Retrying an unambiguous negative wastes quota, so callers should not
    /// re-dispatch queries that end here.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for pipeline operations.
pub type HarvestResult<T> = Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_retryable() {
        assert!(FetchError::status(429, "http://x").is_retryable());
        assert!(FetchError::status(503, "http://x").is_retryable());

        let exhausted = FetchError::RetriesExhausted {
            attempts: 3,
            last: Box::new(FetchError::status(500, "http://x")),
        };
        assert!(!exhausted.is_retryable());
    }

    #[test]
    fn test_not_found_is_semantic() {
        let err = HarvestError::not_found("Jane Doe");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Jane Doe"));

        let err = HarvestError::Fetch(FetchError::status(500, "http://x"));
        assert!(!err.is_not_found());
    }
}
