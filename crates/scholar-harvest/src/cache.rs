//! Memoization of completed harvests.
//!
//! One explicitly constructed, internally synchronized cache instance is
//! shared by all concurrent workers; entries are whole immutable records
//! keyed by `"{name}:{institution}"`. Expired entries are simply treated as
//! absent, eviction is the cache's own lazy business.

use moka::future::Cache;
use tracing::debug;

use crate::config::Config;
use crate::models::AuthorRecord;

/// TTL-bounded cache of resolved author records.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<String, AuthorRecord>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").field("entries", &self.inner.entry_count()).finish()
    }
}

impl ResultCache {
    /// Build a cache with the configured TTL and capacity.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();
        Self { inner }
    }

    /// Look up a record; expired entries miss.
    pub async fn get(&self, key: &str) -> Option<AuthorRecord> {
        self.inner.get(key).await
    }

    /// Store a completed harvest.
    ///
    /// Degenerate results are never cached: a record with no publications is
    /// dropped so a transient empty harvest cannot poison later lookups for
    /// the full TTL window.
    pub async fn put(&self, key: &str, record: &AuthorRecord) {
        if record.publications.is_empty() {
            debug!(key, "not caching record without publications");
            return;
        }

        self.inner.insert(key.to_string(), record.clone()).await;
        debug!(key, publications = record.publications.len(), "cached harvest");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{AuthorProfile, Publication, PublicationKind};

    fn profile() -> AuthorProfile {
        AuthorProfile {
            external_id: "AbC123".to_string(),
            name: "Jane Doe".to_string(),
            affiliation: "State University".to_string(),
            h_index: "42".to_string(),
            i10_index: "100".to_string(),
            photo: String::new(),
            email_domain: None,
            interests: Vec::new(),
        }
    }

    fn record(publication_count: usize) -> AuthorRecord {
        let publications = (0..publication_count)
            .map(|i| Publication {
                title: format!("Paper {i}"),
                year: "2021".to_string(),
                kind: PublicationKind::Other,
                venue: "arXiv preprint".to_string(),
                authors: "J Doe".to_string(),
                cited_by: "0".to_string(),
            })
            .collect();
        AuthorRecord { profile: profile(), publications }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let cache = ResultCache::new(&Config::for_testing("http://x"));
        let record = record(3);

        cache.put("Jane Doe:State University", &record).await;
        let hit = cache.get("Jane Doe:State University").await.unwrap();
        assert_eq!(hit, record);
    }

    #[tokio::test]
    async fn test_empty_publications_never_cached() {
        let cache = ResultCache::new(&Config::for_testing("http://x"));

        cache.put("Jane Doe:", &record(0)).await;
        assert!(cache.get("Jane Doe:").await.is_none());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = ResultCache::new(&Config::for_testing("http://x"));

        cache.put("Jane Doe:State University", &record(2)).await;
        assert!(cache.get("Jane Doe:").await.is_none());
        assert!(cache.get("Jane Doe:Other Place").await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let mut config = Config::for_testing("http://x");
        config.cache_ttl = Duration::from_millis(50);
        let cache = ResultCache::new(&config);

        cache.put("Jane Doe:", &record(1)).await;
        assert!(cache.get("Jane Doe:").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get("Jane Doe:").await.is_none());
    }
}
