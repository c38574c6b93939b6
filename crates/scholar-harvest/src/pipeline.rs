//! Single-query harvest pipeline.
//!
//! One run executes strictly in dependency order: cache check, identity
//! resolution, profile extraction, publication crawl, classification and
//! ordering, cache store. All requests of a run go through one client
//! identity; a new run draws a fresh one.

use tracing::{info, instrument};

use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{FetchError, HarvestResult};
use crate::fetch::Fetcher;
use crate::models::{AuthorRecord, SearchQuery, sort_by_year_desc};
use crate::paginator::PublicationPaginator;
use crate::resolver::AuthorResolver;
use crate::session::SessionFactory;

/// The harvesting engine: resolves queries into cached author records.
#[derive(Debug, Clone)]
pub struct Harvester {
    config: Config,
    sessions: SessionFactory,
    cache: ResultCache,
}

impl Harvester {
    /// Create an engine with a fresh cache.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let sessions = SessionFactory::new(&config);
        let cache = ResultCache::new(&config);
        Self { config, sessions, cache }
    }

    /// The engine's shared result cache.
    #[must_use]
    pub const fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one query.
    ///
    /// A record with zero publications is a valid terminal state; it is
    /// returned to the caller but never cached.
    ///
    /// # Errors
    ///
    /// [`crate::error::HarvestError::NotFound`] when no author matches, or a
    /// fetch error once some page's retry budget is spent. Failures are
    /// never cached.
    #[instrument(skip(self), fields(name = %query.name))]
    pub async fn harvest(&self, query: &SearchQuery) -> HarvestResult<AuthorRecord> {
        let key = query.cache_key();

        if let Some(hit) = self.cache.get(&key).await {
            info!(publications = hit.publications.len(), "cache hit");
            return Ok(hit);
        }

        let client = self.sessions.create().map_err(FetchError::from)?;
        let fetcher = Fetcher::new(client, &self.config);

        let resolver = AuthorResolver::new(&fetcher, &self.config);
        let profile = resolver.resolve(query).await?;

        let paginator = PublicationPaginator::new(&fetcher, &self.config);
        let mut publications = paginator.fetch_all(&profile.external_id).await?;
        sort_by_year_desc(&mut publications);

        let record = AuthorRecord { profile, publications };
        self.cache.put(&key, &record).await;

        info!(
            author = %record.profile.name,
            publications = record.publications.len(),
            "harvest complete"
        );
        Ok(record)
    }
}
