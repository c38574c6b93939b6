//! Paginated publication-listing crawl.

use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::HarvestResult;
use crate::fetch::{Fetcher, sample_delay};
use crate::models::Publication;
use crate::scrape;

/// Walks an author's publication listing page by page.
///
/// The walk is finite by construction: it stops on an empty page, on an
/// exhausted "more results" control, or at the page ceiling, whichever comes
/// first. A fetch failure mid-walk propagates and discards the pages already
/// collected; the caller gets all pages or none.
pub struct PublicationPaginator<'a> {
    fetcher: &'a Fetcher,
    config: &'a Config,
}

impl<'a> PublicationPaginator<'a> {
    /// Create a paginator borrowing one run's fetcher identity.
    #[must_use]
    pub fn new(fetcher: &'a Fetcher, config: &'a Config) -> Self {
        Self { fetcher, config }
    }

    /// Fetch the complete (ceiling-bounded) publication list for an author.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error of any page whose retry budget is spent.
    pub async fn fetch_all(&self, external_id: &str) -> HarvestResult<Vec<Publication>> {
        let mut all = Vec::new();

        for page in 0..self.config.max_pages {
            if page > 0 {
                // Page-to-page pacing, distinct from per-attempt pacing.
                tokio::time::sleep(sample_delay(&self.config.page_pacing)).await;
            }

            let start = page * self.config.page_size;
            let url = self.listing_url(external_id, start)?;
            debug!(id = external_id, page = page + 1, start, "fetching publication page");

            let html = self.fetcher.fetch_text(url.as_str()).await?;
            let rows = scrape::parse_publications(&html);

            if rows.is_empty() {
                break;
            }
            all.extend(rows);

            if !scrape::has_more_pages(&html) {
                break;
            }
        }

        info!(id = external_id, total = all.len(), "publication crawl complete");
        Ok(all)
    }

    fn listing_url(&self, external_id: &str, start: u32) -> HarvestResult<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.set_path("/citations");
        url.query_pairs_mut()
            .append_pair("user", external_id)
            .append_pair("hl", "en")
            .append_pair("cstart", &start.to_string())
            .append_pair("pagesize", &self.config.page_size.to_string());
        Ok(url)
    }
}
