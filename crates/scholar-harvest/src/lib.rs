//! Scholar Harvest
//!
//! Resolves a person's identity against an external bibliometric index from
//! a bare name (optionally disambiguated by an institution string), crawls
//! the person's full publication history page by page, classifies each
//! publication by venue, and caches results. A batch mode fans the pipeline
//! out over many people with bounded concurrency and pacing that respects
//! the index's implicit rate limits.
//!
//! # Features
//!
//! - **Identity resolution**: heuristic affiliation scoring with name-only
//!   fallback
//! - **Resilient fetching**: rotating client identities, human-like pacing,
//!   explicit retry policy with exponential backoff and jitter
//! - **Bounded crawl**: page-count ceiling, all-or-nothing per author
//! - **Cached**: 1-hour TTL cache shared across concurrent workers
//!
//! # Example
//!
//! ```no_run
//! use scholar_harvest::{Config, Harvester, models::SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let harvester = Harvester::new(Config::from_env());
//!     let query = SearchQuery::with_institution("Jane Doe", "State University");
//!     let record = harvester.harvest(&query).await?;
//!     println!("{} publications", record.publications.len());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod paginator;
pub mod pipeline;
pub mod resolver;
pub mod scrape;
pub mod session;

pub use batch::{BatchOrchestrator, Outcome};
pub use cache::ResultCache;
pub use config::Config;
pub use error::{FetchError, HarvestError};
pub use pipeline::Harvester;
