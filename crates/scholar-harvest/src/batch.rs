//! Bounded-concurrency batch orchestration.
//!
//! A fixed set of workers pulls queries from a shared queue and pushes
//! per-query outcomes onto a channel the orchestrator drains. Outcomes
//! arrive in completion order; each carries its originating query so
//! callers can re-associate or re-sort. One query's failure is recorded and
//! never cancels its siblings.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::HarvestError;
use crate::fetch::sample_delay;
use crate::models::{AuthorRecord, Publication, SearchQuery};
use crate::pipeline::Harvester;

/// Per-query result of a batch run.
#[derive(Debug)]
pub enum Outcome {
    /// The pipeline completed; the record may legitimately hold zero
    /// publications.
    Success {
        /// The originating query.
        query: SearchQuery,
        /// The harvested record.
        record: AuthorRecord,
    },

    /// The pipeline failed for this query only.
    Failure {
        /// The originating query.
        query: SearchQuery,
        /// Why it failed.
        reason: HarvestError,
    },
}

impl Outcome {
    /// The query this outcome belongs to.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        match self {
            Self::Success { query, .. } | Self::Failure { query, .. } => query,
        }
    }

    /// True for successful outcomes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One row of the flattened batch publication table.
#[derive(Debug, Clone, Serialize)]
pub struct FacultyPublicationRow {
    /// The publication record fields.
    #[serde(flatten)]
    pub publication: Publication,

    /// Owning faculty member's resolved name.
    #[serde(rename = "Faculty")]
    pub faculty: String,

    /// Owning faculty member's resolved affiliation.
    #[serde(rename = "Faculty_Institution")]
    pub faculty_institution: String,
}

/// Flatten successful outcomes into one publication table.
///
/// Each row carries the owning faculty's name and affiliation; failed
/// outcomes contribute nothing.
#[must_use]
pub fn flatten_outcomes(outcomes: &[Outcome]) -> Vec<FacultyPublicationRow> {
    let mut rows = Vec::new();
    for outcome in outcomes {
        if let Outcome::Success { record, .. } = outcome {
            for publication in &record.publications {
                rows.push(FacultyPublicationRow {
                    publication: publication.clone(),
                    faculty: record.profile.name.clone(),
                    faculty_institution: record.profile.affiliation.clone(),
                });
            }
        }
    }
    rows
}

/// Runs the harvest pipeline over many queries with bounded concurrency.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    harvester: Harvester,
}

impl BatchOrchestrator {
    /// Create an orchestrator sharing the given engine (and its cache).
    #[must_use]
    pub const fn new(harvester: Harvester) -> Self {
        Self { harvester }
    }

    /// Run the pipeline over all queries; outcomes in completion order.
    pub async fn run(&self, queries: Vec<SearchQuery>) -> Vec<Outcome> {
        self.run_with_cancellation(queries, CancellationToken::new()).await
    }

    /// Run the batch, honoring a cancellation hook.
    ///
    /// Cancellation stops workers from pulling further queries; queries
    /// already in flight complete and their outcomes are still reported.
    pub async fn run_with_cancellation(
        &self,
        queries: Vec<SearchQuery>,
        cancel: CancellationToken,
    ) -> Vec<Outcome> {
        let total = queries.len();
        if total == 0 {
            return Vec::new();
        }

        let workers = self.harvester.config().max_workers.min(total).max(1);
        info!(total, workers, "starting batch");

        let queue = Arc::new(Mutex::new(queries.into_iter().collect::<VecDeque<_>>()));
        let (tx, mut rx) = mpsc::channel::<Outcome>(total);

        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let harvester = self.harvester.clone();
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let cancel = cancel.clone();
            handles.push(tokio::spawn(async move {
                worker_loop(worker, &harvester, &queue, &tx, &cancel).await;
            }));
        }
        drop(tx);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        for handle in handles {
            let _ = handle.await;
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(total, succeeded, failed = outcomes.len() - succeeded, "batch complete");
        outcomes
    }
}

async fn worker_loop(
    worker: usize,
    harvester: &Harvester,
    queue: &Mutex<VecDeque<SearchQuery>>,
    tx: &mpsc::Sender<Outcome>,
    cancel: &CancellationToken,
) {
    loop {
        if cancel.is_cancelled() {
            debug!(worker, "cancelled, not pulling further queries");
            break;
        }

        let Some(query) = pop_front(queue) else {
            break;
        };

        debug!(worker, name = %query.name, "processing query");
        let outcome = match harvester.harvest(&query).await {
            Ok(record) => Outcome::Success { query, record },
            Err(reason) => {
                warn!(worker, name = %query.name, error = %reason, "query failed");
                Outcome::Failure { query, reason }
            }
        };

        if tx.send(outcome).await.is_err() {
            break;
        }

        // Inter-task pacing throttles aggregate request rate independently
        // of per-fetch pacing.
        tokio::time::sleep(sample_delay(&harvester.config().batch_pacing)).await;
    }
}

/// Pop under the lock without holding it across an await point.
fn pop_front(queue: &Mutex<VecDeque<SearchQuery>>) -> Option<SearchQuery> {
    queue.lock().map(|mut q| q.pop_front()).unwrap_or(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorProfile, PublicationKind};

    fn record(name: &str, titles: &[&str]) -> AuthorRecord {
        AuthorRecord {
            profile: AuthorProfile {
                external_id: "id".to_string(),
                name: name.to_string(),
                affiliation: "State University".to_string(),
                h_index: "1".to_string(),
                i10_index: "1".to_string(),
                photo: String::new(),
                email_domain: None,
                interests: Vec::new(),
            },
            publications: titles
                .iter()
                .map(|t| Publication {
                    title: (*t).to_string(),
                    year: "2020".to_string(),
                    kind: PublicationKind::Other,
                    venue: "arXiv preprint".to_string(),
                    authors: "J Doe".to_string(),
                    cited_by: "0".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_outcome_carries_query() {
        let query = SearchQuery::new("Jane Doe");
        let failure = Outcome::Failure {
            query: query.clone(),
            reason: HarvestError::not_found("Jane Doe"),
        };
        assert_eq!(failure.query(), &query);
        assert!(!failure.is_success());
    }

    #[test]
    fn test_flatten_attaches_faculty_columns() {
        let outcomes = vec![
            Outcome::Success {
                query: SearchQuery::new("Jane Doe"),
                record: record("Jane Doe", &["P1", "P2"]),
            },
            Outcome::Failure {
                query: SearchQuery::new("Ghost"),
                reason: HarvestError::not_found("Ghost"),
            },
            Outcome::Success {
                query: SearchQuery::new("Ada L"),
                record: record("Ada L", &["P3"]),
            },
        ];

        let rows = flatten_outcomes(&outcomes);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].faculty, "Jane Doe");
        assert_eq!(rows[2].faculty, "Ada L");

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["Title"], "P1");
        assert_eq!(json["Faculty"], "Jane Doe");
        assert_eq!(json["Faculty_Institution"], "State University");
    }
}
