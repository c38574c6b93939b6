//! Author identity resolution against the search endpoint.
//!
//! Resolution is best-effort heuristic scoring, not ground-truth linkage:
//! the first candidate whose affiliation clears the match threshold wins,
//! and an institution-qualified search that retains nobody degrades to a
//! name-only search rather than failing outright.

use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{HarvestError, HarvestResult};
use crate::fetch::Fetcher;
use crate::models::{AuthorProfile, CandidateAuthor, SearchQuery};
use crate::scrape;

/// Resolves a name (plus optional institution) to an author profile.
pub struct AuthorResolver<'a> {
    fetcher: &'a Fetcher,
    config: &'a Config,
}

impl<'a> AuthorResolver<'a> {
    /// Create a resolver borrowing one run's fetcher identity.
    #[must_use]
    pub fn new(fetcher: &'a Fetcher, config: &'a Config) -> Self {
        Self { fetcher, config }
    }

    /// Resolve a query to a composed author profile.
    ///
    /// # Errors
    ///
    /// [`HarvestError::NotFound`] when no candidate is ever selected;
    /// [`HarvestError::Fetch`] when the network fails past its retry budget.
    pub async fn resolve(&self, query: &SearchQuery) -> HarvestResult<AuthorProfile> {
        let mut selected = None;

        if let Some(institution) = query.institution.as_deref() {
            let terms = format!("{} {}", query.name, institution);
            let candidates = self.search(&terms).await?;
            info!(
                name = %query.name,
                institution,
                candidates = candidates.len(),
                "institution-qualified search"
            );

            selected = select_candidate(candidates, Some(institution), self.config.match_threshold);

            if selected.is_none() {
                warn!(
                    name = %query.name,
                    institution,
                    "no candidate retained with institution, falling back to name-only search"
                );
            }
        }

        if selected.is_none() {
            let candidates = self.search(&query.name).await?;
            info!(name = %query.name, candidates = candidates.len(), "name-only search");
            selected = select_candidate(candidates, None, self.config.match_threshold);
        }

        let Some(candidate) = selected else {
            return Err(HarvestError::not_found(&query.name));
        };

        info!(
            name = %candidate.display_name,
            id = %candidate.external_id,
            affiliation = %candidate.affiliation,
            score = candidate.match_score,
            "selected author"
        );

        let profile_url = self.profile_url(&candidate.external_id)?;
        let html = self.fetcher.fetch_text(profile_url.as_str()).await?;
        Ok(scrape::extract_profile(&candidate, &html))
    }

    async fn search(&self, terms: &str) -> HarvestResult<Vec<CandidateAuthor>> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.set_path("/citations");
        url.query_pairs_mut()
            .append_pair("view_op", "search_authors")
            .append_pair("mauthors", terms)
            .append_pair("hl", "en");

        let html = self.fetcher.fetch_text(url.as_str()).await?;
        Ok(scrape::parse_candidates(&html, self.config.candidate_limit))
    }

    fn profile_url(&self, external_id: &str) -> HarvestResult<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.set_path("/citations");
        url.query_pairs_mut().append_pair("user", external_id).append_pair("hl", "en");
        Ok(url)
    }
}

/// Pick a candidate from a scanned results page.
///
/// With an institution: the first candidate whose affiliation score exceeds
/// the threshold wins immediately (first-above-threshold, not best-of-all);
/// if none clears it, the first candidate is retained as a fallback-quality
/// pick with score 0. Without an institution: the first candidate wins.
#[must_use]
pub fn select_candidate(
    candidates: Vec<CandidateAuthor>,
    institution: Option<&str>,
    threshold: f64,
) -> Option<CandidateAuthor> {
    let mut fallback = None;

    for (position, mut candidate) in candidates.into_iter().enumerate() {
        debug!(
            position = position + 1,
            name = %candidate.display_name,
            affiliation = %candidate.affiliation,
            "candidate"
        );

        if let Some(institution) = institution {
            let score = match_score(&candidate.affiliation, institution);
            debug!(score, threshold, "institution match score");

            if score > threshold {
                candidate.match_score = score;
                return Some(candidate);
            }
        } else {
            return Some(candidate);
        }

        if fallback.is_none() {
            fallback = Some(candidate);
        }
    }

    fallback
}

/// Fraction of an institution's significant words found in an affiliation.
///
/// Words of length <= 2 are ignored; matching is case-insensitive substring
/// containment. Returns a value in `[0, 1]`, and 0 whenever no word
/// qualifies, so such inputs can never clear the acceptance threshold.
#[must_use]
pub fn match_score(affiliation: &str, institution: &str) -> f64 {
    let affiliation = affiliation.to_lowercase();
    let words: Vec<String> = institution
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(ToString::to_string)
        .collect();

    if words.is_empty() {
        return 0.0;
    }

    let matched = words.iter().filter(|w| affiliation.contains(w.as_str())).count();
    matched as f64 / words.len() as f64
}
