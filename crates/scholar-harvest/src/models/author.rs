//! Author identity types: queries, search candidates, resolved profiles.

use serde::{Deserialize, Serialize};

use super::Publication;

/// One identity-resolution request.
///
/// The institution is free text and is never normalized; it only feeds the
/// affiliation match heuristic. `Eq`/`Hash` let batch callers re-associate
/// completion-ordered outcomes with their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Person name as entered.
    pub name: String,

    /// Optional disambiguating institution text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl SearchQuery {
    /// Create a query from a name, without institution.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), institution: None }
    }

    /// Create a query from a name and institution.
    #[must_use]
    pub fn with_institution(name: impl Into<String>, institution: impl Into<String>) -> Self {
        Self { name: name.into(), institution: Some(institution.into()) }
    }

    /// Cache key for this query.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.name, self.institution.as_deref().unwrap_or(""))
    }
}

/// A provisional identity match parsed from one search-results entry.
///
/// Lives only inside the resolver; candidates without an extractable stable
/// id are discarded before one of these is ever built.
#[derive(Debug, Clone)]
pub struct CandidateAuthor {
    /// Display name from the result entry.
    pub display_name: String,

    /// Stable profile identifier from the entry's link.
    pub external_id: String,

    /// Affiliation line, `"N/A"` when the entry has none.
    pub affiliation: String,

    /// Verified email domain, when shown on the result entry.
    pub email_domain: Option<String>,

    /// Research interest tags listed on the result entry.
    pub interests: Vec<String>,

    /// Institution match score in `[0, 1]`; 0 for fallback picks.
    pub match_score: f64,
}

/// A resolved author profile with summary metrics.
///
/// Immutable once composed; re-fetched only on cache miss or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Stable identifier in the external index.
    #[serde(skip)]
    pub external_id: String,

    /// Display name.
    pub name: String,

    /// Affiliation text, `"N/A"` when unknown.
    pub affiliation: String,

    /// h-index as shown on the profile, `"N/A"` when unparsable.
    pub h_index: String,

    /// i10-index as shown on the profile, `"N/A"` when unparsable.
    pub i10_index: String,

    /// Profile photo URL, empty when absent.
    pub photo: String,

    /// Verified email domain from the search entry, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,

    /// Research interest tags from the search entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
}

/// One complete harvest result: a profile plus its ordered publications.
///
/// Publications are sorted newest-first with non-numeric years last. An
/// empty publication list is a valid terminal state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// The resolved profile.
    pub profile: AuthorProfile,

    /// Ordered publication history.
    pub publications: Vec<Publication>,
}
