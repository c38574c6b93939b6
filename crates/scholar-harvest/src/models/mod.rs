//! Data models for resolved authors and their publication histories.
//!
//! Serialized field names follow the downstream record schemas consumed by
//! exporters (`Title`/`Year`/`Type`/... for publications, snake_case for
//! profiles), so serializing these types yields the wire format directly.

mod author;
mod publication;

pub use author::{AuthorProfile, AuthorRecord, CandidateAuthor, SearchQuery};
pub use publication::{Publication, PublicationKind, classify_venue, sort_by_year_desc};
