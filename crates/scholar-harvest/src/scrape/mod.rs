//! HTML extraction for the external index's pages.
//!
//! The index serves a documented but unstable DOM; every extractor here
//! treats a malformed element as a per-element skip, never as a page-level
//! failure. Parsing is pure: no fetching, no retrying.

mod profile;
mod publications;
mod search;

pub use profile::{ProfileStats, extract_profile, parse_profile_stats};
pub use publications::{has_more_pages, parse_publications};
pub use search::parse_candidates;

/// Collect the visible text of an element, whitespace-trimmed.
fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
