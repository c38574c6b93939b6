//! Profile page extraction: summary statistics and photo.

use scraper::{Html, Selector};

use super::element_text;
use crate::models::{AuthorProfile, CandidateAuthor};

/// Summary statistics scraped from a profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    /// h-index text, `"N/A"` when the stats table is missing or short.
    pub h_index: String,
    /// i10-index text, `"N/A"` when the stats table is missing or short.
    pub i10_index: String,
    /// Photo URL, empty when absent.
    pub photo: String,
}

/// Parse the citation statistics table and photo from a profile page.
///
/// The stats table lays out six cells (citations / h-index / i10-index, each
/// with an all-time and a recent column); h-index is cell 2 and i10-index is
/// cell 4. A short or missing table degrades to `"N/A"` per cell rather than
/// failing the extraction.
#[must_use]
pub fn parse_profile_stats(html: &str) -> ProfileStats {
    let document = Html::parse_document(html);
    let cell_sel = Selector::parse("td.gsc_rsb_std").expect("valid selector");
    let photo_sel = Selector::parse("#gsc_prf_pup-img").expect("valid selector");

    let cells: Vec<String> =
        document.select(&cell_sel).map(|el| element_text(&el)).collect();

    let stat = |index: usize| -> String {
        cells.get(index).filter(|s| !s.is_empty()).cloned().unwrap_or_else(|| "N/A".to_string())
    };

    let photo = document
        .select(&photo_sel)
        .next()
        .and_then(|el| el.value().attr("src"))
        .unwrap_or_default()
        .to_string();

    ProfileStats { h_index: stat(2), i10_index: stat(4), photo }
}

/// Compose a full profile from a selected candidate and its profile page.
///
/// Identity fields come from the candidate (the search page is the only
/// place affiliation and email domain appear); metrics come from the page.
#[must_use]
pub fn extract_profile(candidate: &CandidateAuthor, html: &str) -> AuthorProfile {
    let stats = parse_profile_stats(html);

    AuthorProfile {
        external_id: candidate.external_id.clone(),
        name: candidate.display_name.clone(),
        affiliation: candidate.affiliation.clone(),
        h_index: stats.h_index,
        i10_index: stats.i10_index,
        photo: stats.photo,
        email_domain: candidate.email_domain.clone(),
        interests: candidate.interests.clone(),
    }
}
