//! Search-results page extraction.

use scraper::{Html, Selector};
use tracing::debug;

use super::element_text;
use crate::models::CandidateAuthor;

/// Parse candidate authors from a search-results page, in page order.
///
/// At most `limit` entries are scanned. Entries without a name link or
/// without an extractable profile id are skipped entirely; scores are left
/// at 0 for the resolver to fill in.
#[must_use]
pub fn parse_candidates(html: &str, limit: usize) -> Vec<CandidateAuthor> {
    let document = Html::parse_document(html);
    let entry_sel = Selector::parse(".gsc_1usr").expect("valid selector");
    let name_sel = Selector::parse(".gs_ai_name a").expect("valid selector");
    let aff_sel = Selector::parse(".gs_ai_aff").expect("valid selector");
    let email_sel = Selector::parse(".gs_ai_eml").expect("valid selector");
    let interest_sel = Selector::parse(".gs_ai_one_int").expect("valid selector");

    let mut candidates = Vec::new();

    for entry in document.select(&entry_sel).take(limit) {
        let Some(name_link) = entry.select(&name_sel).next() else {
            continue;
        };

        let display_name = element_text(&name_link);

        let Some(external_id) =
            name_link.value().attr("href").and_then(extract_profile_id)
        else {
            debug!(name = %display_name, "skipping candidate without profile id");
            continue;
        };

        let affiliation = entry
            .select(&aff_sel)
            .next()
            .map(|el| element_text(&el))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        let email_domain = entry
            .select(&email_sel)
            .next()
            .map(|el| element_text(&el))
            .map(|text| text.trim_start_matches("Verified email at ").trim().to_string())
            .filter(|s| !s.is_empty());

        let interests =
            entry.select(&interest_sel).map(|el| element_text(&el)).collect();

        candidates.push(CandidateAuthor {
            display_name,
            external_id,
            affiliation,
            email_domain,
            interests,
            match_score: 0.0,
        });
    }

    candidates
}

/// Extract the `user` query parameter from a profile link href.
fn extract_profile_id(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
