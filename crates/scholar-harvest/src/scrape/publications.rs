//! Publication listing extraction.

use scraper::{Html, Selector};

use super::element_text;
use crate::models::{Publication, classify_venue};

/// Parse publication rows from one listing page, in page order.
///
/// Rows without a title link are skipped; every other missing field degrades
/// to its default (`"N/A"` for text, `"0"` for the citation count). Venue
/// classification happens here so each row leaves the parser complete.
#[must_use]
pub fn parse_publications(html: &str) -> Vec<Publication> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("tr.gsc_a_tr").expect("valid selector");
    let title_sel = Selector::parse(".gsc_a_t a").expect("valid selector");
    let gray_sel = Selector::parse(".gsc_a_t .gs_gray").expect("valid selector");
    let year_sel = Selector::parse(".gsc_a_y span").expect("valid selector");
    let cited_sel = Selector::parse(".gsc_a_c a").expect("valid selector");

    let mut publications = Vec::new();

    for row in document.select(&row_sel) {
        let Some(title_el) = row.select(&title_sel).next() else {
            continue;
        };
        let title = element_text(&title_el);

        // Two gray lines per row: authors first, venue second.
        let mut gray = row.select(&gray_sel).map(|el| element_text(&el));
        let authors = gray.next().filter(|s| !s.is_empty()).unwrap_or_else(|| "N/A".to_string());
        let venue = gray.next().filter(|s| !s.is_empty()).unwrap_or_else(|| "N/A".to_string());

        let year = row
            .select(&year_sel)
            .next()
            .map(|el| element_text(&el))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        let cited_by = row
            .select(&cited_sel)
            .next()
            .map(|el| element_text(&el))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0".to_string());

        let kind = classify_venue(&venue);

        publications.push(Publication { title, year, kind, venue, authors, cited_by });
    }

    publications
}

/// Whether the listing page advertises further pages.
///
/// The "show more" control must exist and not carry the `disabled`
/// attribute; its absence means the listing is exhausted.
#[must_use]
pub fn has_more_pages(html: &str) -> bool {
    let document = Html::parse_document(html);
    let more_sel = Selector::parse("#gsc_bpf_more").expect("valid selector");

    document
        .select(&more_sel)
        .next()
        .is_some_and(|el| el.value().attr("disabled").is_none())
}
