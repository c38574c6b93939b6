//! Publication records, venue classification, and year ordering.

use serde::{Deserialize, Serialize};

/// Coarse venue classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationKind {
    /// Journal article ("journal", "transactions").
    Journal,
    /// Conference paper ("conference", "proceedings", "symposium").
    Conference,
    /// Anything else: preprints, theses, book chapters.
    Other,
}

/// One publication row from an author's listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Publication title.
    #[serde(rename = "Title")]
    pub title: String,

    /// Year as shown in the listing, `"N/A"` when absent.
    #[serde(rename = "Year")]
    pub year: String,

    /// Venue classification.
    #[serde(rename = "Type")]
    pub kind: PublicationKind,

    /// Venue text.
    #[serde(rename = "Venue")]
    pub venue: String,

    /// Author list text.
    #[serde(rename = "Authors")]
    pub authors: String,

    /// Citation count for this publication, `"0"` when blank.
    #[serde(rename = "Cited_By")]
    pub cited_by: String,
}

/// Classify a venue string into a coarse publication type.
///
/// Journal keywords are checked first, so a venue matching both families
/// ("Journal of Conference Studies") classifies as Journal. Pure and
/// deterministic.
#[must_use]
pub fn classify_venue(venue: &str) -> PublicationKind {
    let venue = venue.to_lowercase();

    if ["journal", "transactions"].iter().any(|k| venue.contains(k)) {
        PublicationKind::Journal
    } else if ["conference", "proceedings", "symposium"].iter().any(|k| venue.contains(k)) {
        PublicationKind::Conference
    } else {
        PublicationKind::Other
    }
}

/// Sort publications by numeric year, newest first.
///
/// Rows whose year does not parse as a number ("N/A", ranges, blanks) sort
/// after all numeric years, preserving their relative order.
pub fn sort_by_year_desc(publications: &mut [Publication]) {
    publications.sort_by_key(|p| match p.year.trim().parse::<i64>() {
        Ok(year) => (0, -year),
        Err(_) => (1, 0),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(year: &str) -> Publication {
        Publication {
            title: format!("Paper {year}"),
            year: year.to_string(),
            kind: PublicationKind::Other,
            venue: "arXiv preprint".to_string(),
            authors: "J Doe".to_string(),
            cited_by: "0".to_string(),
        }
    }

    #[test]
    fn test_classify_journal_keywords() {
        assert_eq!(classify_venue("IEEE Transactions on Robotics"), PublicationKind::Journal);
        assert_eq!(classify_venue("Journal of Applied Physics"), PublicationKind::Journal);
    }

    #[test]
    fn test_classify_conference_keywords() {
        assert_eq!(
            classify_venue("Proceedings of the 12th Symposium on Theory"),
            PublicationKind::Conference
        );
        assert_eq!(classify_venue("International Conference on ML"), PublicationKind::Conference);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_venue("arXiv preprint"), PublicationKind::Other);
        assert_eq!(classify_venue(""), PublicationKind::Other);
    }

    #[test]
    fn test_classify_journal_wins_over_conference() {
        // Matches both families; Journal keywords checked first.
        assert_eq!(
            classify_venue("Journal of Conference Proceedings"),
            PublicationKind::Journal
        );
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify_venue("JOURNAL OF X"), PublicationKind::Journal);
    }

    #[test]
    fn test_sort_newest_first_non_numeric_last() {
        let mut pubs =
            vec![publication("2020"), publication("N/A"), publication("2023")];
        sort_by_year_desc(&mut pubs);

        let years: Vec<&str> = pubs.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, vec!["2023", "2020", "N/A"]);
    }

    #[test]
    fn test_sort_preserves_order_among_non_numeric() {
        let mut a = publication("N/A");
        a.title = "first".to_string();
        let mut b = publication("forthcoming");
        b.title = "second".to_string();

        let mut pubs = vec![a, b, publication("1999")];
        sort_by_year_desc(&mut pubs);

        assert_eq!(pubs[0].year, "1999");
        assert_eq!(pubs[1].title, "first");
        assert_eq!(pubs[2].title, "second");
    }

    #[test]
    fn test_publication_serializes_record_schema() {
        let p = publication("2021");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["Title"], "Paper 2021");
        assert_eq!(json["Year"], "2021");
        assert_eq!(json["Type"], "Other");
        assert_eq!(json["Venue"], "arXiv preprint");
    }
}
