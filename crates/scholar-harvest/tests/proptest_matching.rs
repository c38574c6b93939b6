//! Property tests for the matching heuristic and the venue classifier.

use proptest::prelude::*;

use scholar_harvest::models::{PublicationKind, classify_venue};
use scholar_harvest::resolver::match_score;

proptest! {
    #[test]
    fn match_score_is_bounded(affiliation in ".{0,80}", institution in ".{0,80}") {
        let score = match_score(&affiliation, &institution);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn match_score_monotone_in_matched_words(
        words in prop::collection::vec("[a-z]{3,10}", 1..6),
        extra in "[a-z]{3,10}",
    ) {
        let institution = words.join(" ");

        // Affiliation containing every institution word scores at least as
        // high as one missing the last word.
        let full = words.join(" ");
        let partial = words[..words.len() - 1].join(" ");

        let full_score = match_score(&full, &institution);
        let partial_score = match_score(&partial, &institution);
        prop_assert!(full_score >= partial_score);

        // Adding unrelated affiliation text never lowers the score.
        let padded = format!("{full} {extra}");
        prop_assert!(match_score(&padded, &institution) >= full_score);
    }

    #[test]
    fn short_word_institutions_never_score(affiliation in ".{0,80}") {
        // Institutions with no word longer than two characters cannot
        // qualify, whatever the affiliation says.
        let score = match_score(&affiliation, "a of to xy");
        prop_assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn classifier_is_deterministic(venue in ".{0,60}") {
        prop_assert_eq!(classify_venue(&venue), classify_venue(&venue));
    }

    #[test]
    fn journal_keyword_always_classifies_journal(
        prefix in "[A-Za-z ]{0,20}",
        suffix in "[A-Za-z ]{0,20}",
    ) {
        let venue = format!("{prefix}Journal{suffix}");
        prop_assert_eq!(classify_venue(&venue), PublicationKind::Journal);
    }
}

#[test]
fn classifier_reference_cases() {
    assert_eq!(classify_venue("IEEE Transactions on X"), PublicationKind::Journal);
    assert_eq!(classify_venue("Proceedings of the Y Symposium"), PublicationKind::Conference);
    assert_eq!(classify_venue("arXiv preprint"), PublicationKind::Other);
}
