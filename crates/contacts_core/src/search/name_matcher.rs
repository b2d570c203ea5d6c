//! Relaxed and strict name matching.
//!
//! # Responsibility
//! - Decide whether a contact's name matches a `SearchQuery`.
//!
//! # Invariants
//! - Matching is case-insensitive in both modes.
//! - Keywords combine with OR: one matching keyword qualifies the contact.
//! - A strict match always implies a relaxed match.
//! - A query without keywords matches nothing.

use crate::model::contact::Contact;
use crate::search::query::{SearchMode, SearchQuery};
use crate::search::ranker::minimum_distance;

/// Maximum edit distance accepted by [`fuzzy_matches`].
pub const FUZZY_MATCH_THRESHOLD: usize = 2;

/// Evaluates a relaxed or strict query against one contact.
///
/// Fuzzy queries are answered with [`fuzzy_matches`] so the function stays
/// total, but the view pipeline routes fuzzy queries to the ranker instead.
pub fn name_matches(contact: &Contact, query: &SearchQuery) -> bool {
    let lower_name = contact.name.to_lowercase();
    match query.mode() {
        SearchMode::Relaxed => query
            .keywords()
            .iter()
            .any(|keyword| lower_name.contains(keyword.to_lowercase().as_str())),
        SearchMode::Strict => query
            .keywords()
            .iter()
            .any(|keyword| contains_word(&lower_name, keyword.to_lowercase().as_str())),
        SearchMode::Fuzzy => fuzzy_matches(contact, query),
    }
}

/// Thresholded fuzzy predicate: some name word lies within
/// [`FUZZY_MATCH_THRESHOLD`] edits of some keyword.
pub fn fuzzy_matches(contact: &Contact, query: &SearchQuery) -> bool {
    minimum_distance(contact, query) <= FUZZY_MATCH_THRESHOLD
}

fn contains_word(lower_name: &str, lower_keyword: &str) -> bool {
    lower_name
        .split_whitespace()
        .any(|word| word == lower_keyword)
}

#[cfg(test)]
mod tests {
    use super::{fuzzy_matches, name_matches};
    use crate::model::contact::Contact;
    use crate::search::query::{SearchMode, SearchQuery};

    fn query(mode: SearchMode, keywords: &[&str]) -> SearchQuery {
        SearchQuery::new(mode, keywords.iter().copied())
    }

    #[test]
    fn relaxed_matches_case_insensitive_substring() {
        let alice = Contact::new("Alice Pauline", 1);
        assert!(name_matches(&alice, &query(SearchMode::Relaxed, &["ALI"])));
        assert!(name_matches(&alice, &query(SearchMode::Relaxed, &["e p"])));
        assert!(!name_matches(&alice, &query(SearchMode::Relaxed, &["bob"])));
    }

    #[test]
    fn relaxed_matches_any_keyword() {
        let alice = Contact::new("Alice", 1);
        assert!(name_matches(
            &alice,
            &query(SearchMode::Relaxed, &["zzz", "lic"])
        ));
    }

    #[test]
    fn strict_requires_whole_word() {
        let alice = Contact::new("Alice Pauline", 1);
        assert!(name_matches(&alice, &query(SearchMode::Strict, &["pauline"])));
        assert!(!name_matches(&alice, &query(SearchMode::Strict, &["paul"])));
        assert!(!name_matches(&alice, &query(SearchMode::Strict, &["a"])));
    }

    #[test]
    fn keywordless_query_matches_nothing() {
        let alice = Contact::new("Alice", 1);
        assert!(!name_matches(&alice, &query(SearchMode::Relaxed, &[])));
        assert!(!name_matches(&alice, &query(SearchMode::Strict, &[" "])));
    }

    #[test]
    fn fuzzy_predicate_uses_threshold() {
        let alice = Contact::new("Alice", 1);
        assert!(fuzzy_matches(&alice, &query(SearchMode::Fuzzy, &["Alica"])));
        assert!(fuzzy_matches(&alice, &query(SearchMode::Fuzzy, &["Alc"])));
        assert!(!fuzzy_matches(&alice, &query(SearchMode::Fuzzy, &["Bob"])));
    }
}
