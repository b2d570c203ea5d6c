//! Edit-distance ranking for fuzzy name search.
//!
//! # Responsibility
//! - Compute Levenshtein distance between two tokens.
//! - Rank a contact collection by closeness to a fuzzy query.
//!
//! # Invariants
//! - `levenshtein(a, b) == levenshtein(b, a)` and `levenshtein(a, a) == 0`.
//! - Ranking returns exactly `min(limit, contacts.len())` items.
//! - Equal distances keep the input (store) order.
//! - There is no distance cut-off.

use crate::model::contact::Contact;
use crate::search::query::SearchQuery;

/// Number of contacts returned by a fuzzy search.
pub const FUZZY_RESULT_LIMIT: usize = 5;

/// Distance assigned when a query has no keywords to compare against.
pub const NO_KEYWORD_DISTANCE: usize = usize::MAX;

/// Classic dynamic-programming edit distance over Unicode scalar values.
///
/// Insertion, deletion and substitution each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the (a.len() + 1) x (b.len() + 1) table.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != b_char);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Smallest distance between any case-folded name word and any keyword.
///
/// Returns [`NO_KEYWORD_DISTANCE`] when the query holds no keywords.
pub fn minimum_distance(contact: &Contact, query: &SearchQuery) -> usize {
    let lower_name = contact.name.to_lowercase();
    let lower_keywords: Vec<String> = query
        .keywords()
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    lower_name
        .split_whitespace()
        .flat_map(|word| {
            lower_keywords
                .iter()
                .map(move |keyword| levenshtein(word, keyword))
        })
        .min()
        .unwrap_or(NO_KEYWORD_DISTANCE)
}

/// Ranks `contacts` by ascending [`minimum_distance`] and keeps the first `limit`.
///
/// The sort is stable, so ties resolve in input order.
pub fn rank<'a, I>(contacts: I, query: &SearchQuery, limit: usize) -> Vec<&'a Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut scored: Vec<(usize, &'a Contact)> = contacts
        .into_iter()
        .map(|contact| (minimum_distance(contact, query), contact))
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, contact)| contact)
        .collect()
}
