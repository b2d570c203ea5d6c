//! Materialization of the ordered contact view.
//!
//! # Responsibility
//! - Apply the active filter to the store, then order the survivors with the
//!   active comparator.
//! - Route fuzzy name queries to the ranker, which decides both membership
//!   and order.
//!
//! # Invariants
//! - Output is a pure function of (store contents, filter, sort spec).
//! - Output is always a subset of the store.
//! - Changing the filter never touches the sort order and vice versa.

use crate::model::contact::Contact;
use crate::search::name_matcher::name_matches;
use crate::search::query::{SearchQuery, TagQuery};
use crate::search::ranker::{rank, FUZZY_RESULT_LIMIT};
use crate::search::tag_matcher::tags_match;
use crate::view::sort_registry::SortRegistry;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Closed set of filters a session can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveFilter {
    Name(SearchQuery),
    Tags(TagQuery),
}

impl ActiveFilter {
    /// Predicate view of the filter. Fuzzy queries use the thresholded match.
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            Self::Name(query) => name_matches(contact, query),
            Self::Tags(query) => tags_match(contact, query),
        }
    }
}

impl Display for ActiveFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(query) => write!(f, "{query}"),
            Self::Tags(query) => write!(f, "{query}"),
        }
    }
}

impl From<SearchQuery> for ActiveFilter {
    fn from(value: SearchQuery) -> Self {
        Self::Name(value)
    }
}

impl From<TagQuery> for ActiveFilter {
    fn from(value: TagQuery) -> Self {
        Self::Tags(value)
    }
}

/// Materializes the view with the default fuzzy result limit.
pub fn materialize<'a>(
    contacts: &'a [Contact],
    filter: Option<&ActiveFilter>,
    registry: &SortRegistry,
) -> Vec<&'a Contact> {
    materialize_with_limit(contacts, filter, registry, FUZZY_RESULT_LIMIT)
}

/// Materializes the view; `fuzzy_limit` caps fuzzy rankings.
pub fn materialize_with_limit<'a>(
    contacts: &'a [Contact],
    filter: Option<&ActiveFilter>,
    registry: &SortRegistry,
    fuzzy_limit: usize,
) -> Vec<&'a Contact> {
    let mut view: Vec<&'a Contact> = match filter {
        Some(ActiveFilter::Name(query)) if query.is_fuzzy() => {
            return rank(contacts, query, fuzzy_limit);
        }
        Some(filter) => contacts
            .iter()
            .filter(|contact| filter.matches(contact))
            .collect(),
        None => contacts.iter().collect(),
    };

    let comparator = registry.current_comparator();
    view.sort_by(|a, b| comparator(*a, *b));
    view
}
