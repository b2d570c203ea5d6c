//! Tag filter evaluation.
//!
//! # Invariants
//! - Every query tag must be present on the contact (AND semantics).
//! - Comparison is byte-for-byte; `VIP` and `vip` are different tags.
//! - An empty query matches nothing. "No filter" is expressed by not
//!   filtering at all.

use crate::model::contact::Contact;
use crate::search::query::TagQuery;

/// Returns whether `contact` carries every tag in `query`.
pub fn tags_match(contact: &Contact, query: &TagQuery) -> bool {
    if query.is_empty() {
        return false;
    }
    query
        .tags()
        .iter()
        .all(|tag| contact.tags.contains(tag.as_str()))
}
