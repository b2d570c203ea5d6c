//! Session-scoped sort order.
//!
//! # Responsibility
//! - Define the four canonical contact orders as `SortSpec` values.
//! - Hold the single active order and expose its comparator.
//!
//! # Invariants
//! - Exactly one `SortSpec` is active at any time.
//! - Descending orders are the literal reversal of their ascending form,
//!   tie-break included.
//! - Only `set_order` and `reverse` mutate the registry.

use crate::model::contact::Contact;
use crate::search::query::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-folded name, ties broken by `date_added`.
    Name,
    /// `date_added`, ties broken by case-folded name.
    DateAdded,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateAdded => "dateadded",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// One of the four canonical contact orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub const NAME_ASC: Self = Self::new(SortKey::Name, SortOrder::Ascending);
    pub const NAME_DESC: Self = Self::new(SortKey::Name, SortOrder::Descending);
    pub const DATE_ASC: Self = Self::new(SortKey::DateAdded, SortOrder::Ascending);
    pub const DATE_DESC: Self = Self::new(SortKey::DateAdded, SortOrder::Descending);

    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Parses a sort type (`name|dateadded`) and optional order (`asc|desc`).
    ///
    /// Both parts are case-insensitive; a missing order means ascending.
    pub fn parse(sort_type: &str, order: Option<&str>) -> QueryResult<Self> {
        let key = match sort_type.trim().to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "dateadded" => SortKey::DateAdded,
            _ => return Err(QueryError::InvalidSortTypeOrOrder(sort_type.to_string())),
        };
        let order = match order.map(|value| value.trim().to_ascii_lowercase()) {
            None => SortOrder::Ascending,
            Some(value) if value == "asc" => SortOrder::Ascending,
            Some(value) if value == "desc" => SortOrder::Descending,
            Some(value) => return Err(QueryError::InvalidSortTypeOrOrder(value)),
        };
        Ok(Self::new(key, order))
    }

    /// The same key with the opposite direction.
    pub fn reversed(self) -> Self {
        Self::new(self.key, self.order.flipped())
    }

    /// Total order over contacts for this spec.
    pub fn compare(self, a: &Contact, b: &Contact) -> Ordering {
        let ascending = match self.key {
            SortKey::Name => compare_folded_names(a, b).then(a.date_added.cmp(&b.date_added)),
            SortKey::DateAdded => a
                .date_added
                .cmp(&b.date_added)
                .then_with(|| compare_folded_names(a, b)),
        };
        self.order.apply(ascending)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::DATE_ASC
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.key.as_str(), self.order.as_str())
    }
}

fn compare_folded_names(a: &Contact, b: &Contact) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Holder of the active sort order for one session.
///
/// Passed explicitly into the view pipeline; there is no global instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortRegistry {
    active: SortSpec,
}

impl SortRegistry {
    pub fn new(initial: SortSpec) -> Self {
        Self { active: initial }
    }

    /// Replaces the active order. Setting the current spec again is a no-op.
    pub fn set_order(&mut self, spec: SortSpec) {
        self.active = spec;
    }

    /// Flips the active order in place; the flipped order becomes active.
    pub fn reverse(&mut self) -> SortSpec {
        self.active = self.active.reversed();
        self.active
    }

    pub fn current_spec(&self) -> SortSpec {
        self.active
    }

    /// Comparator for the active order, suitable for `sort_by`.
    pub fn current_comparator(&self) -> impl Fn(&Contact, &Contact) -> Ordering {
        let spec = self.active;
        move |a, b| spec.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{SortKey, SortOrder, SortRegistry, SortSpec};
    use crate::model::contact::Contact;
    use crate::search::query::QueryError;
    use std::cmp::Ordering;

    #[test]
    fn name_order_folds_case_and_breaks_ties_by_date() {
        let lower = Contact::new("alice", 5);
        let upper = Contact::new("ALICE", 3);
        let bob = Contact::new("Bob", 1);

        assert_eq!(SortSpec::NAME_ASC.compare(&upper, &lower), Ordering::Less);
        assert_eq!(SortSpec::NAME_ASC.compare(&lower, &bob), Ordering::Less);
        assert_eq!(SortSpec::NAME_DESC.compare(&upper, &lower), Ordering::Greater);
    }

    #[test]
    fn date_order_breaks_ties_by_name() {
        let bob = Contact::new("bob", 1);
        let alice = Contact::new("Alice", 1);
        let carl = Contact::new("Carl", 0);

        assert_eq!(SortSpec::DATE_ASC.compare(&alice, &bob), Ordering::Less);
        assert_eq!(SortSpec::DATE_ASC.compare(&carl, &alice), Ordering::Less);
        assert_eq!(SortSpec::DATE_DESC.compare(&alice, &bob), Ordering::Greater);
    }

    #[test]
    fn parse_accepts_type_and_order_case_insensitively() {
        assert_eq!(SortSpec::parse("Name", None).unwrap(), SortSpec::NAME_ASC);
        assert_eq!(
            SortSpec::parse("DATEADDED", Some("Desc")).unwrap(),
            SortSpec::DATE_DESC
        );
        assert!(matches!(
            SortSpec::parse("phone", None),
            Err(QueryError::InvalidSortTypeOrOrder(_))
        ));
        assert!(matches!(
            SortSpec::parse("name", Some("sideways")),
            Err(QueryError::InvalidSortTypeOrOrder(_))
        ));
    }

    #[test]
    fn reverse_flips_and_restores() {
        let mut registry = SortRegistry::new(SortSpec::NAME_ASC);
        assert_eq!(registry.reverse(), SortSpec::NAME_DESC);
        assert_eq!(registry.reverse(), SortSpec::NAME_ASC);
    }

    #[test]
    fn last_set_order_wins() {
        let mut registry = SortRegistry::default();
        assert_eq!(registry.current_spec(), SortSpec::DATE_ASC);

        registry.set_order(SortSpec::DATE_ASC);
        registry.set_order(SortSpec::new(SortKey::Name, SortOrder::Ascending));
        assert_eq!(registry.current_spec(), SortSpec::NAME_ASC);
    }
}
