//! In-memory contact store.
//!
//! # Responsibility
//! - Own the canonical, insertion-ordered contact collection.
//! - Assign `date_added` monotonically on creation.
//! - Apply add/replace/remove with copy-on-write replacement semantics.
//!
//! # Invariants
//! - No two contacts share a name.
//! - Every stored contact passed `Contact::validate()`.
//! - `replace` keeps the replaced contact's position and `date_added`.
//! - Assigned `date_added` values strictly increase within one store.

use crate::model::contact::{Contact, ContactDraft, ContactValidationError};
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("a contact named `{0}` already exists")]
    DuplicateContact(String),
    #[error("contact not found: `{0}`")]
    ContactNotFound(String),
}

/// Source of wall-clock epoch milliseconds.
pub type Clock = fn() -> i64;

/// Ordered collection of contacts backing every view.
#[derive(Debug, Clone)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    last_date_added: i64,
    clock: Clock,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ContactStore {
    fn eq(&self, other: &Self) -> bool {
        self.contacts == other.contacts
    }
}

impl ContactStore {
    /// Creates an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Creates an empty store with a caller-provided clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            contacts: Vec::new(),
            last_date_added: i64::MIN,
            clock,
        }
    }

    /// Builds a store from contacts supplied by the persistence layer.
    ///
    /// Keeps the given order and timestamps.
    ///
    /// # Errors
    /// - `Validation` for the first invalid contact.
    /// - `DuplicateContact` when two contacts share a name.
    pub fn from_contacts(contacts: Vec<Contact>) -> StoreResult<Self> {
        Self::from_contacts_with_clock(contacts, system_clock)
    }

    /// Like [`ContactStore::from_contacts`], stamping later additions with `clock`.
    pub fn from_contacts_with_clock(contacts: Vec<Contact>, clock: Clock) -> StoreResult<Self> {
        let mut store = Self::with_clock(clock);
        for contact in contacts {
            store.insert(contact)?;
        }
        Ok(store)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns whether a contact with the same name is stored.
    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.contacts
            .iter()
            .any(|existing| existing.is_same_contact(contact))
    }

    /// Creates a contact from `draft`, stamping a fresh `date_added`.
    pub fn add(&mut self, draft: ContactDraft) -> StoreResult<&Contact> {
        let contact = draft.into_contact(self.peek_next_date_added());
        contact.validate()?;
        if self.has_contact(&contact) {
            return Err(StoreError::DuplicateContact(contact.name));
        }
        self.last_date_added = contact.date_added;
        self.contacts.push(contact);
        debug!(
            "event=contact_add module=store status=ok count={}",
            self.contacts.len()
        );
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    /// Appends an existing record, keeping its `date_added`.
    pub fn insert(&mut self, contact: Contact) -> StoreResult<()> {
        contact.validate()?;
        if self.has_contact(&contact) {
            return Err(StoreError::DuplicateContact(contact.name));
        }
        self.last_date_added = self.last_date_added.max(contact.date_added);
        self.contacts.push(contact);
        Ok(())
    }

    /// Replaces `target` with `edited` at the same position.
    ///
    /// `edited.date_added` is overwritten with the target's value.
    ///
    /// # Errors
    /// - `ContactNotFound` when `target` is not stored.
    /// - `Validation` when `edited` is invalid.
    /// - `DuplicateContact` when the new name collides with another contact.
    pub fn replace(&mut self, target: &Contact, edited: Contact) -> StoreResult<&Contact> {
        let position = self.position_of(target)?;
        let edited = Contact {
            date_added: self.contacts[position].date_added,
            ..edited
        };
        edited.validate()?;

        let collides = self
            .contacts
            .iter()
            .enumerate()
            .any(|(idx, existing)| idx != position && existing.is_same_contact(&edited));
        if collides {
            return Err(StoreError::DuplicateContact(edited.name));
        }

        self.contacts[position] = edited;
        Ok(&self.contacts[position])
    }

    /// Removes `target` and returns the removed record.
    pub fn remove(&mut self, target: &Contact) -> StoreResult<Contact> {
        let position = self.position_of(target)?;
        Ok(self.contacts.remove(position))
    }

    /// Hands the canonical ordered collection to the persistence layer.
    pub fn into_contacts(self) -> Vec<Contact> {
        self.contacts
    }

    fn position_of(&self, target: &Contact) -> StoreResult<usize> {
        self.contacts
            .iter()
            .position(|contact| contact == target)
            .ok_or_else(|| StoreError::ContactNotFound(target.name.clone()))
    }

    fn peek_next_date_added(&self) -> i64 {
        let now = (self.clock)();
        now.max(self.last_date_added.saturating_add(1))
    }
}

fn system_clock() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{ContactStore, StoreError};
    use crate::model::contact::{Contact, ContactDraft, ContactValidationError};

    fn frozen_clock() -> i64 {
        1_000
    }

    #[test]
    fn add_assigns_strictly_increasing_dates() {
        let mut store = ContactStore::with_clock(frozen_clock);
        let first = store.add(ContactDraft::new("Alice")).unwrap().date_added;
        let second = store.add(ContactDraft::new("Bob")).unwrap().date_added;
        let third = store.add(ContactDraft::new("Carl")).unwrap().date_added;

        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
        assert_eq!(third, 1_002);
    }

    #[test]
    fn add_after_loaded_future_dates_stays_monotonic() {
        let mut store = ContactStore::with_clock(frozen_clock);
        store.insert(Contact::new("Alice", 5_000)).unwrap();
        let added = store.add(ContactDraft::new("Bob")).unwrap();
        assert_eq!(added.date_added, 5_001);
    }

    #[test]
    fn loaded_store_stamps_additions_with_injected_clock() {
        let mut store = ContactStore::from_contacts_with_clock(
            vec![Contact::new("Alice", 400), Contact::new("Bob", 600)],
            frozen_clock,
        )
        .unwrap();

        assert_eq!(store.add(ContactDraft::new("Carl")).unwrap().date_added, 1_000);
        assert_eq!(store.add(ContactDraft::new("Dana")).unwrap().date_added, 1_001);
        assert_eq!(store.contacts()[1].date_added, 600);
    }

    #[test]
    fn add_rejects_duplicates_and_invalid_records() {
        let mut store = ContactStore::new();
        store.add(ContactDraft::new("Alice")).unwrap();

        assert_eq!(
            store.add(ContactDraft::new("Alice")).unwrap_err(),
            StoreError::DuplicateContact("Alice".to_string())
        );
        assert_eq!(
            store.add(ContactDraft::new("  ")).unwrap_err(),
            StoreError::Validation(ContactValidationError::BlankName)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_keeps_position_and_date() {
        let mut store = ContactStore::from_contacts(vec![
            Contact::new("Alice", 1),
            Contact::new("Bob", 2),
            Contact::new("Carl", 3),
        ])
        .unwrap();
        let target = store.contacts()[1].clone();

        store
            .replace(&target, Contact::new("Bobby", 99).with_note("edited"))
            .unwrap();

        let replaced = &store.contacts()[1];
        assert_eq!(replaced.name, "Bobby");
        assert_eq!(replaced.note, "edited");
        assert_eq!(replaced.date_added, 2);
    }

    #[test]
    fn replace_rejects_rename_onto_existing_contact() {
        let mut store =
            ContactStore::from_contacts(vec![Contact::new("Alice", 1), Contact::new("Bob", 2)])
                .unwrap();
        let target = store.contacts()[1].clone();

        let err = store
            .replace(&target, Contact::new("Alice", 2))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateContact("Alice".to_string()));
        assert_eq!(store.contacts()[1].name, "Bob");
    }

    #[test]
    fn remove_unknown_contact_fails() {
        let mut store = ContactStore::from_contacts(vec![Contact::new("Alice", 1)]).unwrap();
        let err = store.remove(&Contact::new("Zed", 9)).unwrap_err();
        assert_eq!(err, StoreError::ContactNotFound("Zed".to_string()));
    }
}
