//! Persistence boundary for the canonical contact collection.
//!
//! # Responsibility
//! - Define the load/save contract used by hosts to persist a store.
//! - Provide a SQLite implementation over migrated connections.
//!
//! # Invariants
//! - Only the canonical store is persisted, never a filtered or sorted view.
//! - `save` replaces the whole collection in one transaction.
//! - `load` returns contacts in saved order and rejects invalid rows.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactValidationError, Timezone};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for contact load/save.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted contact: {0}")]
    Validation(#[from] ContactValidationError),
    #[error("invalid persisted contact data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save contract for the canonical contact collection.
pub trait ContactStorage {
    /// Returns every stored contact in canonical order.
    fn load(&self) -> StorageResult<Vec<Contact>>;
    /// Replaces the stored collection with `contacts`.
    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()>;
}

/// SQLite-backed contact storage.
pub struct SqliteContactStorage<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContactStorage<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ContactStorage for SqliteContactStorage<'_> {
    fn load(&self) -> StorageResult<Vec<Contact>> {
        let started_at = Instant::now();
        let mut tags_by_position = load_tags(&*self.conn)?;

        let mut stmt = self.conn.prepare(
            "SELECT position, name, phone, email, address, note, timezone, date_added
             FROM contacts
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            let position: i64 = row.get("position")?;
            let tags = tags_by_position.remove(&position).unwrap_or_default();
            contacts.push(parse_contact_row(row, tags)?);
        }

        if let Some(orphan) = tags_by_position.keys().next() {
            return Err(StorageError::InvalidData(format!(
                "tags reference missing contact position {orphan}"
            )));
        }

        info!(
            "event=storage_load module=storage status=ok count={} duration_ms={}",
            contacts.len(),
            started_at.elapsed().as_millis()
        );
        Ok(contacts)
    }

    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = replace_all(self.conn, contacts);
        match &result {
            Ok(()) => info!(
                "event=storage_save module=storage status=ok count={} duration_ms={}",
                contacts.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=storage_save module=storage status=error count={} error={err}",
                contacts.len()
            ),
        }
        result
    }
}

fn replace_all(conn: &mut Connection, contacts: &[Contact]) -> StorageResult<()> {
    for contact in contacts {
        contact.validate()?;
    }

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM contact_tags;", [])?;
    tx.execute("DELETE FROM contacts;", [])?;
    {
        let mut insert_contact = tx.prepare(
            "INSERT INTO contacts (
                position, name, phone, email, address, note, timezone, date_added
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        )?;
        let mut insert_tag =
            tx.prepare("INSERT INTO contact_tags (contact_position, tag) VALUES (?1, ?2);")?;

        for (position, contact) in (0_i64..).zip(contacts) {
            insert_contact.execute(params![
                position,
                contact.name.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
                contact.address.as_str(),
                contact.note.as_str(),
                contact.timezone.map(Timezone::offset_hours),
                contact.date_added,
            ])?;
            for tag in &contact.tags {
                insert_tag.execute(params![position, tag.as_str()])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

fn load_tags(conn: &Connection) -> StorageResult<BTreeMap<i64, BTreeSet<String>>> {
    let mut stmt = conn.prepare(
        "SELECT contact_position, tag
         FROM contact_tags
         ORDER BY contact_position ASC, tag ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut tags: BTreeMap<i64, BTreeSet<String>> = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let position: i64 = row.get(0)?;
        let tag: String = row.get(1)?;
        tags.entry(position).or_default().insert(tag);
    }
    Ok(tags)
}

fn parse_contact_row(row: &Row<'_>, tags: BTreeSet<String>) -> StorageResult<Contact> {
    let contact = Contact {
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        tags,
        timezone: row.get::<_, Option<f64>>("timezone")?.map(Timezone),
        note: row.get("note")?,
        date_added: row.get("date_added")?,
    };
    contact.validate()?;
    Ok(contact)
}
