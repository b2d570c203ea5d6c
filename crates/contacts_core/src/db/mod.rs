//! SQLite storage bootstrap and contact schema.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by the contact storage adapter.
//! - Create the contact tables on first open.
//!
//! # Invariants
//! - The schema version is stamped in `PRAGMA user_version`.
//! - Contacts are never read or written on a database with a foreign stamp.

use thiserror::Error;

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::SCHEMA_VERSION;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is not supported (expected {supported})")]
    UnsupportedSchemaVersion { db_version: u32, supported: u32 },
}
