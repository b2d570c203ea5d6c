//! Contact table schema and its version stamp.
//!
//! The schema has a single version. A fresh database is created at that
//! version; a database stamped with any other non-zero version is refused.

use super::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const CONTACTS_SCHEMA: &str = include_str!("contacts_schema.sql");

/// Whether `ensure_schema` found the tables or had to create them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemaState {
    Existing,
    Created,
}

/// Creates the contact tables on an unstamped database, or checks the stamp.
pub(crate) fn ensure_schema(conn: &mut Connection) -> DbResult<SchemaState> {
    match stamped_version(conn)? {
        SCHEMA_VERSION => Ok(SchemaState::Existing),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(CONTACTS_SCHEMA)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(SchemaState::Created)
        }
        other => Err(DbError::UnsupportedSchemaVersion {
            db_version: other,
            supported: SCHEMA_VERSION,
        }),
    }
}

fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
