use contacts_core::db::{open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use contacts_core::{ContactStorage, SqliteContactStorage};
use rusqlite::{params, Connection};

fn insert_contact(conn: &Connection, position: i64, name: &str, date_added: i64) {
    conn.execute(
        "INSERT INTO contacts (position, name, date_added) VALUES (?1, ?2, ?3);",
        params![position, name, date_added],
    )
    .unwrap();
}

fn tag_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM contact_tags;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_database_is_stamped_with_schema_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn contact_names_are_unique() {
    let conn = open_db_in_memory().unwrap();
    insert_contact(&conn, 0, "Alice", 1);

    let duplicate = conn.execute(
        "INSERT INTO contacts (position, name, date_added) VALUES (1, 'Alice', 2);",
        [],
    );
    assert!(duplicate.is_err());

    insert_contact(&conn, 1, "alice", 2);
}

#[test]
fn contacts_load_in_position_order_not_insert_order() {
    let mut conn = open_db_in_memory().unwrap();
    insert_contact(&conn, 2, "Carl", 30);
    insert_contact(&conn, 0, "Alice", 10);
    insert_contact(&conn, 1, "Bob", 20);

    let loaded = SqliteContactStorage::new(&mut conn).load().unwrap();
    let names: Vec<&str> = loaded.iter().map(|contact| contact.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carl"]);
}

#[test]
fn deleting_a_contact_cascades_to_its_tags() {
    let conn = open_db_in_memory().unwrap();
    insert_contact(&conn, 0, "Alice", 1);
    insert_contact(&conn, 1, "Bob", 2);
    conn.execute_batch(
        "INSERT INTO contact_tags (contact_position, tag) VALUES (0, 'friends');
         INSERT INTO contact_tags (contact_position, tag) VALUES (0, 'vip');
         INSERT INTO contact_tags (contact_position, tag) VALUES (1, 'vip');",
    )
    .unwrap();

    conn.execute("DELETE FROM contacts WHERE position = 0;", [])
        .unwrap();
    assert_eq!(tag_count(&conn), 1);
}

#[test]
fn tags_must_reference_an_existing_contact() {
    let conn = open_db_in_memory().unwrap();
    let orphan = conn.execute(
        "INSERT INTO contact_tags (contact_position, tag) VALUES (7, 'friends');",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn reopening_a_file_keeps_saved_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    {
        let conn = open_db(&path).unwrap();
        insert_contact(&conn, 0, "Alice", 1);
    }

    let mut conn = open_db(&path).unwrap();
    let loaded = SqliteContactStorage::new(&mut conn).load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Alice");
}

#[test]
fn database_with_foreign_version_stamp_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.db");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", 7_u32).unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            supported,
        } => {
            assert_eq!(db_version, 7);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}
