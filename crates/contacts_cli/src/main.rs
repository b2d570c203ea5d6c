//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contacts_core` linkage.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `contacts_cli [DB_PATH]`. Without a path the probe runs against a
//! small in-memory sample.

use contacts_core::{
    core_version, open_db, ContactDraft, ContactStorage, ContactStore, SearchMode, SearchQuery,
    Session, SessionConfig, SortSpec, SqliteContactStorage,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("contacts_core version={}", core_version());

    let result = match std::env::args().nth(1) {
        Some(path) => probe_database(&path),
        None => probe_sample(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn probe_database(path: &str) -> Result<(), String> {
    let mut conn = open_db(path).map_err(|err| err.to_string())?;
    let contacts = SqliteContactStorage::new(&mut conn)
        .load()
        .map_err(|err| err.to_string())?;
    let store = ContactStore::from_contacts(contacts).map_err(|err| err.to_string())?;
    let session = Session::new(store, SessionConfig::default());

    info!(
        "event=cli_probe module=cli status=ok source=db count={}",
        session.store().len()
    );
    print_view(&session);
    Ok(())
}

fn probe_sample() -> Result<(), String> {
    let mut session = Session::default();
    for (name, tags) in [
        ("Alice Pauline", vec!["friends"]),
        ("Benson Meier", vec!["owesMoney", "friends"]),
        ("Carl Kurz", vec![]),
    ] {
        session
            .add(ContactDraft::new(name).with_tags(tags))
            .map_err(|err| err.to_string())?;
    }

    let sorted = session.sort(SortSpec::NAME_DESC);
    println!("{}", sorted.message);
    let found = session.find(SearchQuery::new(SearchMode::Fuzzy, ["Alise"]));
    println!("{}", found.message);
    print_view(&session);
    Ok(())
}

fn print_view(session: &Session) {
    for (index, contact) in session.view().iter().enumerate() {
        println!("{index}. {contact}");
    }
}
