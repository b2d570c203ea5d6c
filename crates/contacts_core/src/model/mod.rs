//! Domain model for contact records.
//!
//! # Responsibility
//! - Define canonical data structures used by the query engine and store.
//!
//! # Invariants
//! - Contacts have no surrogate key; identity is field equality.
//! - Edits replace records wholesale, never mutate them in a store.

pub mod contact;
