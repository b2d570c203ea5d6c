//! Contact collection ownership and persistence boundary.
//!
//! # Responsibility
//! - Own the in-memory canonical contact order (`contact_store`).
//! - Define and implement the load/save contract (`contact_storage`).
//!
//! # Invariants
//! - Store mutations validate records before accepting them.
//! - Storage reads reject invalid persisted state instead of masking it.

pub mod contact_storage;
pub mod contact_store;
