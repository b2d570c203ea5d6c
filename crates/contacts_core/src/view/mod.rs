//! Ordered, filtered views over the contact store.
//!
//! # Responsibility
//! - Hold the session's active sort order (`sort_registry`).
//! - Compose store, filter and order into the rendered view (`pipeline`).
//!
//! # Invariants
//! - Filtering happens before ordering, except for fuzzy rankings which
//!   carry their own order.

pub mod pipeline;
pub mod sort_registry;
