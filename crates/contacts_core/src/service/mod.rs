//! Core use-case services.
//!
//! # Responsibility
//! - Turn validated query/sort/edit descriptors into session commands.
//! - Keep hosts (CLI, UI) decoupled from store and view internals.

pub mod session;
