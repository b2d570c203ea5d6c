//! Query descriptors and pure matchers.
//!
//! # Responsibility
//! - Define name/tag query values and their validating constructors.
//! - Evaluate relaxed/strict name matching, tag containment and fuzzy ranking.
//!
//! # Invariants
//! - Everything here is a pure function of its inputs; no engine state.

pub mod name_matcher;
pub mod query;
pub mod ranker;
pub mod tag_matcher;
