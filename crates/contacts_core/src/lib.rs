//! Contact query engine core.
//! This crate owns contact invariants, search semantics and view ordering.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    is_valid_tag_name, Contact, ContactDraft, ContactEdit, ContactValidationError, Timezone,
    DEFAULT_NOTE,
};
pub use repo::contact_storage::{
    ContactStorage, SqliteContactStorage, StorageError, StorageResult,
};
pub use repo::contact_store::{Clock, ContactStore, StoreError, StoreResult};
pub use search::name_matcher::{fuzzy_matches, name_matches, FUZZY_MATCH_THRESHOLD};
pub use search::query::{
    QueryError, QueryResult, SearchMode, SearchQuery, TagQuery, MAX_FILTER_TAGS,
};
pub use search::ranker::{levenshtein, minimum_distance, rank, FUZZY_RESULT_LIMIT};
pub use search::tag_matcher::tags_match;
pub use service::session::{
    CommandOutcome, Session, SessionConfig, SessionError, SessionResult,
};
pub use view::pipeline::{materialize, materialize_with_limit, ActiveFilter};
pub use view::sort_registry::{SortKey, SortOrder, SortRegistry, SortSpec};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
