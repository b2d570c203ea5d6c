//! Command-level session over one contact store.
//!
//! # Responsibility
//! - Own the contact store, the active filter and the sort registry.
//! - Execute find/filter/list/sort/add/edit/note/delete as all-or-nothing
//!   commands and report user-facing outcomes.
//!
//! # Invariants
//! - Filter and sort order persist independently until each is replaced.
//! - A rejected command leaves store, filter and sort order untouched.
//! - Displayed indices always refer to the current materialized view.

use crate::model::contact::{Contact, ContactDraft, ContactEdit};
use crate::repo::contact_store::{ContactStore, StoreError};
use crate::search::query::{SearchQuery, TagQuery};
use crate::search::ranker::FUZZY_RESULT_LIMIT;
use crate::view::pipeline::{materialize_with_limit, ActiveFilter};
use crate::view::sort_registry::{SortRegistry, SortSpec};
use log::{info, warn};
use serde::Deserialize;
use std::time::Instant;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Command rejections raised by the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("the contact index {index} is invalid for a list of {len} contacts")]
    InvalidDisplayedIndex { index: usize, len: usize },
    #[error("at least one field to edit must be provided")]
    NothingToEdit,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Tunables for a session, loadable from host settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of contacts a fuzzy search returns.
    pub fuzzy_result_limit: usize,
    /// Sort order active before any sort command.
    pub initial_sort: SortSpec,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fuzzy_result_limit: FUZZY_RESULT_LIMIT,
            initial_sort: SortSpec::default(),
        }
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Human-readable status line.
    pub message: String,
    /// Size of the view after the command.
    pub listed: usize,
}

/// One user session: store, active filter and active order.
#[derive(Debug, Clone)]
pub struct Session {
    store: ContactStore,
    filter: Option<ActiveFilter>,
    sort: SortRegistry,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ContactStore::new(), SessionConfig::default())
    }
}

impl Session {
    pub fn new(store: ContactStore, config: SessionConfig) -> Self {
        Self {
            store,
            filter: None,
            sort: SortRegistry::new(config.initial_sort),
            config,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Releases the canonical store, e.g. for persistence on shutdown.
    pub fn into_store(self) -> ContactStore {
        self.store
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.filter.as_ref()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort.current_spec()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current ordered view as shown to the user.
    pub fn view(&self) -> Vec<&Contact> {
        materialize_with_limit(
            self.store.contacts(),
            self.filter.as_ref(),
            &self.sort,
            self.config.fuzzy_result_limit,
        )
    }

    /// Replaces the active filter with a name search.
    pub fn find(&mut self, query: SearchQuery) -> CommandOutcome {
        let started_at = Instant::now();
        let mode = query.mode();
        let keyword_count = query.keywords().len();
        self.filter = Some(ActiveFilter::Name(query));
        let listed = self.view().len();

        info!(
            "event=find module=session status=ok mode={mode} keyword_count={keyword_count} result_count={listed} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        listed_outcome(listed)
    }

    /// Replaces the active filter with a tag filter.
    pub fn filter(&mut self, query: TagQuery) -> CommandOutcome {
        let started_at = Instant::now();
        let tag_count = query.tags().len();
        self.filter = Some(ActiveFilter::Tags(query));
        let listed = self.view().len();

        info!(
            "event=filter module=session status=ok tag_count={tag_count} result_count={listed} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        listed_outcome(listed)
    }

    /// Clears the active filter so every contact is shown.
    pub fn list(&mut self) -> CommandOutcome {
        self.filter = None;
        let listed = self.store.len();
        info!("event=list module=session status=ok result_count={listed}");
        CommandOutcome {
            message: "Listed all contacts".to_string(),
            listed,
        }
    }

    /// Replaces the active sort order. The filter is kept.
    pub fn sort(&mut self, spec: SortSpec) -> CommandOutcome {
        self.sort.set_order(spec);
        info!("event=sort module=session status=ok spec=\"{spec}\"");
        CommandOutcome {
            message: format!("Sorted all contacts by {spec}"),
            listed: self.view().len(),
        }
    }

    /// Flips the active sort order. The filter is kept.
    pub fn reverse_sort(&mut self) -> CommandOutcome {
        let spec = self.sort.reverse();
        info!("event=sort_reverse module=session status=ok spec=\"{spec}\"");
        CommandOutcome {
            message: format!("Reversed sort order, now {spec}"),
            listed: self.view().len(),
        }
    }

    /// Adds a new contact stamped with the next `date_added`.
    pub fn add(&mut self, draft: ContactDraft) -> SessionResult<CommandOutcome> {
        let added = self.store.add(draft).map_err(log_rejection("contact_add"))?;
        let message = format!("New contact added: {added}");
        info!(
            "event=contact_add module=session status=ok count={}",
            self.store.len()
        );
        Ok(CommandOutcome {
            message,
            listed: self.view().len(),
        })
    }

    /// Edits the contact at `index` of the current view.
    ///
    /// The replacement keeps the original `date_added` and store position.
    pub fn edit(&mut self, index: usize, edit: &ContactEdit) -> SessionResult<CommandOutcome> {
        if edit.is_empty() {
            return Err(SessionError::NothingToEdit);
        }
        let target = self.displayed(index)?;
        let edited = edit.apply(&target);
        let replaced = self
            .store
            .replace(&target, edited)
            .map_err(log_rejection("contact_edit"))?;
        let message = format!("Edited contact: {replaced}");

        info!("event=contact_edit module=session status=ok index={index}");
        Ok(CommandOutcome {
            message,
            listed: self.view().len(),
        })
    }

    /// Sets or clears (empty `note`) the note of the contact at `index`.
    ///
    /// Shows all contacts afterwards so the edited contact stays visible.
    pub fn set_note(
        &mut self,
        index: usize,
        note: impl Into<String>,
    ) -> SessionResult<CommandOutcome> {
        let target = self.displayed(index)?;
        let edited = target.clone().with_note(note);
        let replaced = self
            .store
            .replace(&target, edited)
            .map_err(log_rejection("contact_note"))?;
        let message = if replaced.note.is_empty() {
            format!("Removed note from contact: {replaced}")
        } else {
            format!("Added note to contact: {replaced}")
        };

        self.filter = None;
        info!("event=contact_note module=session status=ok index={index}");
        Ok(CommandOutcome {
            message,
            listed: self.store.len(),
        })
    }

    /// Deletes the contact at `index` of the current view.
    pub fn delete(&mut self, index: usize) -> SessionResult<CommandOutcome> {
        let target = self.displayed(index)?;
        let removed = self
            .store
            .remove(&target)
            .map_err(log_rejection("contact_delete"))?;

        info!(
            "event=contact_delete module=session status=ok count={}",
            self.store.len()
        );
        Ok(CommandOutcome {
            message: format!("Deleted contact: {removed}"),
            listed: self.view().len(),
        })
    }

    fn displayed(&self, index: usize) -> SessionResult<Contact> {
        let view = self.view();
        view.get(index)
            .map(|contact| (*contact).clone())
            .ok_or(SessionError::InvalidDisplayedIndex {
                index,
                len: view.len(),
            })
    }
}

fn listed_outcome(listed: usize) -> CommandOutcome {
    CommandOutcome {
        message: format!("{listed} contacts listed!"),
        listed,
    }
}

fn log_rejection(event: &'static str) -> impl Fn(StoreError) -> SessionError {
    move |err| {
        warn!(
            "event={event} module=session status=rejected error_code={}",
            error_code(&err)
        );
        SessionError::Store(err)
    }
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::Validation(_) => "invalid_contact",
        StoreError::DuplicateContact(_) => "duplicate_contact",
        StoreError::ContactNotFound(_) => "contact_not_found",
    }
}
