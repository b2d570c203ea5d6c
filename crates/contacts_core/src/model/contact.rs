//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record consumed by the query engine.
//! - Provide copy-on-write helpers used by add/edit paths.
//!
//! # Invariants
//! - `date_added` is assigned once at creation and copied into every
//!   replacement record produced by an edit.
//! - Tags are unique and compared byte-for-byte (case-sensitive).
//! - `name` is never blank once validated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Text shown in place of an empty note.
pub const DEFAULT_NOTE: &str = "No current note";

const MAX_TIMEZONE_HOURS: f64 = 24.0;
const MIN_TIMEZONE_HOURS: f64 = -24.0;

static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag name regex"));

/// Returns whether `value` is an acceptable tag name (ASCII alphanumeric, non-empty).
pub fn is_valid_tag_name(value: &str) -> bool {
    TAG_NAME_RE.is_match(value)
}

/// Validation failures for contact records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContactValidationError {
    #[error("contact name must not be blank")]
    BlankName,
    #[error("invalid tag `{0}`: tags must be alphanumeric")]
    InvalidTag(String),
    #[error("timezone offset {0} is outside the open range (-24.0, 24.0)")]
    InvalidTimezone(f64),
}

/// UTC offset of a contact, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timezone(pub f64);

impl Timezone {
    /// Returns whether the offset lies strictly inside `(-24.0, 24.0)`.
    pub fn is_valid(self) -> bool {
        self.0 > MIN_TIMEZONE_HOURS && self.0 < MAX_TIMEZONE_HOURS
    }

    pub fn offset_hours(self) -> f64 {
        self.0
    }
}

impl Display for Timezone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

/// Canonical contact record.
///
/// Values are treated as immutable once they enter a store: edits build a new
/// record through the `with_*` helpers or [`ContactEdit::apply`] and replace
/// the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Case-sensitive tag names.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub timezone: Option<Timezone>,
    /// Free-form note. Empty means "no note".
    #[serde(default)]
    pub note: String,
    /// Unix epoch milliseconds. Never reassigned by edits.
    pub date_added: i64,
}

impl Contact {
    /// Creates a contact with only a name and creation timestamp set.
    pub fn new(name: impl Into<String>, date_added: i64) -> Self {
        Self {
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            tags: BTreeSet::new(),
            timezone: None,
            note: String::new(),
            date_added,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Replaces the full tag set.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timezone(mut self, timezone: Option<Timezone>) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `BlankName` when the trimmed name is empty.
    /// - `InvalidTag` for the first tag that is not alphanumeric.
    /// - `InvalidTimezone` when the offset is outside `(-24, 24)`.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::BlankName);
        }
        if let Some(tag) = self.tags.iter().find(|tag| !is_valid_tag_name(tag)) {
            return Err(ContactValidationError::InvalidTag(tag.clone()));
        }
        if let Some(timezone) = self.timezone {
            if !timezone.is_valid() {
                return Err(ContactValidationError::InvalidTimezone(timezone.0));
            }
        }
        Ok(())
    }

    /// Two contacts denote the same person when their names are equal.
    pub fn is_same_contact(&self, other: &Contact) -> bool {
        self.name == other.name
    }

    /// Note text for display, falling back to [`DEFAULT_NOTE`].
    pub fn note_display(&self) -> &str {
        if self.note.is_empty() {
            DEFAULT_NOTE
        } else {
            self.note.as_str()
        }
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Note: {}; Tags: ",
            self.name,
            self.phone,
            self.email,
            self.address,
            self.note_display()
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}

/// Input for creating a contact. The store assigns `date_added`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub timezone: Option<Timezone>,
    #[serde(default)]
    pub note: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Materializes the draft into a contact stamped with `date_added`.
    pub fn into_contact(self, date_added: i64) -> Contact {
        Contact {
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            tags: self.tags,
            timezone: self.timezone,
            note: self.note,
            date_added,
        }
    }
}

/// Partial edit of an existing contact. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub timezone: Option<Option<Timezone>>,
    pub note: Option<String>,
}

impl ContactEdit {
    /// Returns whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.tags.is_none()
            && self.timezone.is_none()
            && self.note.is_none()
    }

    /// Builds the replacement record. `date_added` always comes from `original`.
    pub fn apply(&self, original: &Contact) -> Contact {
        Contact {
            name: self.name.clone().unwrap_or_else(|| original.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| original.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| original.email.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| original.address.clone()),
            tags: self.tags.clone().unwrap_or_else(|| original.tags.clone()),
            timezone: self.timezone.unwrap_or(original.timezone),
            note: self.note.clone().unwrap_or_else(|| original.note.clone()),
            date_added: original.date_added,
        }
    }
}
