//! Query descriptors handed to the engine.
//!
//! # Responsibility
//! - Define `SearchQuery` (name keywords + mode) and `TagQuery` (tag set).
//! - Offer validating constructors for the parsing layer.
//!
//! # Invariants
//! - Keywords held by a `SearchQuery` are trimmed and never empty strings.
//! - Matchers never re-validate; `parse` constructors are the only gate.

use crate::model::contact::is_valid_tag_name;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Maximum number of tags accepted by one tag filter.
pub const MAX_FILTER_TAGS: usize = 10;

/// Rejections raised before a query reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("tags must be alphanumeric: `{0}`")]
    InvalidTagCharset(String),
    #[error("at most {max} tags can be filtered at once, got {count}")]
    TooManyTags { count: usize, max: usize },
    #[error("at least one non-blank keyword is required")]
    EmptyKeywordSet,
    #[error("unknown search mode `{0}`; expected 0 (relaxed), 1 (strict) or 2 (fuzzy)")]
    InvalidSearchMode(String),
    #[error("invalid sort `{0}`; expected type name|dateadded and order asc|desc")]
    InvalidSortTypeOrOrder(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Name matching semantics. Exactly one applies per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Case-insensitive substring containment.
    #[default]
    Relaxed,
    /// Case-insensitive whole-word equality.
    Strict,
    /// Edit-distance ranking; top results regardless of distance.
    Fuzzy,
}

impl SearchMode {
    /// Parses the numeric mode code used on the command line (`0|1|2`).
    pub fn from_code(code: &str) -> QueryResult<Self> {
        match code.trim() {
            "0" => Ok(Self::Relaxed),
            "1" => Ok(Self::Strict),
            "2" => Ok(Self::Fuzzy),
            other => Err(QueryError::InvalidSearchMode(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Strict => "strict",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl Display for SearchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name search descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSearchQuery")]
pub struct SearchQuery {
    keywords: Vec<String>,
    mode: SearchMode,
}

/// Wire shape of a `SearchQuery` before keyword normalization.
#[derive(Deserialize)]
struct RawSearchQuery {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    mode: SearchMode,
}

impl From<RawSearchQuery> for SearchQuery {
    fn from(raw: RawSearchQuery) -> Self {
        Self::new(raw.mode, raw.keywords)
    }
}

impl SearchQuery {
    /// Builds a query, trimming keywords and discarding blank ones.
    ///
    /// The result may hold no keywords; the engine treats that as
    /// "matches nothing" (relaxed/strict) or "rank everything last" (fuzzy).
    pub fn new<I, S>(mode: SearchMode, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords, mode }
    }

    /// Builds a query and rejects it when no keyword survives trimming.
    pub fn parse<I, S>(mode: SearchMode, keywords: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = Self::new(mode, keywords);
        if query.keywords.is_empty() {
            return Err(QueryError::EmptyKeywordSet);
        }
        Ok(query)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_fuzzy(&self) -> bool {
        self.mode == SearchMode::Fuzzy
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "find[{}] {}", self.mode, self.keywords.join(" "))
    }
}

/// Tag filter descriptor. Every listed tag must be present on a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    tags: Vec<String>,
}

impl TagQuery {
    /// Wraps tags without validation. An empty list is an explicit "show none".
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a tag query after enforcing count and charset bounds.
    ///
    /// # Errors
    /// - `TooManyTags` when more than [`MAX_FILTER_TAGS`] tags are given.
    /// - `InvalidTagCharset` for the first non-alphanumeric tag.
    pub fn parse<I, S>(tags: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let query = Self::new(tags);
        if query.tags.len() > MAX_FILTER_TAGS {
            return Err(QueryError::TooManyTags {
                count: query.tags.len(),
                max: MAX_FILTER_TAGS,
            });
        }
        if let Some(tag) = query.tags.iter().find(|tag| !is_valid_tag_name(tag)) {
            return Err(QueryError::InvalidTagCharset(tag.clone()));
        }
        Ok(query)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Display for TagQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter {}", self.tags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryError, SearchMode, SearchQuery, TagQuery, MAX_FILTER_TAGS};

    #[test]
    fn search_query_trims_and_drops_blank_keywords() {
        let query = SearchQuery::new(SearchMode::Relaxed, ["  alice ", "", "   ", "bob"]);
        assert_eq!(query.keywords(), ["alice", "bob"]);
    }

    #[test]
    fn parse_rejects_all_blank_keywords() {
        let err = SearchQuery::parse(SearchMode::Strict, [" ", ""]).unwrap_err();
        assert_eq!(err, QueryError::EmptyKeywordSet);
    }

    #[test]
    fn mode_codes_map_to_modes() {
        assert_eq!(SearchMode::from_code("0").unwrap(), SearchMode::Relaxed);
        assert_eq!(SearchMode::from_code("1").unwrap(), SearchMode::Strict);
        assert_eq!(SearchMode::from_code(" 2 ").unwrap(), SearchMode::Fuzzy);
        assert!(matches!(
            SearchMode::from_code("3"),
            Err(QueryError::InvalidSearchMode(code)) if code == "3"
        ));
    }

    #[test]
    fn tag_query_enforces_bounds() {
        let eleven = (0..=MAX_FILTER_TAGS).map(|idx| format!("t{idx}"));
        assert!(matches!(
            TagQuery::parse(eleven),
            Err(QueryError::TooManyTags { count: 11, max: 10 })
        ));

        let ten = (0..MAX_FILTER_TAGS).map(|idx| format!("t{idx}"));
        assert_eq!(TagQuery::parse(ten).unwrap().tags().len(), 10);

        assert_eq!(
            TagQuery::parse(["friends", "v-i-p"]).unwrap_err(),
            QueryError::InvalidTagCharset("v-i-p".to_string())
        );
    }

    #[test]
    fn empty_tag_query_is_valid() {
        let query = TagQuery::parse(Vec::<String>::new()).unwrap();
        assert!(query.is_empty());
    }
}
