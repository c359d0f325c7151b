//! Bookmark search domain types.
//!
//! A [`SearchFilter`] describes which bookmarks to fetch; the provider answers
//! with a [`SearchResult`] of normalized [`BookmarkRecord`]s. All of these are
//! request-scoped values; nothing here is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookmarkError;

/// Largest page the provider will return in one request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Calendar date format accepted for `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter for a bookmark search.
///
/// Every field is optional except `collection_id` (0 = all collections) and
/// `limit` (default [`MAX_PAGE_SIZE`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Only bookmarks created after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Only bookmarks created before this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Only bookmarks carrying this tag. An empty string means no tag filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Collection to search in (0 = all collections).
    #[serde(default)]
    pub collection_id: i64,

    /// Maximum number of bookmarks to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            tag: None,
            collection_id: 0,
            limit: default_limit(),
        }
    }
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_collection(mut self, collection_id: i64) -> Self {
        self.collection_id = collection_id;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Build a filter from raw string inputs, as they arrive from a tool call
    /// or the command line. Dates must be `YYYY-MM-DD`.
    pub fn parse(
        start_date: Option<&str>,
        end_date: Option<&str>,
        tag: Option<&str>,
        collection_id: i64,
        limit: u32,
    ) -> Result<Self, BookmarkError> {
        Ok(Self {
            start_date: start_date.map(|d| parse_date("start_date", d)).transpose()?,
            end_date: end_date.map(|d| parse_date("end_date", d)).transpose()?,
            tag: tag.map(str::to_string),
            collection_id,
            limit,
        })
    }

    /// The provider's text query for this filter.
    ///
    /// Tokens, in order: `#tag`, `created:>start`, `created:<end`, joined by
    /// single spaces. An empty filter yields an empty query, which matches
    /// everything.
    pub fn query(&self) -> String {
        let mut tokens = Vec::with_capacity(3);
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            tokens.push(format!("#{tag}"));
        }
        if let Some(start) = self.start_date {
            tokens.push(format!("created:>{}", start.format(DATE_FORMAT)));
        }
        if let Some(end) = self.end_date {
            tokens.push(format!("created:<{}", end.format(DATE_FORMAT)));
        }
        tokens.join(" ")
    }

    /// Page size to request: `limit` clamped to `1..=MAX_PAGE_SIZE`.
    pub fn per_page(&self) -> u32 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Parse a `YYYY-MM-DD` calendar date, naming the offending field on failure.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, BookmarkError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|source| BookmarkError::Validation { field, source })
}

/// A single bookmark, normalized from the provider's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    /// Provider-specific collection metadata, passed through untouched.
    #[serde(default)]
    pub collection: serde_json::Map<String, serde_json::Value>,
}

/// The answer to one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<BookmarkRecord>,

    /// Total matches reported by the provider. Can exceed `items.len()`
    /// since only one page is fetched.
    pub count: u64,
}
