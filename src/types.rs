use serde::{Deserialize, Serialize};
use std::fmt;

/// Id reserved for synthetic rows ("No options found", "Loading...").
/// The search endpoint never hands out this id for a real record.
pub const SENTINEL_ID: i64 = 0;

pub const NO_OPTIONS_FOUND: &str = "No options found";
pub const LOADING_LABEL: &str = "Loading...";

/// A committed search query. Never mutated, only superseded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One search hit as returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: i64,
    pub name: String,
}

impl ResultItem {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Row shown when a query produced nothing or failed
    pub fn no_options_found() -> Self {
        Self::new(SENTINEL_ID, NO_OPTIONS_FOUND)
    }

    /// Trailing row shown while a continuation page is loading
    pub fn loading() -> Self {
        Self::new(SENTINEL_ID, LOADING_LABEL)
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }
}

/// One page of results for `(query, limit, offset)`.
///
/// `total` is the server's count of all matches for the query, not the page size.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<ResultItem>,
    pub total: usize,
}

impl Page {
    pub fn new(items: Vec<ResultItem>, total: usize) -> Self {
        Self { items, total }
    }
}

/// What the current result set represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResultStatus {
    /// No query, or the first page has not arrived yet
    #[default]
    Empty,
    /// At least one real row is loaded
    Loaded,
    /// The endpoint answered with no matches
    NoResults,
    /// The fetch failed at the transport level or returned garbage
    Failed,
}

impl ResultStatus {
    /// Both terminal "nothing to show" outcomes render the same sentinel row
    pub fn shows_sentinel(self) -> bool {
        matches!(self, ResultStatus::NoResults | ResultStatus::Failed)
    }
}
