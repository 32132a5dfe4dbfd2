//! Result set accumulation
//!
//! Holds the items loaded so far for the current query. This is a plain
//! state container: it trusts its caller to have rejected answers that
//! belong to an older query.

use crate::error::FailureKind;
use crate::types::{Page, Query, ResultItem, ResultStatus};

/// Items accumulated for one query, plus loading bookkeeping
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    query: Query,
    items: Vec<ResultItem>,
    total: usize,
    loading: bool,
    status: ResultStatus,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over for `query`. Old items disappear before any request for the
    /// new query goes out.
    pub fn reset(&mut self, query: Query) {
        self.query = query;
        self.items.clear();
        self.total = 0;
        self.loading = false;
        self.status = ResultStatus::Empty;
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Merge a page into the set. The first page of a query replaces whatever
    /// is there, later pages are appended as-is.
    pub fn apply_page(&mut self, page: Page, is_first_page_of_query: bool) {
        if is_first_page_of_query {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.total = page.total;
        self.loading = false;
        self.status = if self.items.is_empty() {
            ResultStatus::NoResults
        } else {
            ResultStatus::Loaded
        };
    }

    /// Terminal state for the current query until a new one is committed
    pub fn apply_failure(&mut self, kind: FailureKind) {
        self.items.clear();
        self.total = 0;
        self.loading = false;
        self.status = match kind {
            FailureKind::EmptyResult => ResultStatus::NoResults,
            FailureKind::TransportFailure => ResultStatus::Failed,
        };
    }

    pub fn has_more(&self) -> bool {
        self.items.len() < self.total
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> ResultStatus {
        self.status
    }
}
