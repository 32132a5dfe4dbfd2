//! Page fetching
//!
//! The widget never talks to the network directly. It asks a [`PageFetcher`]
//! for `(query, limit, offset)` and gets back a page or a [`FetchError`].
//! Implementations must tolerate concurrent calls; in-flight requests are
//! never cancelled, stale answers are dropped by the controller instead.

mod http;

pub use http::HttpPageFetcher;

use crate::error::FetchError;
use crate::types::Page;
use async_trait::async_trait;

/// Source of paged search results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `limit` results for `query`, skipping the first `offset`
    async fn fetch_page(&self, query: &str, limit: usize, offset: usize)
        -> Result<Page, FetchError>;
}
