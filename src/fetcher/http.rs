//! HTTP implementation of [`PageFetcher`]
//!
//! Speaks `GET /search?search_text=..&limit=..&offset=..` and expects
//! `{"data": [{"id": .., "name": ..}] | null, "total": ..}` back.

use super::PageFetcher;
use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::types::{Page, ResultItem};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Page fetcher backed by the remote search endpoint
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    base_url: String,
}

impl HttpPageFetcher {
    /// Create a fetcher reusing an existing client
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build a client with the configured timeout and point it at the
    /// configured endpoint
    pub fn from_config(config: &WidgetConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(client, config.endpoint.clone()))
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError> {
        log::debug!(
            "GET {} search_text={:?} limit={} offset={}",
            self.search_url(),
            query,
            limit,
            offset
        );

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("search_text", query.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Search endpoint answered {} for {:?}", status, query);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let body: SearchResponse = serde_json::from_slice(&body)?;
        body.into_page()
    }
}

/// Wire shape of the endpoint's answer
#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<ResultItem>>,
    #[serde(default)]
    total: usize,
}

impl SearchResponse {
    fn into_page(self) -> Result<Page, FetchError> {
        match self.data {
            Some(items) => Ok(Page::new(items, self.total)),
            None => Err(FetchError::EmptyResult),
        }
    }
}
