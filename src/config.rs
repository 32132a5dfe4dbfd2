//! Widget configuration
//!
//! Every field has a default (400ms quiet window, pages of 10), so a partial
//! JSON file or no file at all is enough.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Runtime configuration for a search widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Base URL of the search service; `/search` is appended
    pub endpoint: String,
    /// `limit` sent with every page request
    pub page_size: usize,
    /// Quiet window before a burst of keystrokes is committed
    pub debounce_ms: u64,
    /// Per-request timeout handed to the HTTP client
    pub timeout_ms: u64,
    /// How many rows before the end of the loaded items a viewport may stop
    /// and still trigger "load more". Zero means only the last row does.
    pub load_more_threshold: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            load_more_threshold: 0,
        }
    }
}

impl WidgetConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_load_more_threshold(mut self, threshold: usize) -> Self {
        self.load_more_threshold = threshold;
        self
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the values that would otherwise break the widget at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}
