//! Error types shared across the widget
//!
//! Fetch failures are values, not panics: the controller turns every one of
//! them into the "No options found" state for the generation that issued the
//! request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single `fetch_page` call
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("search endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed search response: {0}")]
    Decode(String),

    #[error("search returned no data")]
    EmptyResult,
}

/// Coarse classification the result set cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TransportFailure,
    EmptyResult,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::EmptyResult => FailureKind::EmptyResult,
            FetchError::Transport(_) | FetchError::Status(_) | FetchError::Decode(_) => {
                FailureKind::TransportFailure
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Invalid widget configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("invalid search endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
