//! Shared helpers for widget integration tests
//!
//! [`GatedFetcher`] parks every page request until the test answers it, so a
//! test decides exactly when, and in which order, responses arrive.

#![allow(dead_code)]

use async_trait::async_trait;
use searchbox::core::Message;
use searchbox::{DisplaySnapshot, FetchError, Page, PageFetcher, ResultItem, WidgetMessage};
use tokio::sync::{mpsc, oneshot};

/// A page request waiting for the test to answer it
#[derive(Debug)]
pub struct PendingFetch {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    responder: oneshot::Sender<Result<Page, FetchError>>,
}

impl PendingFetch {
    pub fn respond(self, outcome: Result<Page, FetchError>) {
        // The widget may already have stopped
        let _ = self.responder.send(outcome);
    }

    pub fn respond_with(self, items: Vec<ResultItem>, total: usize) {
        self.respond(Ok(Page::new(items, total)));
    }
}

pub struct GatedFetcher {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

impl GatedFetcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingFetch>) {
        let (requests, pending) = mpsc::unbounded_channel();
        (Self { requests }, pending)
    }
}

#[async_trait]
impl PageFetcher for GatedFetcher {
    async fn fetch_page(&self, query: &str, limit: usize, offset: usize) -> Result<Page, FetchError> {
        let (responder, response) = oneshot::channel();
        self.requests
            .send(PendingFetch {
                query: query.to_string(),
                limit,
                offset,
                responder,
            })
            .map_err(|_| FetchError::Transport("test harness closed".to_string()))?;

        response
            .await
            .unwrap_or_else(|_| Err(FetchError::Transport("request dropped".to_string())))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// `count` items with ids starting at `first`
pub fn items(first: i64, count: usize) -> Vec<ResultItem> {
    (first..first + count as i64)
        .map(|id| ResultItem::new(id, format!("item {}", id)))
        .collect()
}

/// Wait for the next `displayUpdated` snapshot
pub async fn next_snapshot(
    events: &mut mpsc::UnboundedReceiver<Message<WidgetMessage>>,
) -> DisplaySnapshot {
    loop {
        let message = events.recv().await.expect("widget stopped");
        if let WidgetMessage::DisplayUpdated(snapshot) = message.payload {
            return snapshot;
        }
    }
}

/// Wait for a snapshot of `query` with nothing in flight
pub async fn settled_snapshot(
    events: &mut mpsc::UnboundedReceiver<Message<WidgetMessage>>,
    query: &str,
) -> DisplaySnapshot {
    loop {
        let snapshot = next_snapshot(events).await;
        if !snapshot.loading && snapshot.query == query {
            return snapshot;
        }
    }
}

/// Everything already queued on the event channel
pub fn drain(events: &mut mpsc::UnboundedReceiver<Message<WidgetMessage>>) -> Vec<WidgetMessage> {
    let mut drained = Vec::new();
    while let Ok(message) = events.try_recv() {
        drained.push(message.payload);
    }
    drained
}
