//! Public handle to a running search widget

use crate::actors::{SearchWidgetActor, WidgetMessage};
use crate::config::WidgetConfig;
use crate::core::{Actor, ActorSendError, Message};
use crate::fetcher::PageFetcher;
use crate::types::ResultItem;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Stream of `queryCommitted`, `displayUpdated` and `selectionChanged` messages
pub type WidgetEvents = mpsc::UnboundedReceiver<Message<WidgetMessage>>;

/// A search widget running on its own actor.
///
/// Feed it raw text and viewport positions; read snapshots from the
/// [`WidgetEvents`] receiver returned by [`SearchWidget::spawn`]. Dropping the
/// handle stops the widget; fetches still in flight finish and are ignored.
pub struct SearchWidget {
    actor: Actor<WidgetMessage, SearchWidgetActor>,
}

impl SearchWidget {
    /// Start a widget. Must be called from within a tokio runtime.
    pub fn spawn(fetcher: Arc<dyn PageFetcher>, config: &WidgetConfig) -> (Self, WidgetEvents) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handler = SearchWidgetActor::new(fetcher, config);
        let actor = Actor::new(handler, event_tx);
        log::debug!(
            "Search widget started (page size {}, debounce {}ms)",
            config.page_size,
            config.debounce_ms
        );
        (Self { actor }, event_rx)
    }

    fn send(&self, payload: WidgetMessage) -> Result<(), ActorSendError> {
        self.actor.send_message(payload.method(), payload)
    }

    /// The input field changed
    pub fn input(&self, text: impl Into<String>) -> Result<(), ActorSendError> {
        self.send(WidgetMessage::RawInput(text.into()))
    }

    /// The list was scrolled; `last_visible_index` is the last row on screen
    pub fn viewport_near(&self, last_visible_index: usize) -> Result<(), ActorSendError> {
        self.send(WidgetMessage::ViewportNear { last_visible_index })
    }

    pub fn toggle_selection(&self, item: ResultItem) -> Result<(), ActorSendError> {
        self.send(WidgetMessage::ToggleSelection(item))
    }

    pub fn deselect(&self, id: i64) -> Result<(), ActorSendError> {
        self.send(WidgetMessage::Deselect(id))
    }

    pub fn clear_selection(&self) -> Result<(), ActorSendError> {
        self.send(WidgetMessage::ClearSelection)
    }

    /// Stop the widget and wait for its loop to exit
    pub async fn shutdown(mut self) {
        self.actor.shutdown().await;
    }
}
