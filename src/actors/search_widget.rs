//! Search widget actor
//!
//! Owns the debouncer, the controller, the projector and the selection. Raw
//! input and viewport events come in from the rendering layer, fetch outcomes
//! come back from spawned tasks, and the debounce deadline is the loop's only
//! timer. Every visible change is published as a `displayUpdated` snapshot.

use crate::actors::messages::{DisplaySnapshot, WidgetMessage};
use crate::config::WidgetConfig;
use crate::controller::{FetchRequest, Resolution, SearchController};
use crate::core::{ActorController, Message, MessageHandler};
use crate::display::DisplayProjector;
use crate::fetcher::PageFetcher;
use crate::search_debouncer::QueryDebouncer;
use crate::selection::SelectionSet;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::Instant;

pub struct SearchWidgetActor {
    debouncer: QueryDebouncer,
    controller: SearchController,
    projector: DisplayProjector,
    selection: SelectionSet,
    fetcher: Arc<dyn PageFetcher>,
    /// Last published snapshot, to skip publishing identical ones
    last_snapshot: Option<DisplaySnapshot>,
}

impl SearchWidgetActor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &WidgetConfig) -> Self {
        Self {
            debouncer: QueryDebouncer::with_delay(config.debounce_delay()),
            controller: SearchController::new(config.page_size),
            projector: DisplayProjector::with_threshold(config.load_more_threshold),
            selection: SelectionSet::new(),
            fetcher,
            last_snapshot: None,
        }
    }

    /// Current display state
    pub fn snapshot(&self) -> DisplaySnapshot {
        let projection = self.projector.project(&self.controller);
        let results = self.controller.results();

        DisplaySnapshot {
            raw_text: self.debouncer.raw_text().to_string(),
            pending_commit: self.debouncer.has_pending_commit(),
            query: results.query().as_str().to_string(),
            rows: projection.rows,
            loading_placeholder_present: projection.loading_placeholder_present,
            loading: results.is_loading(),
            has_more: results.has_more(),
            total: results.total(),
            status: results.status(),
            selection: self.selection.items().to_vec(),
        }
    }

    fn commit(&mut self, query: String, controller: &ActorController<WidgetMessage>) {
        log::debug!("Query committed: {:?}", query);
        if let Err(e) = controller.send_message(
            "queryCommitted",
            WidgetMessage::QueryCommitted(query.clone()),
        ) {
            log::warn!("Failed to send queryCommitted message: {}", e);
        }

        if let Some(request) = self.controller.commit_query(&query) {
            self.dispatch(request, controller);
        }
    }

    /// Run a page request in its own task; the outcome comes back as a
    /// `fetchCompleted` message carrying the request's ticket
    fn dispatch(&self, request: FetchRequest, controller: &ActorController<WidgetMessage>) {
        let fetcher = Arc::clone(&self.fetcher);
        let inbox = controller.inbox();

        log::debug!(
            "Dispatching fetch: query={:?} limit={} offset={} generation={}",
            request.query.as_str(),
            request.limit,
            request.offset(),
            request.generation()
        );

        tokio::spawn(async move {
            let outcome = fetcher
                .fetch_page(request.query.as_str(), request.limit, request.offset())
                .await;

            let message = Message::new(
                "fetchCompleted",
                WidgetMessage::FetchCompleted {
                    ticket: request.ticket,
                    outcome,
                },
            );
            if inbox.send(message).is_err() {
                log::debug!("Widget stopped before fetch for {:?} completed", request.query.as_str());
            }
        });
    }

    fn publish(&mut self, controller: &ActorController<WidgetMessage>) {
        let snapshot = self.snapshot();
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return;
        }

        log::trace!(
            "Publishing snapshot: {} rows, loading={}, has_more={}",
            snapshot.rows.len(),
            snapshot.loading,
            snapshot.has_more
        );
        self.last_snapshot = Some(snapshot.clone());
        if let Err(e) =
            controller.send_message("displayUpdated", WidgetMessage::DisplayUpdated(snapshot))
        {
            log::warn!("Failed to send displayUpdated message: {}", e);
        }
    }

    fn selection_changed(&mut self, controller: &ActorController<WidgetMessage>) {
        if let Err(e) = controller.send_message(
            "selectionChanged",
            WidgetMessage::SelectionChanged(self.selection.items().to_vec()),
        ) {
            log::warn!("Failed to send selectionChanged message: {}", e);
        }
        self.publish(controller);
    }
}

#[async_trait]
impl MessageHandler<WidgetMessage> for SearchWidgetActor {
    async fn on_message(
        &mut self,
        message: Message<WidgetMessage>,
        controller: &ActorController<WidgetMessage>,
    ) {
        match message.payload {
            WidgetMessage::RawInput(text) => {
                if let Some(query) = self.debouncer.on_raw_input(text, Instant::now()) {
                    self.commit(query, controller);
                }
                self.publish(controller);
            }
            WidgetMessage::ViewportNear { last_visible_index } => {
                if let Some(request) = self
                    .projector
                    .on_viewport_reached_near(&mut self.controller, last_visible_index)
                {
                    self.dispatch(request, controller);
                    self.publish(controller);
                }
            }
            WidgetMessage::FetchCompleted { ticket, outcome } => {
                if self.controller.resolve(ticket, outcome) == Resolution::Applied {
                    self.publish(controller);
                }
            }
            WidgetMessage::ToggleSelection(item) => {
                if self.selection.toggle(item) {
                    self.selection_changed(controller);
                }
            }
            WidgetMessage::Deselect(id) => {
                if self.selection.remove(id) {
                    self.selection_changed(controller);
                }
            }
            WidgetMessage::ClearSelection => {
                if self.selection.clear() {
                    self.selection_changed(controller);
                }
            }
            WidgetMessage::QueryCommitted(_)
            | WidgetMessage::DisplayUpdated(_)
            | WidgetMessage::SelectionChanged(_) => {
                log::warn!("Ignoring outbound message sent to widget: {}", message.method);
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    async fn on_deadline(&mut self, controller: &ActorController<WidgetMessage>) {
        let now = Instant::now();
        match self.debouncer.poll_commit(now) {
            Some(query) => {
                self.commit(query, controller);
                self.publish(controller);
            }
            None => {
                // Woken early; the loop re-arms on the same deadline
                if let Some(remaining) = self.debouncer.time_until_ready(now) {
                    log::trace!("Quiet window still open for {:?}", remaining);
                }
            }
        }
    }
}
