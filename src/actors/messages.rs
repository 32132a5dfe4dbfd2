use crate::controller::FetchTicket;
use crate::error::FetchError;
use crate::types::{Page, ResultItem, ResultStatus};
use serde::{Deserialize, Serialize};

/// Everything the rendering layer needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Input field contents, exactly as typed
    pub raw_text: String,
    /// Typed text is waiting out the quiet window
    pub pending_commit: bool,
    /// Query the rows belong to
    pub query: String,
    pub rows: Vec<ResultItem>,
    pub loading_placeholder_present: bool,
    pub loading: bool,
    pub has_more: bool,
    pub total: usize,
    pub status: ResultStatus,
    pub selection: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetMessage {
    // Inbound, from the rendering layer
    RawInput(String),
    ViewportNear {
        last_visible_index: usize,
    },
    ToggleSelection(ResultItem),
    Deselect(i64),
    ClearSelection,

    // Inbound, from spawned fetch tasks
    FetchCompleted {
        ticket: FetchTicket,
        outcome: Result<Page, FetchError>,
    },

    // Outbound
    QueryCommitted(String),
    DisplayUpdated(DisplaySnapshot),
    SelectionChanged(Vec<ResultItem>),
}

impl WidgetMessage {
    /// Method name used when this payload travels in a `Message`
    pub fn method(&self) -> &'static str {
        match self {
            WidgetMessage::RawInput(_) => "rawInput",
            WidgetMessage::ViewportNear { .. } => "viewportNear",
            WidgetMessage::ToggleSelection(_) => "toggleSelection",
            WidgetMessage::Deselect(_) => "deselect",
            WidgetMessage::ClearSelection => "clearSelection",
            WidgetMessage::FetchCompleted { .. } => "fetchCompleted",
            WidgetMessage::QueryCommitted(_) => "queryCommitted",
            WidgetMessage::DisplayUpdated(_) => "displayUpdated",
            WidgetMessage::SelectionChanged(_) => "selectionChanged",
        }
    }

    pub fn is_outbound(&self) -> bool {
        matches!(
            self,
            WidgetMessage::QueryCommitted(_)
                | WidgetMessage::DisplayUpdated(_)
                | WidgetMessage::SelectionChanged(_)
        )
    }
}
