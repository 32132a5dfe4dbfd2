//! Pure TUI state management
//!
//! Holds everything the terminal front end draws and turns key presses and
//! widget events into [`TuiAction`]s. No I/O happens here, so the whole
//! interaction model can be tested without a terminal.

use super::input::{InputHandler, InputOperation};
use crate::actors::{DisplaySnapshot, WidgetMessage};
use crate::display::Viewport;
use crate::types::{ResultItem, ResultStatus};

/// Input events that can be sent to TUI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiInput {
    Quit,
    ToggleHelp,
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    ToggleSelection,
    CopySelection,
    ClearSelection,
    Edit(InputOperation),
    /// The result list area changed height, in terminal rows
    Resize(usize),
}

/// Actions that should be taken as a result of state changes
#[derive(Debug, Clone, PartialEq)]
pub enum TuiAction {
    Quit,
    RawInput(String),
    ViewportNear(usize),
    ToggleSelection(ResultItem),
    ClearSelection,
    CopyToClipboard { text: String },
}

pub struct TuiState {
    pub search_input: String,
    pub cursor_position: usize,
    pub kill_ring: String,
    pub snapshot: DisplaySnapshot,
    pub viewport: Viewport,
    pub highlighted: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: String,
}

impl TuiState {
    /// Terminal rows are one unit high
    pub fn new(list_height: usize) -> Self {
        Self {
            search_input: String::new(),
            cursor_position: 0,
            kill_ring: String::new(),
            snapshot: DisplaySnapshot::default(),
            viewport: Viewport::new(list_height, 1),
            highlighted: 0,
            should_quit: false,
            show_help: false,
            status_message: "Type to search".to_string(),
        }
    }

    fn row_count(&self) -> usize {
        self.snapshot.rows.len()
    }

    /// Rows the highlight may land on; the loading placeholder is not one
    fn selectable_count(&self) -> usize {
        if self.snapshot.loading_placeholder_present {
            self.row_count().saturating_sub(1)
        } else {
            self.row_count()
        }
    }

    pub fn highlighted_item(&self) -> Option<&ResultItem> {
        self.snapshot
            .rows
            .get(self.highlighted)
            .filter(|item| !item.is_sentinel())
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.snapshot.selection.iter().any(|item| item.id == id)
    }

    /// Report the rendered range so the widget can decide on "load more"
    fn viewport_action(&self) -> Option<TuiAction> {
        self.viewport
            .last_visible_index(self.row_count())
            .map(TuiAction::ViewportNear)
    }

    fn move_highlight(&mut self, target: usize) -> Vec<TuiAction> {
        let selectable = self.selectable_count();
        if selectable == 0 {
            return Vec::new();
        }
        self.highlighted = target.min(selectable - 1);
        self.viewport.ensure_visible(self.highlighted, self.row_count());
        self.viewport_action().into_iter().collect()
    }

    /// Handle user input to update state
    pub fn handle_input(&mut self, input: TuiInput) -> Vec<TuiAction> {
        let mut actions = Vec::new();

        match input {
            TuiInput::Quit => {
                self.should_quit = true;
                actions.push(TuiAction::Quit);
            }
            TuiInput::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            TuiInput::NavigateUp => {
                actions = self.move_highlight(self.highlighted.saturating_sub(1));
            }
            TuiInput::NavigateDown => {
                actions = self.move_highlight(self.highlighted + 1);
            }
            TuiInput::PageUp => {
                let page = self.viewport.visible_rows().max(1);
                actions = self.move_highlight(self.highlighted.saturating_sub(page));
            }
            TuiInput::PageDown => {
                let page = self.viewport.visible_rows().max(1);
                actions = self.move_highlight(self.highlighted + page);
            }
            TuiInput::ToggleSelection => {
                if let Some(item) = self.highlighted_item() {
                    actions.push(TuiAction::ToggleSelection(item.clone()));
                }
            }
            TuiInput::CopySelection => {
                if self.snapshot.selection.is_empty() {
                    self.status_message = "Nothing selected".to_string();
                } else {
                    let text = self
                        .snapshot
                        .selection
                        .iter()
                        .map(|item| item.name.as_str())
                        .collect::<Vec<_>>()
                        .join("\n");
                    actions.push(TuiAction::CopyToClipboard { text });
                }
            }
            TuiInput::ClearSelection => {
                if !self.snapshot.selection.is_empty() {
                    actions.push(TuiAction::ClearSelection);
                }
            }
            TuiInput::Edit(operation) => {
                let edits = operation.edits_text();
                let before = self.search_input.clone();
                InputHandler::apply_operation(
                    operation,
                    &mut self.search_input,
                    &mut self.cursor_position,
                    &mut self.kill_ring,
                );
                if edits && self.search_input != before {
                    actions.push(TuiAction::RawInput(self.search_input.clone()));
                }
            }
            TuiInput::Resize(height) => {
                self.viewport.set_height(height, self.row_count());
                actions.extend(self.viewport_action());
            }
        }

        actions
    }

    /// Apply an outbound widget event
    pub fn apply_widget_event(&mut self, event: WidgetMessage) -> Vec<TuiAction> {
        match event {
            WidgetMessage::DisplayUpdated(snapshot) => self.apply_snapshot(snapshot),
            WidgetMessage::QueryCommitted(query) => {
                self.status_message = if query.is_empty() {
                    "Type to search".to_string()
                } else {
                    format!("Searching for \"{}\"", query)
                };
                Vec::new()
            }
            WidgetMessage::SelectionChanged(selection) => {
                self.status_message = format!("{} selected", selection.len());
                self.snapshot.selection = selection;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn apply_snapshot(&mut self, snapshot: DisplaySnapshot) -> Vec<TuiAction> {
        if snapshot.query != self.snapshot.query {
            self.highlighted = 0;
            self.viewport.reset();
        }

        if !snapshot.loading {
            self.status_message = match snapshot.status {
                ResultStatus::Empty => "Type to search".to_string(),
                ResultStatus::Loaded => format!("{} of {} loaded", snapshot.rows.len(), snapshot.total),
                ResultStatus::NoResults => "No matches".to_string(),
                ResultStatus::Failed => "Search failed".to_string(),
            };
        }

        self.snapshot = snapshot;
        self.viewport.clamp(self.row_count());
        self.highlighted = self.highlighted.min(self.selectable_count().saturating_sub(1));

        // A short first page may not fill the list; report the range so the
        // next page loads without the user having to scroll.
        if self.snapshot.loading {
            Vec::new()
        } else {
            self.viewport_action().into_iter().collect()
        }
    }
}
