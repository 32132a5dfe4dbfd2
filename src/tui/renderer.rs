//! TUI rendering system
//!
//! Draws the search input, the visible slice of the result list and the
//! status bar from a [`TuiState`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::state::TuiState;
use crate::display::format_row;
use crate::types::SENTINEL_ID;

const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 3;
const SELECTED_MARK: &str = "[x] ";
const UNSELECTED_MARK: &str = "[ ] ";

/// Central renderer for TUI application
pub struct TuiRenderer;

impl TuiRenderer {
    /// Rows available to the result list on a terminal `terminal_height` rows tall
    pub fn list_height(terminal_height: u16) -> usize {
        terminal_height
            .saturating_sub(INPUT_HEIGHT + STATUS_HEIGHT)
            .saturating_sub(2) as usize
    }

    /// Render the complete TUI interface
    pub fn render(f: &mut Frame, state: &TuiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(f.size());

        Self::render_input_box(f, chunks[0], state);
        Self::render_results_box(f, chunks[1], state);
        Self::render_status_bar(f, chunks[2], state);

        if state.show_help {
            Self::render_help_popup(f);
        }
    }

    fn render_input_box(f: &mut Frame, area: Rect, state: &TuiState) {
        let mut chars: Vec<char> = state.search_input.chars().collect();
        let cursor = state.cursor_position.min(chars.len());
        chars.insert(cursor, '█');
        let display_text: String = chars.into_iter().collect();

        let title = if state.snapshot.pending_commit {
            "Search - typing"
        } else if state.snapshot.loading {
            "Search - loading"
        } else {
            "Search"
        };

        let input = Paragraph::new(display_text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White));
        f.render_widget(input, area);
    }

    /// Only rows inside the viewport are turned into list items
    fn render_results_box(f: &mut Frame, area: Rect, state: &TuiState) {
        let rows = &state.snapshot.rows;
        let visible = state.viewport.visible_range(rows.len());
        let width = area.width.saturating_sub(2 + SELECTED_MARK.len() as u16) as usize;

        let items: Vec<ListItem> = rows[visible.clone()]
            .iter()
            .map(|row| {
                if row.id == SENTINEL_ID {
                    let style = Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC);
                    return ListItem::new(format_row(row, width)).style(style);
                }

                let mark = if state.is_selected(row.id) {
                    SELECTED_MARK
                } else {
                    UNSELECTED_MARK
                };
                ListItem::new(format!("{}{}", mark, format_row(row, width)))
            })
            .collect();

        let snapshot = &state.snapshot;
        let title = if snapshot.query.is_empty() {
            "Results".to_string()
        } else {
            let loaded = rows.len() - usize::from(snapshot.loading_placeholder_present);
            format!("Results for \"{}\" ({}/{})", snapshot.query, loaded, snapshot.total)
        };

        let results_list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        let mut list_state = ListState::default();
        if state.highlighted_item().is_some() && visible.contains(&state.highlighted) {
            list_state.select(Some(state.highlighted - visible.start));
        }

        f.render_stateful_widget(results_list, area, &mut list_state);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, state: &TuiState) {
        let status_text = Text::from(vec![Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::raw(state.status_message.as_str()),
            Span::styled(
                format!(" | {} selected", state.snapshot.selection.len()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(" | F1 Help", Style::default().fg(Color::Gray)),
        ])]);

        let status = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

    fn render_help_popup(f: &mut Frame) {
        let popup_area = Self::centered_rect(60, 60, f.size());

        let help_text = Text::from(vec![
            Line::from("Navigation:"),
            Line::from("  ↑/↓ or C-p/C-n - Move highlight"),
            Line::from("  PgUp/PgDn - Move by a screen"),
            Line::from(""),
            Line::from("Selection:"),
            Line::from("  Enter - Toggle highlighted row"),
            Line::from("  C-o - Copy selected names"),
            Line::from("  C-x - Clear selection"),
            Line::from(""),
            Line::from("Editing:"),
            Line::from("  C-a/C-e - Start/End, C-k/C-y - Kill/Yank"),
            Line::from(""),
            Line::from("  Esc / C-c - Quit"),
        ]);

        let help_popup = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help")
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().bg(Color::Black));

        f.render_widget(Clear, popup_area);
        f.render_widget(help_popup, popup_area);
    }

    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{DisplaySnapshot, WidgetMessage};
    use crate::types::{ResultItem, ResultStatus};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &TuiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| TuiRenderer::render(f, state)).unwrap();
        format!("{:?}", terminal.backend().buffer())
    }

    #[test]
    fn test_list_height() {
        assert_eq!(TuiRenderer::list_height(24), 16);
        assert_eq!(TuiRenderer::list_height(4), 0);
    }

    #[test]
    fn test_renders_only_visible_rows() {
        let mut state = TuiState::new(TuiRenderer::list_height(12));
        let snapshot = DisplaySnapshot {
            query: "cat".to_string(),
            rows: (1..=20).map(|i| ResultItem::new(i, format!("Cat{:02}", i))).collect(),
            total: 20,
            status: ResultStatus::Loaded,
            ..DisplaySnapshot::default()
        };
        state.apply_widget_event(WidgetMessage::DisplayUpdated(snapshot));

        let screen = draw(&state, 60, 12);
        assert!(screen.contains("Cat01"));
        assert!(screen.contains("Cat04"));
        assert!(!screen.contains("Cat05"));
        assert!(screen.contains("(20/20)"));
    }

    #[test]
    fn test_renders_loading_placeholder() {
        let mut state = TuiState::new(TuiRenderer::list_height(12));
        let snapshot = DisplaySnapshot {
            query: "cat".to_string(),
            rows: vec![ResultItem::new(1, "Cathy"), ResultItem::loading()],
            loading_placeholder_present: true,
            loading: true,
            total: 5,
            status: ResultStatus::Loaded,
            ..DisplaySnapshot::default()
        };
        state.apply_widget_event(WidgetMessage::DisplayUpdated(snapshot));

        let screen = draw(&state, 60, 12);
        assert!(screen.contains("Cathy"));
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("(1/5)"));
    }

    #[test]
    fn test_renders_selection_marks() {
        let mut state = TuiState::new(TuiRenderer::list_height(12));
        let snapshot = DisplaySnapshot {
            query: "dog".to_string(),
            rows: vec![ResultItem::new(2, "Doggo"), ResultItem::new(3, "Pupper")],
            total: 2,
            status: ResultStatus::Loaded,
            selection: vec![ResultItem::new(2, "Doggo")],
            ..DisplaySnapshot::default()
        };
        state.apply_widget_event(WidgetMessage::DisplayUpdated(snapshot));

        let screen = draw(&state, 60, 12);
        assert!(screen.contains("[x]      2  Doggo"));
        assert!(screen.contains("[ ]      3  Pupper"));
        assert!(screen.contains("1 selected"));
    }

    #[test]
    fn test_input_title_tracks_pending_and_loading() {
        let mut state = TuiState::new(TuiRenderer::list_height(12));
        assert!(!draw(&state, 60, 12).contains("Search - "));

        state.apply_widget_event(WidgetMessage::DisplayUpdated(DisplaySnapshot {
            raw_text: "ca".to_string(),
            pending_commit: true,
            ..DisplaySnapshot::default()
        }));
        assert!(draw(&state, 60, 12).contains("Search - typing"));

        state.apply_widget_event(WidgetMessage::DisplayUpdated(DisplaySnapshot {
            raw_text: "ca".to_string(),
            query: "ca".to_string(),
            loading: true,
            ..DisplaySnapshot::default()
        }));
        assert!(draw(&state, 60, 12).contains("Search - loading"));
    }
}
