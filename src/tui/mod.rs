//! Interactive terminal front end
//!
//! The terminal loop owns a [`TuiState`] and a [`SearchWidget`]. Key presses
//! become widget input, widget events become new state, and every change is
//! redrawn.

mod input;
mod renderer;
mod state;

pub use input::{map_key_event, InputHandler, InputOperation};
pub use renderer::TuiRenderer;
pub use state::{TuiAction, TuiInput, TuiState};

use crate::config::WidgetConfig;
use crate::fetcher::HttpPageFetcher;
use crate::widget::{SearchWidget, WidgetEvents};
use anyhow::Context;
use arboard::Clipboard;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;

pub async fn run_tui(config: WidgetConfig) -> anyhow::Result<()> {
    let fetcher = HttpPageFetcher::from_config(&config).context("Failed to build HTTP client")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (widget, events) = SearchWidget::spawn(Arc::new(fetcher), &config);
    let list_height = TuiRenderer::list_height(terminal.size()?.height);
    let mut state = TuiState::new(list_height);

    let result = run_app(&mut terminal, &mut state, &widget, events).await;
    widget.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    widget: &SearchWidget,
    mut events: WidgetEvents,
) -> anyhow::Result<()> {
    let mut terminal_events = EventStream::new();

    loop {
        terminal.draw(|f| TuiRenderer::render(f, state))?;

        let actions = tokio::select! {
            maybe_event = terminal_events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match map_key_event(key) {
                        Some(input) => state.handle_input(input),
                        None => Vec::new(),
                    }
                }
                Some(Ok(Event::Resize(_, height))) => {
                    state.handle_input(TuiInput::Resize(TuiRenderer::list_height(height)))
                }
                Some(Ok(_)) => Vec::new(),
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            maybe_message = events.recv() => match maybe_message {
                Some(message) => state.apply_widget_event(message.payload),
                None => break,
            },
        };

        for action in actions {
            perform_action(action, widget, state)?;
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn perform_action(
    action: TuiAction,
    widget: &SearchWidget,
    state: &mut TuiState,
) -> anyhow::Result<()> {
    match action {
        TuiAction::Quit => {}
        TuiAction::RawInput(text) => widget.input(text)?,
        TuiAction::ViewportNear(index) => widget.viewport_near(index)?,
        TuiAction::ToggleSelection(item) => widget.toggle_selection(item)?,
        TuiAction::ClearSelection => widget.clear_selection()?,
        TuiAction::CopyToClipboard { text } => {
            let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
            state.status_message = match copied {
                Ok(()) => format!("Copied {} selected", state.snapshot.selection.len()),
                Err(e) => {
                    log::warn!("Clipboard copy failed: {}", e);
                    format!("Failed to copy: {}", e)
                }
            };
        }
    }
    Ok(())
}
