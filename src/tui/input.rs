//! Input handling and operations
//!
//! Emacs-style editing of the search field plus the mapping from crossterm
//! key events to [`TuiInput`]. The cursor is a character index, so editing
//! never splits a multi-byte character.

use super::state::TuiInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text editing operations on the search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOperation {
    InsertChar(char),
    MoveCursorToStart,
    MoveCursorToEnd,
    MoveCursorLeft,
    MoveCursorRight,
    DeleteCharForward,
    DeleteCharBackward,
    KillLine,
    Yank,
}

impl InputOperation {
    /// Whether applying this operation can change the text
    pub fn edits_text(&self) -> bool {
        matches!(
            self,
            InputOperation::InsertChar(_)
                | InputOperation::DeleteCharForward
                | InputOperation::DeleteCharBackward
                | InputOperation::KillLine
                | InputOperation::Yank
        )
    }
}

/// Input handler for managing text editing state
pub struct InputHandler;

impl InputHandler {
    /// Apply an input operation to the given text and cursor state
    pub fn apply_operation(
        operation: InputOperation,
        text: &mut String,
        cursor_position: &mut usize,
        kill_ring: &mut String,
    ) {
        let char_count = text.chars().count();
        *cursor_position = (*cursor_position).min(char_count);

        match operation {
            InputOperation::InsertChar(c) => {
                text.insert(byte_offset(text, *cursor_position), c);
                *cursor_position += 1;
            }
            InputOperation::MoveCursorToStart => {
                *cursor_position = 0;
            }
            InputOperation::MoveCursorToEnd => {
                *cursor_position = char_count;
            }
            InputOperation::MoveCursorLeft => {
                *cursor_position = cursor_position.saturating_sub(1);
            }
            InputOperation::MoveCursorRight => {
                if *cursor_position < char_count {
                    *cursor_position += 1;
                }
            }
            InputOperation::DeleteCharForward => {
                if *cursor_position < char_count {
                    text.remove(byte_offset(text, *cursor_position));
                }
            }
            InputOperation::DeleteCharBackward => {
                if *cursor_position > 0 {
                    *cursor_position -= 1;
                    text.remove(byte_offset(text, *cursor_position));
                }
            }
            InputOperation::KillLine => {
                if *cursor_position < char_count {
                    let at = byte_offset(text, *cursor_position);
                    *kill_ring = text[at..].to_string();
                    text.truncate(at);
                }
            }
            InputOperation::Yank => {
                if !kill_ring.is_empty() {
                    text.insert_str(byte_offset(text, *cursor_position), kill_ring);
                    *cursor_position += kill_ring.chars().count();
                }
            }
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Translate a key press into a TUI input, if it is bound
pub fn map_key_event(key: KeyEvent) -> Option<TuiInput> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let input = match key.code {
        KeyCode::Esc => TuiInput::Quit,
        KeyCode::Char('c') if ctrl => TuiInput::Quit,

        KeyCode::Up => TuiInput::NavigateUp,
        KeyCode::Char('p') if ctrl => TuiInput::NavigateUp,
        KeyCode::Down => TuiInput::NavigateDown,
        KeyCode::Char('n') if ctrl => TuiInput::NavigateDown,
        KeyCode::PageUp => TuiInput::PageUp,
        KeyCode::PageDown => TuiInput::PageDown,

        KeyCode::Enter => TuiInput::ToggleSelection,
        KeyCode::Char('o') if ctrl => TuiInput::CopySelection,
        KeyCode::Char('x') if ctrl => TuiInput::ClearSelection,
        KeyCode::F(1) => TuiInput::ToggleHelp,

        KeyCode::Char('a') if ctrl => TuiInput::Edit(InputOperation::MoveCursorToStart),
        KeyCode::Char('e') if ctrl => TuiInput::Edit(InputOperation::MoveCursorToEnd),
        KeyCode::Char('b') if ctrl => TuiInput::Edit(InputOperation::MoveCursorLeft),
        KeyCode::Char('f') if ctrl => TuiInput::Edit(InputOperation::MoveCursorRight),
        KeyCode::Char('d') if ctrl => TuiInput::Edit(InputOperation::DeleteCharForward),
        KeyCode::Char('h') if ctrl => TuiInput::Edit(InputOperation::DeleteCharBackward),
        KeyCode::Char('k') if ctrl => TuiInput::Edit(InputOperation::KillLine),
        KeyCode::Char('y') if ctrl => TuiInput::Edit(InputOperation::Yank),
        KeyCode::Char(_) if ctrl => return None,

        KeyCode::Home => TuiInput::Edit(InputOperation::MoveCursorToStart),
        KeyCode::End => TuiInput::Edit(InputOperation::MoveCursorToEnd),
        KeyCode::Left => TuiInput::Edit(InputOperation::MoveCursorLeft),
        KeyCode::Right => TuiInput::Edit(InputOperation::MoveCursorRight),
        KeyCode::Delete => TuiInput::Edit(InputOperation::DeleteCharForward),
        KeyCode::Backspace => TuiInput::Edit(InputOperation::DeleteCharBackward),
        KeyCode::Char(c) => TuiInput::Edit(InputOperation::InsertChar(c)),
        _ => return None,
    };

    Some(input)
}
