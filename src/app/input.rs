//! Text-input editing helpers (cursor movement, insertion, deletion).
//!
//! The cursor is a character index into the focused input.  Every edit
//! builds the new text and dispatches it as an [`Update`], so the form never
//! writes to the configuration directly.

use super::App;
use super::agents::Update;
use super::focus::{Focus, Target};

impl App {
    /// Move focus and park the cursor at the end of the new input.
    pub(crate) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor = focus.text(&self.config).map(char_len).unwrap_or(0);
    }

    /// Replace the focused input's text through the reducer.
    fn replace_focused(&mut self, value: String) {
        let update = match self.focus.target() {
            Target::Scalar(field) => Update::set(field, value),
            Target::Entry(field, index) => Update::set_at(field, index, value),
            Target::Button => return,
        };
        self.dispatch(update);
    }

    fn focused_text(&self) -> Option<String> {
        self.focus.text(&self.config).map(str::to_string)
    }

    /// Insert a character at the current cursor position.
    pub(crate) fn insert_char(&mut self, ch: char) {
        let Some(mut value) = self.focused_text() else {
            return;
        };
        let at = byte_index(&value, self.cursor);
        value.insert(at, ch);
        self.cursor += 1;
        self.replace_focused(value);
    }

    /// Delete the character before the cursor.
    pub(crate) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let Some(mut value) = self.focused_text() else {
            return;
        };
        self.cursor -= 1;
        value.remove(byte_index(&value, self.cursor));
        self.replace_focused(value);
    }

    /// Delete the character at the cursor.
    pub(crate) fn delete(&mut self) {
        let Some(mut value) = self.focused_text() else {
            return;
        };
        if self.cursor >= char_len(&value) {
            return;
        }
        value.remove(byte_index(&value, self.cursor));
        self.replace_focused(value);
    }

    /// Move the cursor one position to the left.
    pub(crate) fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor one position to the right.
    pub(crate) fn move_cursor_right(&mut self) {
        let len = self.focused_text().as_deref().map(char_len).unwrap_or(0);
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the beginning of the current line.
    pub(crate) fn move_cursor_home(&mut self) {
        let Some(value) = self.focused_text() else {
            return;
        };
        let (row, _) = line_col(&value, self.cursor);
        self.cursor = index_at(&value, row, 0);
    }

    /// Move the cursor to the end of the current line.
    pub(crate) fn move_cursor_end(&mut self) {
        let Some(value) = self.focused_text() else {
            return;
        };
        let (row, _) = line_col(&value, self.cursor);
        self.cursor = index_at(&value, row, usize::MAX);
    }

    /// Move up a line inside a text area; returns `false` when already on
    /// the first line so the caller can move focus instead.
    pub(crate) fn move_cursor_up(&mut self) -> bool {
        let Some(value) = self.focused_text() else {
            return false;
        };
        let (row, col) = line_col(&value, self.cursor);
        if row == 0 {
            return false;
        }
        self.cursor = index_at(&value, row - 1, col);
        true
    }

    /// Move down a line inside a text area; returns `false` when already on
    /// the last line.
    pub(crate) fn move_cursor_down(&mut self) -> bool {
        let Some(value) = self.focused_text() else {
            return false;
        };
        let (row, col) = line_col(&value, self.cursor);
        if row + 1 >= value.split('\n').count() {
            return false;
        }
        self.cursor = index_at(&value, row + 1, col);
        true
    }
}

// ── Character-index helpers ──────────────────────────────────────────

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `index`-th character, or the end of the string.
fn byte_index(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Zero-based (line, column) of a character index, counting `\n` as a break.
pub(crate) fn line_col(text: &str, index: usize) -> (usize, usize) {
    let mut row = 0;
    let mut col = 0;
    for ch in text.chars().take(index) {
        if ch == '\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (row, col)
}

/// Character index of `(row, col)`, clamping the column to the line length.
fn index_at(text: &str, row: usize, col: usize) -> usize {
    let mut index = 0;
    for (i, line) in text.split('\n').enumerate() {
        let len = char_len(line);
        if i == row {
            return index + col.min(len);
        }
        index += len + 1;
    }
    char_len(text)
}
