//! Single-line text entry with horizontal scrolling.

use crate::core::input::Key;
use crate::core::text_buffer::TextBuffer;

/// Default upper bound on the number of bytes an entry may hold.
pub const DEFAULT_MAX_LEN: usize = 256;

/// Result of feeding one key to a [`LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Pending,
    Commit,
    Cancel,
}

/// Editable line: a buffer, a byte cursor and a horizontal scroll offset.
///
/// Invariants: `cursor <= len` and `offset <= cursor < offset + width`.
/// The offset only ever moves by one column per key so the field scrolls
/// smoothly as the cursor leaves it.
#[derive(Debug, Clone)]
pub struct LineEditor {
    text: TextBuffer,
    cursor: usize,
    offset: usize,
    width: usize,
    max_len: usize,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}

impl LineEditor {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: TextBuffer::new(),
            cursor: 0,
            offset: 0,
            width: 1,
            max_len,
        }
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the visible field width. Zero is treated as one column.
    ///
    /// A resize may move the window by more than one column.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(1);
        if self.cursor >= self.offset + self.width {
            self.offset = self.cursor + 1 - self.width;
        } else if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    /// Replace the contents with a copy of `entry`, cursor at the start.
    pub fn load(&mut self, entry: &TextBuffer) {
        self.text.overwrite_from(entry);
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.offset = 0;
    }

    /// Bytes currently inside the field, starting at `offset`.
    pub fn visible(&self) -> &[u8] {
        let bytes = self.text.as_bytes();
        let start = self.offset.min(bytes.len());
        let end = (start + self.width).min(bytes.len());
        &bytes[start..end]
    }

    /// The byte under the cursor, if the cursor is not at the end.
    pub fn byte_at_cursor(&self) -> Option<u8> {
        self.text.as_bytes().get(self.cursor).copied()
    }

    pub fn handle_key(&mut self, key: Key) -> EditOutcome {
        let outcome = match key {
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditOutcome::Pending
            }
            Key::Right => {
                if self.cursor < self.text.len() {
                    self.cursor += 1;
                }
                EditOutcome::Pending
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.text.remove(self.cursor - 1);
                    self.cursor -= 1;
                }
                EditOutcome::Pending
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
                EditOutcome::Pending
            }
            Key::Esc => EditOutcome::Cancel,
            Key::Enter => {
                if self.text.is_blank() {
                    EditOutcome::Cancel
                } else {
                    EditOutcome::Commit
                }
            }
            Key::Char(byte) => {
                if self.text.len() < self.max_len {
                    self.text.insert(self.cursor, byte);
                    self.cursor += 1;
                }
                EditOutcome::Pending
            }
            Key::Up | Key::Down | Key::Unknown => EditOutcome::Pending,
        };
        self.limit_offset();
        outcome
    }

    fn limit_offset(&mut self) {
        if self.cursor >= self.offset + self.width {
            self.offset += 1;
        } else if self.cursor < self.offset {
            self.offset -= 1;
        }
    }
}
