//! Ordered entries of one pane with a selection cursor and vertical scroll.

use crate::core::text_buffer::TextBuffer;

/// Entries in insertion order, a selected index and the first visible row.
///
/// Invariant: `cursor < len()` whenever the list is non-empty.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<TextBuffer>,
    cursor: usize,
    scroll: usize,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn get(&self, index: usize) -> Option<&TextBuffer> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextBuffer> {
        self.entries.iter()
    }

    pub fn selected(&self) -> Option<&TextBuffer> {
        self.entries.get(self.cursor)
    }

    pub fn selected_mut(&mut self) -> Option<&mut TextBuffer> {
        self.entries.get_mut(self.cursor)
    }

    /// Append a new entry and select it.
    pub fn add_entry(&mut self, bytes: &[u8]) {
        self.entries.push(TextBuffer::from_bytes(bytes));
        self.cursor = self.entries.len() - 1;
    }

    /// Remove the entry at `index`, re-clamping the cursor.
    ///
    /// Returns `None` when the list is empty.
    ///
    /// # Panics
    /// If the list is non-empty and `index >= len()`.
    pub fn delete_at(&mut self, index: usize) -> Option<TextBuffer> {
        if self.entries.is_empty() {
            return None;
        }
        assert!(
            index < self.entries.len(),
            "entry index {index} out of range for list of length {}",
            self.entries.len()
        );
        let entry = self.entries.remove(index);
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
        Some(entry)
    }

    /// Move the entry at `index` to the end of `other`, where it becomes selected.
    pub fn move_to(&mut self, other: &mut EntryList, index: usize) {
        if let Some(entry) = self.delete_at(index) {
            other.add_entry(entry.as_bytes());
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Keep the selected row inside a window of `height` rows.
    pub fn limit_scroll(&mut self, height: usize) {
        self.reveal(self.cursor, height);
    }

    /// Adjust `scroll` so `row` lies inside a window of `height` rows.
    pub fn reveal(&mut self, row: usize, height: usize) {
        let height = height.max(1);
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }
}
