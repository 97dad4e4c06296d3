//! Growable byte buffer backing list entries and the line editor.
//!
//! Capacity is tracked explicitly so growth follows a fixed policy: start at
//! [`INITIAL_CAPACITY`] and double whenever an insert would overflow.

use std::fmt;

/// Capacity of the first allocation.
pub const INITIAL_CAPACITY: usize = 8;

/// Owned, growable sequence of bytes.
///
/// Invariant: `len() <= capacity()`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    items: Vec<u8>,
    capacity: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.append_many(bytes);
        buffer
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.items
    }

    /// Lossy UTF-8 view, for logging and tests.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.items).into_owned()
    }

    /// True when the buffer is empty or holds only whitespace, vertical tab
    /// included.
    pub fn is_blank(&self) -> bool {
        self.items
            .iter()
            .all(|&byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r'))
    }

    pub fn append(&mut self, byte: u8) {
        self.reserve_for(1);
        self.items.push(byte);
    }

    pub fn append_many(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.reserve_for(bytes.len());
        self.items.extend_from_slice(bytes);
    }

    /// Insert `byte` before position `index`, shifting the tail right.
    ///
    /// # Panics
    /// If `index > len()`.
    pub fn insert(&mut self, index: usize, byte: u8) {
        assert!(
            index <= self.items.len(),
            "insert index {index} out of range for buffer of length {}",
            self.items.len()
        );
        self.reserve_for(1);
        self.items.insert(index, byte);
    }

    /// Remove and return the byte at `index`, shifting the tail left.
    ///
    /// # Panics
    /// If `index >= len()`.
    pub fn remove(&mut self, index: usize) -> u8 {
        assert!(
            index < self.items.len(),
            "remove index {index} out of range for buffer of length {}",
            self.items.len()
        );
        self.items.remove(index)
    }

    /// Replace contents and capacity with a fresh copy of `other`.
    ///
    /// The previous storage is released, never reused.
    pub fn overwrite_from(&mut self, other: &TextBuffer) {
        let mut items = Vec::with_capacity(other.capacity);
        items.extend_from_slice(&other.items);
        self.items = items;
        self.capacity = other.capacity;
    }

    /// Drop the contents but keep the storage.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn reserve_for(&mut self, additional: usize) {
        let needed = self.items.len() + additional;
        if needed <= self.capacity {
            return;
        }
        let mut next = if self.capacity == 0 {
            INITIAL_CAPACITY
        } else {
            self.capacity * 2
        };
        while next < needed {
            next *= 2;
        }
        self.items.reserve_exact(next - self.items.len());
        self.capacity = next;
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.to_string_lossy())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}
