//! Byte-level key decoding.
//!
//! This is the only place that interprets terminal input bytes. One call to
//! [`KeyDecoder::decode`] consumes at most one logical key from a [`ByteSource`].

use std::collections::VecDeque;

use crate::error::DecodeError;

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

/// Longest escape sequence accepted before decoding fails.
pub const MAX_SEQUENCE_LEN: usize = 64;

/// Logical key produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any byte without a special meaning, passed through as-is.
    Char(u8),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Delete,
    Esc,
    /// Nothing pending, or a sequence we do not recognise.
    Unknown,
}

impl Key {
    /// The byte for a `Char` key.
    pub fn byte(self) -> Option<u8> {
        match self {
            Key::Char(byte) => Some(byte),
            _ => None,
        }
    }
}

/// Non-blocking source of input bytes. `None` means nothing is pending.
pub trait ByteSource {
    fn read_byte(&mut self) -> Option<u8>;
}

impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

/// Stateful decoder for a non-blocking stream.
///
/// An escape sequence whose terminator has not arrived yet is kept here
/// between calls, so a sequence split across reads still decodes as one key.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of an unfinished escape sequence.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decode one key from `source`.
    ///
    /// A lone ESC (no byte after it) is [`Key::Esc`]. While a sequence is
    /// waiting for its terminator this returns [`Key::Unknown`] and keeps the
    /// bytes. A sequence longer than [`MAX_SEQUENCE_LEN`] is an error.
    pub fn decode<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<Key, DecodeError> {
        if self.pending.is_empty() {
            let Some(byte) = source.read_byte() else {
                return Ok(Key::Unknown);
            };
            match byte {
                b'\n' => return Ok(Key::Enter),
                DEL => return Ok(Key::Backspace),
                ESC => {
                    let Some(second) = source.read_byte() else {
                        return Ok(Key::Esc);
                    };
                    self.pending.push(ESC);
                    self.pending.push(second);
                }
                other => return Ok(Key::Char(other)),
            }
        }

        while !self.pending.last().copied().is_some_and(is_terminator) {
            let Some(next) = source.read_byte() else {
                log::trace!("escape sequence pending {:?}", self.pending);
                return Ok(Key::Unknown);
            };
            if self.pending.len() >= MAX_SEQUENCE_LEN {
                return Err(DecodeError::SequenceTooLong {
                    limit: MAX_SEQUENCE_LEN,
                    prefix: std::mem::take(&mut self.pending),
                });
            }
            self.pending.push(next);
        }

        let sequence = std::mem::take(&mut self.pending);
        Ok(classify_sequence(&sequence))
    }
}

/// Decode one key from a source that already holds complete input.
///
/// A sequence that is still unterminated when `source` runs dry decodes to
/// [`Key::Unknown`] and its bytes are dropped. Streams read across frames
/// should go through a [`KeyDecoder`] instead.
pub fn decode_key<S: ByteSource + ?Sized>(source: &mut S) -> Result<Key, DecodeError> {
    KeyDecoder::new().decode(source)
}

fn is_terminator(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'~'
}

fn classify_sequence(sequence: &[u8]) -> Key {
    match sequence {
        [_, _, b'A'] => Key::Up,
        [_, _, b'B'] => Key::Down,
        [_, _, b'C'] => Key::Right,
        [_, _, b'D'] => Key::Left,
        [_, _, b'3', b'~'] => Key::Delete,
        _ => {
            log::debug!("unrecognised escape sequence {sequence:?}");
            Key::Unknown
        }
    }
}
