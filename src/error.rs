//! Error types for the fallible boundaries: terminal I/O and input decoding.

use thiserror::Error;

/// Terminal driver failure. Always fatal for the running session.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal I/O error while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("could not get terminal size: {0}")]
    Size(#[source] std::io::Error),
}

impl TerminalError {
    #[must_use]
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    #[must_use]
    pub fn last_os_error(operation: &'static str) -> Self {
        Self::io(operation, std::io::Error::last_os_error())
    }
}

/// Malformed input that the decoder refuses to recover from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("escape sequence exceeds {limit} bytes without a terminator: {prefix:?}")]
    SequenceTooLong { limit: usize, prefix: Vec<u8> },
}

/// Any error that ends the frame loop.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
