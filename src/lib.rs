//! Two-pane TODO/DONE terminal checklist.
//!
//! Invariant: single output gate — only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - [`App`] turns decoded [`Key`]s into list and editor mutations.
//! - [`KeyDecoder`] reads one logical key per frame from a non-blocking [`ByteSource`].
//! - [`draw_app`] renders the state through any [`Renderer`].
//! - [`FrameLoop`] ties a [`Terminal`] to the app at a fixed frame rate.

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

/// Text storage and list model.
pub use crate::core::entry_list::EntryList;
pub use crate::core::line_editor::{EditOutcome, LineEditor};
pub use crate::core::text_buffer::TextBuffer;

/// Input decoding.
pub use crate::core::input::{decode_key, ByteSource, Key, KeyDecoder};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::output::{OutputGate, Renderer, TerminalCmd};
pub use crate::core::terminal::{TermSize, Terminal, TerminalGuard};
#[cfg(unix)]
pub use crate::platform::ProcessTerminal;

/// Rendering and runtime.
pub use crate::render::{draw_app, Layout, PaneSize, Rect};
pub use crate::runtime::{App, AppSignal, FrameLoop, Mode, Pane};

pub use crate::config::EnvConfig;
pub use crate::error::{DecodeError, RunError, TerminalError};
