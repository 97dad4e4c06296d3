//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes flow through `OutputGate::flush(..)`.

use std::io::Write;

use crate::core::terminal::Terminal;
use crate::error::TerminalError;

/// Background colour of highlighted cells (white).
pub const HIGHLIGHT_BG: u8 = 47;
/// Foreground colour of highlighted cells (black).
pub const HIGHLIGHT_FG: u8 = 30;

/// Drawing primitives the render adapter is written against.
///
/// Coordinates are 1-based terminal cells.
pub trait Renderer {
    fn position_cursor(&mut self, x: usize, y: usize);
    fn set_highlight(&mut self, bg: u8, fg: u8);
    fn clear_highlight(&mut self);
    fn write_text(&mut self, bytes: &[u8]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Text or raw control bytes.
    Bytes(Vec<u8>),

    /// Absolute cursor move, 1-based.
    MoveTo { x: usize, y: usize },
    /// SGR background/foreground pair.
    Highlight { bg: u8, fg: u8 },
    ResetStyle,

    /// Cursor visibility.
    HideCursor,
    ShowCursor,

    /// Screen buffers.
    EnterAltScreen,
    LeaveAltScreen,
    ClearScreen,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    /// Append the wire encoding of this command to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            TerminalCmd::Bytes(data) => out.extend_from_slice(data),
            TerminalCmd::MoveTo { x, y } => {
                let _ = write!(out, "\x1b[{y};{x}H");
            }
            TerminalCmd::Highlight { bg, fg } => {
                let _ = write!(out, "\x1b[{bg};{fg}m");
            }
            TerminalCmd::ResetStyle => out.extend_from_slice(b"\x1b[0m"),
            TerminalCmd::HideCursor => out.extend_from_slice(b"\x1b[?25l"),
            TerminalCmd::ShowCursor => out.extend_from_slice(b"\x1b[?25h"),
            TerminalCmd::EnterAltScreen => out.extend_from_slice(b"\x1b[?1049h"),
            TerminalCmd::LeaveAltScreen => out.extend_from_slice(b"\x1b[?1049l"),
            TerminalCmd::ClearScreen => out.extend_from_slice(b"\x1b[2J"),
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Encode every buffered command without draining.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for cmd in &self.cmds {
            cmd.encode(&mut out);
        }
        out
    }

    /// Flush buffered commands to the terminal in a single write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else.
    pub fn flush<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<(), TerminalError> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        let out = self.encode();
        self.cmds.clear();
        term.write(&out)
    }
}

impl Renderer for OutputGate {
    fn position_cursor(&mut self, x: usize, y: usize) {
        self.push(TerminalCmd::MoveTo { x, y });
    }

    fn set_highlight(&mut self, bg: u8, fg: u8) {
        self.push(TerminalCmd::Highlight { bg, fg });
    }

    fn clear_highlight(&mut self) {
        self.push(TerminalCmd::ResetStyle);
    }

    fn write_text(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.push(TerminalCmd::bytes(bytes));
        }
    }
}
