//! Terminal trait and lifecycle guard.

use crate::core::input::ByteSource;
use crate::core::output::{OutputGate, TerminalCmd};
use crate::error::TerminalError;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: u16,
    pub cols: u16,
}

/// Minimal terminal interface for the checklist.
///
/// Input is read one byte at a time through [`ByteSource`] and never blocks.
pub trait Terminal: ByteSource {
    /// Switch to unbuffered, no-echo, non-blocking input.
    fn start(&mut self) -> Result<(), TerminalError>;

    /// Restore the mode saved by `start`.
    fn stop(&mut self) -> Result<(), TerminalError>;

    /// Write raw output bytes.
    fn write(&mut self, data: &[u8]) -> Result<(), TerminalError>;

    /// Current terminal dimensions.
    fn size(&self) -> Result<TermSize, TerminalError>;
}

/// RAII guard owning a started terminal.
///
/// Acquiring enters the alternate screen and hides the cursor; dropping
/// shows the cursor, leaves the alternate screen and restores the input mode.
pub struct TerminalGuard<T: Terminal> {
    terminal: T,
}

impl<T: Terminal> TerminalGuard<T> {
    pub fn acquire(mut terminal: T) -> Result<Self, TerminalError> {
        terminal.start()?;
        let mut gate = OutputGate::new();
        gate.extend([TerminalCmd::EnterAltScreen, TerminalCmd::HideCursor]);
        if let Err(err) = gate.flush(&mut terminal) {
            let _ = terminal.stop();
            return Err(err);
        }
        log::info!("terminal acquired");
        Ok(Self { terminal })
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        let mut gate = OutputGate::new();
        gate.extend([
            TerminalCmd::ResetStyle,
            TerminalCmd::ShowCursor,
            TerminalCmd::LeaveAltScreen,
        ]);
        if let Err(err) = gate.flush(&mut self.terminal) {
            log::warn!("failed to reset screen on release: {err}");
        }
        if let Err(err) = self.terminal.stop() {
            log::error!("failed to restore terminal mode: {err}");
        }
        log::info!("terminal released");
    }
}
