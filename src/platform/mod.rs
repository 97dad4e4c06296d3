//! Platform-specific terminal integrations.

#[cfg(unix)]
pub mod process_terminal;
pub mod signals;

#[cfg(unix)]
pub use process_terminal::{ModeSnapshot, ProcessTerminal};
#[cfg(unix)]
pub use signals::{install_signal_handlers, restore_screen_best_effort, SignalHookGuard};
pub use signals::{install_panic_hook, PanicHookGuard};
