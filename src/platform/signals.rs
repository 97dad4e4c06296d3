//! SIGINT/SIGTERM shutdown flag and panic-time terminal cleanup.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::core::output::TerminalCmd;
use crate::error::TerminalError;

#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Keeps the signal listener thread alive; closing it on drop.
#[cfg(unix)]
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Set `shutdown` when SIGINT or SIGTERM arrives.
///
/// The frame loop polls the flag once per tick, so teardown runs on the main
/// thread through the usual guard drops.
#[cfg(unix)]
pub fn install_signal_handlers(shutdown: Arc<AtomicBool>) -> Result<SignalHookGuard, TerminalError> {
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])
        .map_err(|err| TerminalError::io("registering signal handlers", err))?;
    let handle = signals.handle();

    let thread = thread::Builder::new()
        .name("signal-listener".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                log::info!("received signal {signal}");
                shutdown.store(true, Ordering::SeqCst);
            }
        })
        .map_err(|err| TerminalError::io("spawning signal listener", err))?;

    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}

type PanicHookFn = dyn Fn(&std::panic::PanicHookInfo) + Send + Sync + 'static;

/// Restores the previous panic hook on drop.
pub struct PanicHookGuard {
    previous: Arc<Box<PanicHookFn>>,
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        let _ = std::panic::take_hook();
        let previous = Arc::clone(&self.previous);
        std::panic::set_hook(Box::new(move |info| (previous)(info)));
    }
}

/// Run `cleanup` once on the first panic, then delegate to the previous hook.
///
/// The cleanup runs before the panic message prints, so the message lands
/// on the restored main screen rather than the alternate one.
pub fn install_panic_hook<F>(cleanup: F) -> PanicHookGuard
where
    F: Fn() + Send + Sync + 'static,
{
    let previous: Arc<Box<PanicHookFn>> = Arc::new(std::panic::take_hook());
    let previous_for_hook = Arc::clone(&previous);
    let ran = AtomicBool::new(false);
    std::panic::set_hook(Box::new(move |info| {
        if !ran.swap(true, Ordering::SeqCst) {
            cleanup();
        }
        (previous_for_hook)(info);
    }));
    PanicHookGuard { previous }
}

/// Bytes that undo the screen setup: reset style, show cursor, leave the
/// alternate screen.
pub fn screen_restore_sequence() -> Vec<u8> {
    let mut out = Vec::new();
    for cmd in [
        TerminalCmd::ResetStyle,
        TerminalCmd::ShowCursor,
        TerminalCmd::LeaveAltScreen,
    ] {
        cmd.encode(&mut out);
    }
    out
}

/// Best-effort write of the screen restore sequence to the controlling tty.
///
/// Never blocks and never panics; used from the panic hook only.
#[cfg(unix)]
pub fn restore_screen_best_effort() {
    let flags = libc::O_WRONLY | libc::O_NONBLOCK | libc::O_NOCTTY | libc::O_CLOEXEC;
    let fd = unsafe { libc::open(c"/dev/tty".as_ptr(), flags) };
    if fd < 0 {
        return;
    }
    let bytes = screen_restore_sequence();
    let mut written = 0;
    while written < bytes.len() {
        let remaining = &bytes[written..];
        let result = unsafe {
            libc::write(
                fd,
                remaining.as_ptr() as *const libc::c_void,
                remaining.len(),
            )
        };
        if result > 0 {
            written += result as usize;
            continue;
        }
        if result < 0
            && std::io::Error::last_os_error().kind() == std::io::ErrorKind::Interrupted
        {
            continue;
        }
        break;
    }
    unsafe {
        libc::close(fd);
    }
}
