//! Fixed-rate frame loop driving the app against a terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::core::input::KeyDecoder;
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::{TermSize, Terminal, TerminalGuard};
use crate::error::RunError;
use crate::render::draw::draw_app;
use crate::render::layout::Layout;
use crate::runtime::app::{App, AppSignal};

/// Owns the terminal guard, the app and the output gate for one session.
pub struct FrameLoop<T: Terminal> {
    guard: TerminalGuard<T>,
    app: App,
    decoder: KeyDecoder,
    gate: OutputGate,
    frame: Duration,
    shutdown: Arc<AtomicBool>,
    last_size: Option<TermSize>,
}

impl<T: Terminal> FrameLoop<T> {
    pub fn new(guard: TerminalGuard<T>, app: App, fps: u32, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            guard,
            app,
            decoder: KeyDecoder::new(),
            gate: OutputGate::new(),
            frame: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            shutdown,
            last_size: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn terminal(&self) -> &T {
        self.guard.terminal()
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        self.guard.terminal_mut()
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Run one frame: size, layout, one key, marquee tick, redraw.
    pub fn run_once(&mut self) -> Result<AppSignal, RunError> {
        if self.shutdown.load(Ordering::SeqCst) {
            log::info!("shutdown signal received");
            return Ok(AppSignal::Quit);
        }

        let size = self.guard.terminal().size()?;
        let layout = Layout::for_size(size);
        self.app.set_viewport(layout.pane_sizes());

        let key = self.decoder.decode(self.guard.terminal_mut())?;
        if self.app.handle_key(key) == AppSignal::Quit {
            return Ok(AppSignal::Quit);
        }
        self.app.tick(self.frame.as_secs_f32());

        if self.last_size != Some(size) {
            log::debug!("terminal size {}x{}", size.cols, size.rows);
            self.gate.push(TerminalCmd::ClearScreen);
            self.last_size = Some(size);
        }
        draw_app(&self.app, &layout, &mut self.gate);
        self.gate.flush(self.guard.terminal_mut())?;
        Ok(AppSignal::Continue)
    }

    /// Run until quit or shutdown. The terminal is restored when `self` drops,
    /// whether this returns `Ok` or an error.
    pub fn run(mut self) -> Result<(), RunError> {
        log::info!("frame loop started at {:?} per frame", self.frame);
        loop {
            match self.run_once() {
                Ok(AppSignal::Quit) => break,
                Ok(AppSignal::Continue) => thread::sleep(self.frame),
                Err(err) => {
                    log::error!("frame loop failed: {err}");
                    return Err(err);
                }
            }
        }
        log::info!("frame loop finished");
        Ok(())
    }
}
