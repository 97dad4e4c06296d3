#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use tape_todo::{
    App, ByteSource, FrameLoop, TermSize, Terminal, TerminalError, TerminalGuard,
};

#[derive(Default)]
pub struct TerminalTrace {
    pub output: Vec<u8>,
    pub input: VecDeque<u8>,
    pub start_calls: usize,
    pub stop_calls: usize,
    pub size: Option<TermSize>,
}

impl TerminalTrace {
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// In-memory terminal: input is a byte script, output is recorded.
pub struct SharedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
}

impl SharedTerminal {
    pub fn new(cols: u16, rows: u16) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let state = Arc::new(Mutex::new(TerminalTrace {
            size: Some(TermSize { rows, cols }),
            ..TerminalTrace::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl ByteSource for SharedTerminal {
    fn read_byte(&mut self) -> Option<u8> {
        lock_unpoisoned(&self.state).input.pop_front()
    }
}

impl Terminal for SharedTerminal {
    fn start(&mut self) -> Result<(), TerminalError> {
        lock_unpoisoned(&self.state).start_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TerminalError> {
        lock_unpoisoned(&self.state).stop_calls += 1;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), TerminalError> {
        lock_unpoisoned(&self.state).output.extend_from_slice(data);
        Ok(())
    }

    fn size(&self) -> Result<TermSize, TerminalError> {
        lock_unpoisoned(&self.state).size.ok_or_else(|| {
            TerminalError::Size(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "no window size",
            ))
        })
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub fn push_input(state: &Arc<Mutex<TerminalTrace>>, bytes: &[u8]) {
    lock_unpoisoned(state).input.extend(bytes.iter().copied());
}

/// A started frame loop over a `cols`x`rows` scripted terminal.
pub fn frame_loop(
    cols: u16,
    rows: u16,
    app: App,
) -> (
    FrameLoop<SharedTerminal>,
    Arc<Mutex<TerminalTrace>>,
    Arc<AtomicBool>,
) {
    let (terminal, state) = SharedTerminal::new(cols, rows);
    let guard = TerminalGuard::acquire(terminal).expect("acquire scripted terminal");
    let shutdown = Arc::new(AtomicBool::new(false));
    let frames = FrameLoop::new(guard, app, 240, Arc::clone(&shutdown));
    (frames, state, shutdown)
}

/// Feed `bytes` and run frames until the input script is consumed.
pub fn run_script(frames: &mut FrameLoop<SharedTerminal>, state: &Arc<Mutex<TerminalTrace>>, bytes: &[u8]) {
    push_input(state, bytes);
    while !lock_unpoisoned(state).input.is_empty() {
        frames.run_once().expect("frame");
    }
}
