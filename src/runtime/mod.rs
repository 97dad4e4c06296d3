//! Application state machine and the frame loop that drives it.

pub mod app;
pub mod frame_loop;

pub use app::{App, AppSignal, Mode, Pane};
pub use frame_loop::FrameLoop;
