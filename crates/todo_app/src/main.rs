#[cfg(not(unix))]
compile_error!("tape-todo drives a POSIX terminal and only builds on unix targets");

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use tape_todo::platform::{install_panic_hook, install_signal_handlers, restore_screen_best_effort};
use tape_todo::{logging, App, EnvConfig, FrameLoop, ProcessTerminal, TerminalGuard};

fn main() -> anyhow::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config).context("failed to open log file")?;
    log::info!("starting with {config:?}");

    let shutdown = Arc::new(AtomicBool::new(false));
    let _signals = install_signal_handlers(Arc::clone(&shutdown))
        .context("failed to install signal handlers")?;

    let guard =
        TerminalGuard::acquire(ProcessTerminal::new()).context("failed to prepare terminal")?;
    let snapshot = guard.terminal().mode_snapshot();
    let _panic_hook = install_panic_hook(move || {
        if let Some(snapshot) = snapshot.as_ref() {
            snapshot.restore();
        }
        restore_screen_best_effort();
    });

    let app = App::new(config.max_entry_len);
    FrameLoop::new(guard, app, config.fps, shutdown)
        .run()
        .context("terminal session failed")?;

    log::info!("clean shutdown");
    Ok(())
}
