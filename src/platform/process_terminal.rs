//! Process-based terminal implementation over the controlling stdin/stdout.

use libc::{self, c_int};

use crate::core::input::ByteSource;
use crate::core::terminal::{TermSize, Terminal};
use crate::error::TerminalError;

fn wait_writable(fd: c_int) -> std::io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            // Infinite timeout should not return 0, but avoid a tight loop if it does.
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(std::io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

/// Write all of `bytes`, retrying on EINTR and waiting out EAGAIN.
///
/// Stdin and stdout usually share one open tty description, so the
/// O_NONBLOCK set for input also applies to output.
fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> std::io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> std::io::Result<usize>,
    FWait: FnMut(c_int) -> std::io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "write returned 0",
                ));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(std::io::Error::other(
                        "write returned more bytes than requested",
                    ));
                }
                written += count;
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {
                continue;
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                wait_writable(fd)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_fd(fd: c_int, bytes: &[u8]) -> std::io::Result<()> {
    write_all_fd_with(
        fd,
        bytes,
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(std::io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

fn read_winsize(fd: c_int) -> std::io::Result<TermSize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(TermSize {
        rows: size.ws_row,
        cols: size.ws_col,
    })
}

fn get_termios(fd: c_int) -> std::io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> std::io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

fn get_fl(fd: c_int) -> std::io::Result<c_int> {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(flags)
}

fn set_fl(fd: c_int, flags: c_int) -> std::io::Result<()> {
    let result = unsafe { libc::fcntl(fd, libc::F_SETFL, flags) };
    if result < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

/// Saved input mode, restorable from a panic hook without touching the
/// terminal object.
#[derive(Clone, Copy)]
pub struct ModeSnapshot {
    fd: c_int,
    termios: libc::termios,
    flags: c_int,
}

impl ModeSnapshot {
    /// Best-effort restore; errors are ignored.
    pub fn restore(&self) {
        let _ = set_termios(self.fd, &self.termios);
        let _ = set_fl(self.fd, self.flags);
    }
}

/// Terminal backed by the process's stdin/stdout.
///
/// `start` clears canonical mode and echo (signals stay enabled so Ctrl-C
/// still raises SIGINT) and makes stdin non-blocking.
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    saved: Option<ModeSnapshot>,
}

impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            saved: None,
        }
    }

    /// The mode saved by `start`, if started.
    pub fn mode_snapshot(&self) -> Option<ModeSnapshot> {
        self.saved
    }

    fn enter_input_mode(&mut self) -> Result<(), TerminalError> {
        let termios =
            get_termios(self.stdin_fd).map_err(|err| TerminalError::io("reading termios", err))?;
        let flags = get_fl(self.stdin_fd)
            .map_err(|err| TerminalError::io("reading stdin flags", err))?;
        let snapshot = ModeSnapshot {
            fd: self.stdin_fd,
            termios,
            flags,
        };

        let mut unbuffered = termios;
        unbuffered.c_lflag &= !(libc::ICANON | libc::ECHO);
        set_termios(self.stdin_fd, &unbuffered)
            .map_err(|err| TerminalError::io("setting termios", err))?;
        if let Err(err) = set_fl(self.stdin_fd, flags | libc::O_NONBLOCK) {
            snapshot.restore();
            return Err(TerminalError::io("setting stdin non-blocking", err));
        }

        self.saved = Some(snapshot);
        Ok(())
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for ProcessTerminal {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        loop {
            let result =
                unsafe { libc::read(self.stdin_fd, &mut byte as *mut u8 as *mut libc::c_void, 1) };
            if result == 1 {
                return Some(byte);
            }
            if result < 0
                && std::io::Error::last_os_error().kind() == std::io::ErrorKind::Interrupted
            {
                continue;
            }
            return None;
        }
    }
}

impl Terminal for ProcessTerminal {
    fn start(&mut self) -> Result<(), TerminalError> {
        if self.saved.is_some() {
            return Ok(());
        }
        self.enter_input_mode()
    }

    fn stop(&mut self) -> Result<(), TerminalError> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };
        // Flush pending input before restoring so buffered keys do not leak to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        set_fl(saved.fd, saved.flags)
            .map_err(|err| TerminalError::io("restoring stdin flags", err))?;
        set_termios(saved.fd, &saved.termios)
            .map_err(|err| TerminalError::io("restoring termios", err))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), TerminalError> {
        if data.is_empty() {
            return Ok(());
        }
        write_fd(self.stdout_fd, data).map_err(|err| TerminalError::io("writing output", err))
    }

    fn size(&self) -> Result<TermSize, TerminalError> {
        read_winsize(self.stdout_fd).map_err(TerminalError::Size)
    }
}
