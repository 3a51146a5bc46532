//! Unix raw mode implementation
//!
//! Switches a tty into raw mode with termios and puts it back.

use std::io::{self, IsTerminal, Write};
use std::os::fd::{AsFd, AsRawFd};

use nix::libc;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use super::RawMode;
use crate::error::{Error, Result};

/// A terminal descriptor that can be put into raw mode.
///
/// The attributes in effect before [`RawMode::enable_raw`] are kept and put
/// back by [`RawMode::restore`], or on drop if the caller never restored.
pub struct RawTerminal<F: AsFd> {
    fd: F,
    /// Attributes to restore; `Some` while raw mode is active
    saved: Option<Termios>,
}

impl<F: AsFd> RawTerminal<F> {
    pub fn new(fd: F) -> Self {
        Self { fd, saved: None }
    }

    /// The descriptor being controlled
    pub fn fd(&self) -> &F {
        &self.fd
    }
}

impl<F: AsFd> RawMode for RawTerminal<F> {
    fn enable_raw(&mut self) -> Result<()> {
        if self.saved.is_some() {
            return Ok(());
        }
        if !self.fd.as_fd().is_terminal() {
            return Err(Error::NotATerminal);
        }

        let original = termios::tcgetattr(self.fd.as_fd()).map_err(Error::TerminalIo)?;
        let raw = raw_attributes(&original);

        // Nothing is recorded unless the new attributes were applied
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &raw).map_err(Error::TerminalIo)?;
        self.saved = Some(original);

        tracing::debug!(fd = self.fd.as_fd().as_raw_fd(), "raw mode enabled");
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        let Some(original) = self.saved.take() else {
            return Ok(());
        };

        tracing::debug!(fd = self.fd.as_fd().as_raw_fd(), "restoring terminal attributes");
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &original).map_err(Error::TerminalIo)
    }

    fn is_raw(&self) -> bool {
        self.saved.is_some()
    }
}

impl<F: AsFd> Drop for RawTerminal<F> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("failed to restore terminal on drop: {}", e);
        }
    }
}

impl<F: AsFd> std::fmt::Debug for RawTerminal<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawTerminal")
            .field("fd", &self.fd.as_fd().as_raw_fd())
            .field("raw", &self.saved.is_some())
            .finish()
    }
}

/// Derive raw attributes from `original`
fn raw_attributes(original: &Termios) -> Termios {
    let mut raw = original.clone();

    // No break signal, CR->NL translation, parity check, stripping or XON/XOFF
    raw.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    // No output post-processing
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.control_flags.insert(ControlFlags::CS8);
    // No echo, canonical mode, extended input or signal characters
    raw.local_flags.remove(
        LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
    );

    // Return each byte as soon as it arrives
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

    raw
}

/// Output that writes straight to a file descriptor
#[derive(Debug)]
pub struct FdWriter<F: AsFd> {
    fd: F,
}

impl<F: AsFd> FdWriter<F> {
    pub fn new(fd: F) -> Self {
        Self { fd }
    }
}

impl<F: AsFd> Write for FdWriter<F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        nix::unistd::write(self.fd.as_fd().as_raw_fd(), buf).map_err(io::Error::from)
    }

    /// Writes are unbuffered
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Column count reported by the kernel for a tty, if it knows one
pub fn window_columns<F: AsFd>(fd: F) -> Option<usize> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size
    let result = unsafe { libc::ioctl(fd.as_fd().as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 {
        Some(ws.ws_col as usize)
    } else {
        None
    }
}
