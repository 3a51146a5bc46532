//! Error types for line editing

use std::io;

use thiserror::Error;

/// Line editor error type
#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor handed to the raw-mode controller is not interactive
    #[error("Descriptor is not a terminal")]
    NotATerminal,

    /// Reading or applying terminal attributes failed
    #[error("Failed to update terminal attributes: {0}")]
    TerminalIo(#[source] nix::Error),

    /// The terminal never answered the cursor position query
    #[error("No cursor position report after {received} bytes")]
    ProtocolTimeout { received: usize },

    /// `feed` was called with no line being read
    #[error("No active session; call start() first")]
    Inactive,

    /// Writing to the output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// The underlying system error code, if this error carries one
    pub fn errno(&self) -> Option<i32> {
        match self {
            Error::TerminalIo(errno) => Some(*errno as i32),
            Error::Io(err) => err.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for line editor operations
pub type Result<T> = std::result::Result<T, Error>;
