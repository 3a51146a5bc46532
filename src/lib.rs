//! Rawline Line Editor Library
//!
//! An embeddable line editor for raw-mode terminals. The caller owns the
//! input loop and feeds the editor one byte at a time; the editor never
//! blocks on a read. This crate provides:
//!
//! - `terminal`: raw mode acquisition and the scoped [`terminal::wrap`]
//! - `buffer`: the line being edited and its cursor
//! - `input`: keystroke decoding into edit commands
//! - `render`: horizontally scrolled single-line redraw
//! - `probe`: terminal width discovery via cursor position reports
//! - `session`: the state machine that ties them together
//!
//! # Example
//!
//! ```no_run
//! use std::io::{self, Read};
//!
//! use rawline::terminal::{self, FdWriter, RawTerminal};
//! use rawline::{Feed, Input, Session};
//!
//! let mut tty = RawTerminal::new(io::stdin());
//! let mut out = FdWriter::new(io::stdout());
//!
//! let feed = terminal::wrap(&mut tty, &mut out, |out| {
//!     let mut session = Session::new(out);
//!     session.start("> ")?;
//!     for byte in io::stdin().lock().bytes() {
//!         match session.feed(Input::Byte(byte?))? {
//!             Feed::Pending => continue,
//!             feed => return Ok(feed),
//!         }
//!     }
//!     session.feed(Input::Eof)
//! })?;
//! println!("{:?}", feed);
//! # Ok::<(), rawline::Error>(())
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod input;
pub mod probe;
pub mod render;
pub mod session;
pub mod terminal;
pub mod trace;

pub use buffer::LineBuffer;
pub use config::EditorConfig;
pub use error::{Error, Result};
pub use input::{EditCommand, InputDecoder};
pub use session::{Feed, Input, PhaseKind, Session};
