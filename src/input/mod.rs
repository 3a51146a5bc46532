//! Keyboard input decoding
//!
//! Turns the raw bytes a terminal sends in raw mode into logical edit
//! commands. Only the sequences a single-line editor needs are recognized:
//! the emacs-style control keys, the arrow/home/end CSI sequences and the
//! `ESC [ 3 ~` delete key.

mod command;
mod decoder;

pub use command::EditCommand;
pub use decoder::{DecoderState, InputDecoder};
