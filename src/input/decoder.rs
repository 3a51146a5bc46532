//! Input decoder state machine
//!
//! Resolves raw keyboard bytes into [`EditCommand`]s one byte at a time.
//! Multi-byte escape sequences may be split across any number of calls: the
//! partial sequence is kept in [`DecoderState`] until it resolves.
//!
//! States:
//! - Normal: control bytes and printable bytes resolve immediately
//! - SawEscape: after ESC, waiting for `[`
//! - SawBracket: after `ESC [`, waiting for a final letter or a digit
//! - SawBracketDigit: after `ESC [ <digit>`, waiting for `~`
//!
//! Malformed sequences are never errors. They resolve to
//! [`EditCommand::Unrecognized`] and the decoder is back in `Normal`.

use super::command::EditCommand;

const CTRL_A: u8 = 0x01;
const CTRL_B: u8 = 0x02;
const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;
const CTRL_E: u8 = 0x05;
const CTRL_F: u8 = 0x06;
const BACKSPACE: u8 = 0x08;
const CTRL_K: u8 = 0x0B;
const CTRL_L: u8 = 0x0C;
const ENTER: u8 = 0x0D;
const CTRL_T: u8 = 0x14;
const CTRL_U: u8 = 0x15;
const CTRL_W: u8 = 0x17;
const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

/// Progress through a possibly multi-byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Normal,
    SawEscape,
    SawBracket,
    /// Holds the digit of an extended `ESC [ n ~` code
    SawBracketDigit(u8),
}

/// Byte-at-a-time keyboard decoder
#[derive(Debug, Default)]
pub struct InputDecoder {
    state: DecoderState,
    /// Bytes of the sequence collected so far
    pending: Vec<u8>,
}

impl InputDecoder {
    /// Create a decoder in the normal state
    pub fn new() -> Self {
        Self {
            state: DecoderState::Normal,
            pending: Vec::with_capacity(4),
        }
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.state = DecoderState::Normal;
        self.pending.clear();
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Bytes of the unresolved sequence, if any
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Feed one byte.
    ///
    /// `line_empty` tells the decoder whether the line is currently empty,
    /// which decides what Ctrl-D means. Returns `None` while an escape
    /// sequence is still incomplete.
    pub fn decode(&mut self, byte: u8, line_empty: bool) -> Option<EditCommand> {
        let command = match self.state {
            DecoderState::Normal => self.decode_normal(byte, line_empty),
            DecoderState::SawEscape => self.decode_escape(byte),
            DecoderState::SawBracket => self.decode_bracket(byte),
            DecoderState::SawBracketDigit(digit) => self.decode_extended(digit, byte),
        };

        match command {
            Some(command) => {
                if !self.pending.is_empty() {
                    tracing::trace!(sequence = ?self.pending, ?command, "escape sequence resolved");
                }
                self.reset();
                Some(command)
            },
            None => {
                self.pending.push(byte);
                None
            },
        }
    }

    fn decode_normal(&mut self, byte: u8, line_empty: bool) -> Option<EditCommand> {
        let command = match byte {
            CTRL_A => EditCommand::MoveHome,
            CTRL_B => EditCommand::MoveLeft,
            CTRL_C => EditCommand::Interrupt,
            CTRL_D if line_empty => EditCommand::EndOfInput,
            CTRL_D => EditCommand::DeleteForward,
            CTRL_E => EditCommand::MoveEnd,
            CTRL_F => EditCommand::MoveRight,
            CTRL_K => EditCommand::KillToEnd,
            CTRL_L => EditCommand::ClearScreen,
            CTRL_T => EditCommand::Transpose,
            CTRL_U => EditCommand::ClearLine,
            CTRL_W => EditCommand::DeleteWordBackward,
            BACKSPACE | DEL => EditCommand::Backspace,
            ENTER => EditCommand::Submit,
            ESC => {
                self.state = DecoderState::SawEscape;
                return None;
            },
            0x20.. => EditCommand::InsertChar(byte),
            _ => EditCommand::Unrecognized,
        };
        Some(command)
    }

    fn decode_escape(&mut self, byte: u8) -> Option<EditCommand> {
        if byte == b'[' {
            self.state = DecoderState::SawBracket;
            None
        } else {
            Some(EditCommand::Unrecognized)
        }
    }

    fn decode_bracket(&mut self, byte: u8) -> Option<EditCommand> {
        let command = match byte {
            b'A' => EditCommand::MoveUp,
            b'B' => EditCommand::MoveDown,
            b'C' => EditCommand::MoveRight,
            b'D' => EditCommand::MoveLeft,
            b'H' => EditCommand::MoveHome,
            b'F' => EditCommand::MoveEnd,
            b'0'..=b'9' => {
                self.state = DecoderState::SawBracketDigit(byte);
                return None;
            },
            _ => EditCommand::Unrecognized,
        };
        Some(command)
    }

    fn decode_extended(&mut self, digit: u8, byte: u8) -> Option<EditCommand> {
        let command = match (digit, byte) {
            (b'3', b'~') => EditCommand::DeleteForward,
            _ => EditCommand::Unrecognized,
        };
        Some(command)
    }
}
