//! Edit commands
//!
//! Semantic operations produced by the decoder that should be applied to the
//! line buffer.

use serde::{Deserialize, Serialize};

/// A logical editing command resolved from one or more input bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Ctrl-B, `ESC [ D`
    MoveLeft,
    /// Ctrl-F, `ESC [ C`
    MoveRight,
    /// Ctrl-A, `ESC [ H`
    MoveHome,
    /// Ctrl-E, `ESC [ F`
    MoveEnd,
    /// `ESC [ A` - reserved, single-line editing ignores it
    MoveUp,
    /// `ESC [ B` - reserved, single-line editing ignores it
    MoveDown,
    /// A printable byte
    InsertChar(u8),
    /// `ESC [ 3 ~`, or Ctrl-D on a non-empty line
    DeleteForward,
    /// DEL (127) or BS (8)
    Backspace,
    /// Ctrl-K
    KillToEnd,
    /// Ctrl-U
    ClearLine,
    /// Ctrl-T
    Transpose,
    /// Ctrl-W
    DeleteWordBackward,
    /// Ctrl-L
    ClearScreen,
    /// Enter
    Submit,
    /// Ctrl-C
    Interrupt,
    /// Ctrl-D on an empty line
    EndOfInput,
    /// Anything else; discarded
    Unrecognized,
}

impl EditCommand {
    /// Check if this command ends the line being read
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EditCommand::Submit | EditCommand::Interrupt | EditCommand::EndOfInput
        )
    }
}
