//! Line buffer
//!
//! The text being edited and the cursor position within it. The cursor
//! addresses the gap *before* a byte, so `len()` is a valid position (the
//! end of the line) and the invariant `0 <= cursor <= len` holds after
//! every operation.
//!
//! Every edit is built on two index-based primitives, [`LineBuffer::insert_at`]
//! and [`LineBuffer::remove_at`]. Appending and prepending are just the
//! boundary indices of the same code path. Requests that fall outside the
//! text are no-ops, never errors.

use serde::{Deserialize, Serialize};

/// The line being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBuffer {
    /// Bytes of the line
    text: Vec<u8>,
    /// Cursor position (0..=text.len())
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        let text = text.as_bytes().to_vec();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Raw bytes of the line
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// The line as text (invalid UTF-8 is replaced)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of bytes in the line
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert `byte` at `index`, keeping the cursor on the same character.
    ///
    /// Returns false (and does nothing) if `index > len`.
    pub fn insert_at(&mut self, index: usize, byte: u8) -> bool {
        if index > self.text.len() {
            return false;
        }
        self.text.insert(index, byte);
        if index < self.cursor {
            self.cursor += 1;
        }
        self.check_cursor();
        true
    }

    /// Remove the byte at `index`, keeping the cursor on the same character.
    ///
    /// Returns the removed byte, or `None` if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Option<u8> {
        if index >= self.text.len() {
            return None;
        }
        let byte = self.text.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.check_cursor();
        Some(byte)
    }

    /// Insert a character at the cursor and advance past it
    pub fn insert(&mut self, byte: u8) {
        if self.insert_at(self.cursor, byte) {
            self.cursor += 1;
            self.check_cursor();
        }
    }

    /// Delete the character under the cursor (Delete / Ctrl-D)
    pub fn delete_forward(&mut self) {
        self.remove_at(self.cursor);
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.remove_at(self.cursor - 1);
        }
    }

    /// Truncate the line at the cursor
    pub fn kill_to_end(&mut self) {
        self.text.truncate(self.cursor);
        self.check_cursor();
    }

    /// Empty the line
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Swap the character before the cursor with the one under it.
    ///
    /// Only applies when both exist; the cursor does not move.
    pub fn transpose(&mut self) {
        if self.cursor == 0 || self.cursor >= self.text.len() {
            return;
        }
        self.text.swap(self.cursor - 1, self.cursor);
        self.check_cursor();
    }

    /// Delete the word before the cursor, along with any spaces after it
    pub fn delete_word_backward(&mut self) {
        while self.cursor > 0 && self.text[self.cursor - 1] == b' ' {
            self.backspace();
        }
        while self.cursor > 0 && self.text[self.cursor - 1] != b' ' {
            self.backspace();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    #[inline]
    fn check_cursor(&self) {
        debug_assert!(
            self.cursor <= self.text.len(),
            "cursor {} past end of {}-byte line",
            self.cursor,
            self.text.len()
        );
    }
}
