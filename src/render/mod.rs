//! Single-line renderer
//!
//! Computes the redraw for the prompt and line buffer. Lines longer than the
//! terminal are shown through a horizontally scrolled window that always
//! contains the cursor.
//!
//! A frame is one write:
//!
//! ```text
//! \r <prompt> <visible text> ESC[K \r ESC[<col>C
//! ```

pub mod ansi;

use std::io::Write;
use std::ops::Range;

use crate::buffer::LineBuffer;

/// A computed redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Bytes to write to the terminal
    pub bytes: Vec<u8>,
    /// Part of the line that is visible
    pub window: Range<usize>,
    /// Number of prompt bytes that fit on screen
    pub prompt_width: usize,
    /// Screen column the cursor ends up on (0-indexed)
    pub cursor_column: usize,
}

impl Frame {
    /// Columns occupied by the prompt and the visible text
    pub fn width(&self) -> usize {
        self.prompt_width + self.window.len()
    }
}

/// Compute the visible window for a line.
///
/// Returns `(prompt_width, window)` such that the cursor column
/// `prompt_width + cursor - window.start` is less than `columns` and
/// `prompt_width + window.len()` is at most `columns`.
pub fn visible_window(prompt_len: usize, buffer: &LineBuffer, columns: usize) -> (usize, Range<usize>) {
    let columns = columns.max(1);
    // The cursor needs one free column after the prompt
    let prompt_width = prompt_len.min(columns - 1);

    let mut left = 0;
    let mut len = buffer.len();
    let mut pos = buffer.cursor();

    // Scroll right until the cursor fits
    while prompt_width + pos >= columns && pos > 0 {
        left += 1;
        len -= 1;
        pos -= 1;
    }
    // Trim what overflows on the right
    while prompt_width + len > columns && len > pos {
        len -= 1;
    }

    (prompt_width, left..left + len)
}

/// Build the frame that redraws `prompt` and `buffer` on a terminal
/// `columns` wide.
pub fn render(prompt: &str, buffer: &LineBuffer, columns: usize) -> Frame {
    let prompt = prompt.as_bytes();
    let (prompt_width, window) = visible_window(prompt.len(), buffer, columns);
    let cursor_column = prompt_width + buffer.cursor() - window.start;

    let mut bytes = Vec::with_capacity(prompt_width + window.len() + 16);
    bytes.push(b'\r');
    bytes.extend_from_slice(&prompt[..prompt_width]);
    bytes.extend_from_slice(&buffer.as_bytes()[window.clone()]);
    bytes.extend_from_slice(ansi::ERASE_TO_END_OF_LINE);
    bytes.push(b'\r');
    // CUF with 0 moves one column on most terminals
    if cursor_column > 0 {
        bytes.extend_from_slice(&ansi::cursor_forward(cursor_column));
    }

    Frame {
        bytes,
        window,
        prompt_width,
        cursor_column,
    }
}

/// Render and write a frame in one write, then flush
pub fn refresh<W: Write>(
    out: &mut W,
    prompt: &str,
    buffer: &LineBuffer,
    columns: usize,
) -> std::io::Result<Frame> {
    let frame = render(prompt, buffer, columns);
    out.write_all(&frame.bytes)?;
    out.flush()?;
    tracing::trace!(
        window = ?frame.window,
        cursor_column = frame.cursor_column,
        "refreshed line"
    );
    Ok(frame)
}
