//! ANSI escape sequences emitted by the editor

/// Ask the terminal where the cursor is (DSR 6)
pub const QUERY_CURSOR_POSITION: &[u8] = b"\x1b[6n";

/// Erase from the cursor to the end of the line (EL 0)
pub const ERASE_TO_END_OF_LINE: &[u8] = b"\x1b[K";

/// Home the cursor and clear the whole screen
pub const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[2J";

/// Move far enough right to land on the last column of any terminal
pub const CURSOR_TO_RIGHT_EDGE: &[u8] = b"\x1b[999C";

/// Cursor forward `n` columns (CUF)
pub fn cursor_forward(n: usize) -> Vec<u8> {
    format!("\x1b[{}C", n).into_bytes()
}

/// Cursor back `n` columns (CUB)
pub fn cursor_back(n: usize) -> Vec<u8> {
    format!("\x1b[{}D", n).into_bytes()
}
