//! Terminal width probe
//!
//! Discovers the column count of the terminal using only the byte stream,
//! so it works over serial lines and ssh where `TIOCGWINSZ` may lie:
//!
//! 1. Ask for the cursor position (`ESC [ 6 n`) and remember the column.
//! 2. Jump to the right edge (`ESC [ 999 C`) and ask again; that column is
//!    the width.
//! 3. Move back (`ESC [ n D`) to where the cursor started.
//!
//! The probe never reads by itself. The session hands it every input byte
//! until it yields the width. Garbage around the reports is skipped, but the
//! total number of bytes (and optionally the elapsed time) is bounded so a
//! terminal that never answers cannot stall the editor forever.

use std::io::Write;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::render::ansi;

const ESC: u8 = 0x1B;

/// Which report the probe is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Position before jumping to the right edge
    Start,
    /// Position at the right edge
    Edge { saved_column: usize },
    Done,
}

/// Cursor-position-report exchange that yields the terminal width
#[derive(Debug)]
pub struct GeometryProbe {
    stage: Stage,
    /// Bytes of the report currently being collected
    report: Vec<u8>,
    /// Bytes seen since the probe began
    received: usize,
    byte_limit: usize,
    deadline: Option<Instant>,
}

impl GeometryProbe {
    /// Start probing: writes the first position query and flushes.
    ///
    /// The probe fails once more than `byte_limit` bytes arrive without a
    /// usable answer, or once `timeout` has passed.
    pub fn begin<W: Write>(out: &mut W, byte_limit: usize, timeout: Option<Duration>) -> Result<Self> {
        out.write_all(ansi::QUERY_CURSOR_POSITION)?;
        out.flush()?;
        tracing::debug!(byte_limit, ?timeout, "geometry probe started");

        Ok(Self {
            stage: Stage::Start,
            report: Vec::with_capacity(16),
            received: 0,
            byte_limit,
            deadline: timeout.map(|t| Instant::now() + t),
        })
    }

    /// Check if the width has been found
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Feed one input byte.
    ///
    /// Returns `Ok(Some(width))` once the second report arrives.
    pub fn feed<W: Write>(&mut self, byte: u8, out: &mut W) -> Result<Option<usize>> {
        if self.stage == Stage::Done {
            return Ok(None);
        }

        self.received += 1;
        if self.received > self.byte_limit || self.expired() {
            tracing::warn!(received = self.received, "terminal did not answer the position query");
            return Err(Error::ProtocolTimeout {
                received: self.received,
            });
        }

        let Some(column) = self.collect(byte) else {
            return Ok(None);
        };

        match self.stage {
            Stage::Start => {
                tracing::trace!(column, "saved cursor column");
                out.write_all(ansi::CURSOR_TO_RIGHT_EDGE)?;
                out.write_all(ansi::QUERY_CURSOR_POSITION)?;
                out.flush()?;
                self.stage = Stage::Edge {
                    saved_column: column,
                };
                Ok(None)
            },
            Stage::Edge { saved_column } => {
                let width = column;
                if width > saved_column {
                    out.write_all(&ansi::cursor_back(width - saved_column))?;
                    out.flush()?;
                }
                self.stage = Stage::Done;
                tracing::debug!(width, received = self.received, "terminal width probed");
                Ok(Some(width))
            },
            Stage::Done => Ok(None),
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() > d)
    }

    /// Accumulate a report, returning its column once complete
    fn collect(&mut self, byte: u8) -> Option<usize> {
        if byte == ESC {
            // A new report starts; drop whatever was half collected
            self.report.clear();
            self.report.push(byte);
            return None;
        }
        if self.report.is_empty() {
            return None;
        }

        self.report.push(byte);
        if byte != b'R' {
            return None;
        }

        let column = parse_position_report(&self.report).map(|(_, col)| col);
        self.report.clear();
        column
    }
}

/// Parse `ESC [ rows ; cols R` into `(rows, cols)`
pub fn parse_position_report(report: &[u8]) -> Option<(usize, usize)> {
    let body = report.strip_prefix(b"\x1b[")?.strip_suffix(b"R")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}
