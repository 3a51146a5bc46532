//! Line editing session
//!
//! [`Session`] ties the pieces together. The caller reads input however it
//! likes and hands it over one byte at a time through [`Session::feed`];
//! every call does a bounded amount of work and returns.
//!
//! # Phases
//!
//! ```text
//! Idle -> ProbingGeometry -> Editing -> Done | Interrupted | EndOfInput
//! ```
//!
//! While probing, input bytes are the terminal's answers to the width
//! queries. Once the width is known the prompt is drawn and bytes are
//! decoded as keystrokes.

use std::io::Write;

use crate::buffer::LineBuffer;
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::input::{EditCommand, InputDecoder};
use crate::probe::GeometryProbe;
use crate::render::{self, ansi};

/// One unit of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Byte(u8),
    /// The input stream ended
    Eof,
}

impl From<u8> for Input {
    fn from(byte: u8) -> Self {
        Input::Byte(byte)
    }
}

/// Result of feeding one unit of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// The line is not finished yet
    Pending,
    /// Enter was pressed
    Done(String),
    /// Ctrl-C was pressed; carries the partial line
    Interrupted(String),
    /// Ctrl-D on an empty line, or the input stream ended
    EndOfInput,
}

/// Where the session is in reading a line
#[derive(Debug)]
enum Phase {
    Idle,
    ProbingGeometry(GeometryProbe),
    Editing,
    Done,
    Interrupted,
    EndOfInput,
}

/// Phase without the probe state, for callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    ProbingGeometry,
    Editing,
    Done,
    Interrupted,
    EndOfInput,
}

/// An interactive line editor writing to `W`
#[derive(Debug)]
pub struct Session<W: Write> {
    out: W,
    config: EditorConfig,
    prompt: String,
    buffer: LineBuffer,
    /// Terminal width; unknown until probed
    columns: Option<usize>,
    decoder: InputDecoder,
    phase: Phase,
}

impl<W: Write> Session<W> {
    /// Create a session writing to `out` with the default configuration
    pub fn new(out: W) -> Self {
        Self::with_config(out, EditorConfig::default())
    }

    pub fn with_config(out: W, config: EditorConfig) -> Self {
        Self {
            out,
            config,
            prompt: String::new(),
            buffer: LineBuffer::new(),
            columns: None,
            decoder: InputDecoder::new(),
            phase: Phase::Idle,
        }
    }

    /// Begin reading a line: resets the buffer and starts the width probe
    pub fn start(&mut self, prompt: &str) -> Result<()> {
        self.reset(prompt);
        let probe = GeometryProbe::begin(
            &mut self.out,
            self.config.probe_byte_limit,
            self.config.probe_timeout(),
        )?;
        self.phase = Phase::ProbingGeometry(probe);
        tracing::debug!(prompt, "session started");
        Ok(())
    }

    /// Begin reading a line on a terminal whose width is already known
    pub fn start_with_columns(&mut self, prompt: &str, columns: usize) -> Result<()> {
        self.reset(prompt);
        self.begin_editing(columns)?;
        tracing::debug!(prompt, columns, "session started with known width");
        Ok(())
    }

    /// Feed one byte (or end of input) to the session
    pub fn feed(&mut self, input: impl Into<Input>) -> Result<Feed> {
        let byte = match input.into() {
            Input::Byte(byte) => byte,
            Input::Eof if self.is_active() => {
                return Ok(self.finish(Phase::EndOfInput, Feed::EndOfInput));
            },
            Input::Eof => return Err(Error::Inactive),
        };

        match &mut self.phase {
            Phase::ProbingGeometry(probe) => match probe.feed(byte, &mut self.out) {
                Ok(Some(columns)) => {
                    self.begin_editing(columns)?;
                    Ok(Feed::Pending)
                },
                Ok(None) => Ok(Feed::Pending),
                Err(e) => {
                    self.phase = Phase::Idle;
                    Err(e)
                },
            },
            Phase::Editing => self.edit(byte),
            Phase::Idle | Phase::Done | Phase::Interrupted | Phase::EndOfInput => Err(Error::Inactive),
        }
    }

    /// Apply a command to the line and redraw.
    ///
    /// Commands normally come from [`Session::feed`]; this is public so
    /// callers can bind their own keys.
    pub fn apply(&mut self, command: EditCommand) -> Result<Feed> {
        if !matches!(self.phase, Phase::Editing) {
            return Err(Error::Inactive);
        }

        match command {
            EditCommand::Submit => {
                let line = self.buffer.text();
                return Ok(self.finish(Phase::Done, Feed::Done(line)));
            },
            EditCommand::Interrupt => {
                let line = self.buffer.text();
                return Ok(self.finish(Phase::Interrupted, Feed::Interrupted(line)));
            },
            EditCommand::EndOfInput => {
                return Ok(self.finish(Phase::EndOfInput, Feed::EndOfInput));
            },
            EditCommand::MoveLeft => self.buffer.move_left(),
            EditCommand::MoveRight => self.buffer.move_right(),
            EditCommand::MoveHome => self.buffer.move_home(),
            EditCommand::MoveEnd => self.buffer.move_end(),
            EditCommand::InsertChar(byte) => self.buffer.insert(byte),
            EditCommand::DeleteForward => self.buffer.delete_forward(),
            EditCommand::Backspace => self.buffer.backspace(),
            EditCommand::KillToEnd => self.buffer.kill_to_end(),
            EditCommand::ClearLine => self.buffer.clear(),
            EditCommand::Transpose => self.buffer.transpose(),
            EditCommand::DeleteWordBackward => self.buffer.delete_word_backward(),
            EditCommand::ClearScreen => self.out.write_all(ansi::CLEAR_SCREEN)?,
            // No history or multi-line support
            EditCommand::MoveUp | EditCommand::MoveDown | EditCommand::Unrecognized => {},
        }

        self.refresh()?;
        Ok(Feed::Pending)
    }

    /// Redraw the prompt and line
    pub fn refresh(&mut self) -> Result<()> {
        let columns = self.columns.ok_or(Error::Inactive)?;
        render::refresh(&mut self.out, &self.prompt, &self.buffer, columns)?;
        Ok(())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Terminal width, once known
    pub fn columns(&self) -> Option<usize> {
        self.columns
    }

    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Idle => PhaseKind::Idle,
            Phase::ProbingGeometry(_) => PhaseKind::ProbingGeometry,
            Phase::Editing => PhaseKind::Editing,
            Phase::Done => PhaseKind::Done,
            Phase::Interrupted => PhaseKind::Interrupted,
            Phase::EndOfInput => PhaseKind::EndOfInput,
        }
    }

    /// Check if a line is being read
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::ProbingGeometry(_) | Phase::Editing)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consume the session, returning the output
    pub fn into_output(self) -> W {
        self.out
    }

    fn reset(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.buffer.clear();
        self.columns = None;
        self.decoder.reset();
        self.phase = Phase::Idle;
    }

    fn begin_editing(&mut self, columns: usize) -> Result<()> {
        self.columns = Some(columns);
        self.phase = Phase::Editing;
        self.refresh()
    }

    fn edit(&mut self, byte: u8) -> Result<Feed> {
        match self.decoder.decode(byte, self.buffer.is_empty()) {
            Some(command) => {
                tracing::trace!(byte, ?command, "decoded");
                self.apply(command)
            },
            None => Ok(Feed::Pending),
        }
    }

    fn finish(&mut self, phase: Phase, feed: Feed) -> Feed {
        tracing::debug!(?phase, "session finished");
        self.phase = phase;
        self.decoder.reset();
        feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing_session(columns: usize) -> Session<Vec<u8>> {
        let mut session = Session::new(Vec::new());
        session.start_with_columns("> ", columns).unwrap();
        session.output_mut().clear();
        session
    }

    fn feed_bytes(session: &mut Session<Vec<u8>>, data: &[u8]) -> Feed {
        let mut last = Feed::Pending;
        for &b in data {
            last = session.feed(b).unwrap();
            if last != Feed::Pending {
                break;
            }
        }
        last
    }

    #[test]
    fn test_start_writes_position_query() {
        let mut session = Session::new(Vec::new());
        session.start("> ").unwrap();

        assert_eq!(session.phase(), PhaseKind::ProbingGeometry);
        assert_eq!(session.columns(), None);
        assert_eq!(session.output().as_slice(), b"\x1b[6n");
    }

    #[test]
    fn test_probe_then_prompt() {
        let mut session = Session::new(Vec::new());
        session.start("> ").unwrap();

        assert_eq!(feed_bytes(&mut session, b"\x1b[3;1R"), Feed::Pending);
        assert_eq!(session.phase(), PhaseKind::ProbingGeometry);
        assert_eq!(feed_bytes(&mut session, b"\x1b[3;80R"), Feed::Pending);

        assert_eq!(session.phase(), PhaseKind::Editing);
        assert_eq!(session.columns(), Some(80));
        assert!(session.output().ends_with(b"\r> \x1b[K\r\x1b[2C"));
    }

    #[test]
    fn test_insert_renders() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"a");
        assert_eq!(session.output().as_slice(), b"\r> a\x1b[K\r\x1b[3C");
    }

    #[test]
    fn test_submit_does_not_render() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"ok");
        session.output_mut().clear();

        assert_eq!(session.feed(b'\r').unwrap(), Feed::Done("ok".to_string()));
        assert!(session.output().is_empty());
        assert_eq!(session.phase(), PhaseKind::Done);
    }

    #[test]
    fn test_clear_screen() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"x\x0c");
        assert!(session
            .output()
            .windows(ansi::CLEAR_SCREEN.len())
            .any(|w| w == ansi::CLEAR_SCREEN));
        assert_eq!(session.buffer().text(), "x");
    }

    #[test]
    fn test_eof_ends_session() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"abc");
        assert_eq!(session.feed(Input::Eof).unwrap(), Feed::EndOfInput);
        assert_eq!(session.phase(), PhaseKind::EndOfInput);
    }

    #[test]
    fn test_eof_while_probing() {
        let mut session = Session::new(Vec::new());
        session.start("> ").unwrap();
        assert_eq!(session.feed(Input::Eof).unwrap(), Feed::EndOfInput);
        assert!(!session.is_active());
    }

    #[test]
    fn test_feed_without_start_is_rejected() {
        let mut session = Session::new(Vec::new());
        assert!(matches!(session.feed(b'a'), Err(Error::Inactive)));
    }

    #[test]
    fn test_feed_after_done_is_rejected() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"\r");
        assert!(matches!(session.feed(b'a'), Err(Error::Inactive)));
        assert!(matches!(session.apply(EditCommand::MoveLeft), Err(Error::Inactive)));
    }

    #[test]
    fn test_probe_failure_returns_to_idle() {
        let config = EditorConfig {
            probe_byte_limit: 4,
            probe_timeout_ms: 0,
        };
        let mut session = Session::with_config(Vec::new(), config);
        session.start("> ").unwrap();

        for &b in b"abcd" {
            assert_eq!(session.feed(b).unwrap(), Feed::Pending);
        }
        assert!(matches!(
            session.feed(b'e'),
            Err(Error::ProtocolTimeout { received: 5 })
        ));
        assert_eq!(session.phase(), PhaseKind::Idle);
    }

    #[test]
    fn test_restart_resets_line() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"old\x1b[");
        session.start_with_columns("$ ", 40).unwrap();

        assert!(session.buffer().is_empty());
        assert_eq!(session.prompt(), "$ ");
        // The half-read escape sequence was dropped with the old line
        assert_eq!(feed_bytes(&mut session, b"C"), Feed::Pending);
        assert_eq!(session.buffer().text(), "C");
    }

    #[test]
    fn test_reserved_vertical_moves_are_ignored() {
        let mut session = editing_session(80);
        feed_bytes(&mut session, b"ab\x1b[A\x1b[B");
        assert_eq!(session.buffer().text(), "ab");
        assert_eq!(session.buffer().cursor(), 2);
    }
}
