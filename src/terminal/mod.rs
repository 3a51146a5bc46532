//! Raw mode handling
//!
//! This module owns the terminal attributes while a line is being read.
//! [`wrap`] is the scoped form: raw mode is taken before the body runs and
//! released after it, whatever the body returns.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::{window_columns, FdWriter, RawTerminal};

use std::io::Write;

use crate::error::{Error, Result};
use crate::render::ansi;

/// Something that can be switched into and out of raw mode.
///
/// Both operations are idempotent: enabling while raw and restoring while
/// cooked are no-ops.
pub trait RawMode {
    /// Enter raw mode, saving the current attributes
    fn enable_raw(&mut self) -> Result<()>;

    /// Put back the attributes saved by `enable_raw`
    fn restore(&mut self) -> Result<()>;

    /// Check if raw mode is currently held
    fn is_raw(&self) -> bool;
}

/// Releases raw mode when dropped, so a panicking body still restores
struct RawScope<'a, C: RawMode> {
    control: &'a mut C,
    released: bool,
}

impl<C: RawMode> RawScope<'_, C> {
    fn release(&mut self) -> Result<()> {
        self.released = true;
        self.control.restore()
    }
}

impl<C: RawMode> Drop for RawScope<'_, C> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.control.restore() {
                tracing::warn!("failed to restore terminal during unwind: {}", e);
            }
        }
    }
}

/// Run `body` with the terminal in raw mode.
///
/// Raw mode is released exactly once after `body` returns, then the
/// erase-line sequence is written to `out`. An error from `body` is returned
/// after that cleanup. If `body` succeeded, a failure to restore the terminal
/// is returned instead; it never prevents the erase-line write.
pub fn wrap<C, W, T, E, F>(control: &mut C, out: &mut W, body: F) -> std::result::Result<T, E>
where
    C: RawMode,
    W: Write,
    F: FnOnce(&mut W) -> std::result::Result<T, E>,
    E: From<Error>,
{
    control.enable_raw()?;

    let mut scope = RawScope {
        control,
        released: false,
    };
    let outcome = body(out);
    let restored = scope.release();
    drop(scope);

    let erased = out
        .write_all(ansi::ERASE_TO_END_OF_LINE)
        .and_then(|()| out.flush());

    let value = outcome?;
    restored?;
    erased.map_err(Error::from)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts transitions instead of touching a real tty
    #[derive(Debug, Default)]
    struct FakeTerminal {
        raw: bool,
        enables: usize,
        restores: usize,
        fail_restore: bool,
        fail_enable: bool,
    }

    impl RawMode for FakeTerminal {
        fn enable_raw(&mut self) -> Result<()> {
            if self.fail_enable {
                return Err(Error::NotATerminal);
            }
            if !self.raw {
                self.raw = true;
                self.enables += 1;
            }
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            if self.raw {
                self.raw = false;
                self.restores += 1;
                if self.fail_restore {
                    return Err(Error::TerminalIo(nix::errno::Errno::EIO));
                }
            }
            Ok(())
        }

        fn is_raw(&self) -> bool {
            self.raw
        }
    }

    #[test]
    fn test_wrap_runs_body_in_raw_mode() {
        let mut term = FakeTerminal::default();
        let mut out = Vec::new();

        let value = wrap(&mut term, &mut out, |out: &mut Vec<u8>| {
            out.extend_from_slice(b"body");
            Ok::<_, Error>(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(term.enables, 1);
        assert_eq!(term.restores, 1);
        assert!(!term.is_raw());
        assert_eq!(out, b"body\x1b[K");
    }

    #[test]
    fn test_wrap_restores_when_body_fails() {
        let mut term = FakeTerminal::default();
        let mut out = Vec::new();

        let result: std::result::Result<(), Error> =
            wrap(&mut term, &mut out, |_| Err(Error::Inactive));

        assert!(matches!(result, Err(Error::Inactive)));
        assert_eq!(term.restores, 1);
        assert!(!term.is_raw());
        assert_eq!(out, b"\x1b[K");
    }

    #[test]
    fn test_wrap_surfaces_restore_failure_after_erasing() {
        let mut term = FakeTerminal {
            fail_restore: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        let result = wrap(&mut term, &mut out, |_| Ok::<_, Error>(()));

        assert!(matches!(result, Err(Error::TerminalIo(_))));
        assert_eq!(out, b"\x1b[K");
    }

    #[test]
    fn test_wrap_prefers_body_error_over_restore_error() {
        let mut term = FakeTerminal {
            fail_restore: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        let result: std::result::Result<(), Error> =
            wrap(&mut term, &mut out, |_| Err(Error::ProtocolTimeout { received: 3 }));

        assert!(matches!(result, Err(Error::ProtocolTimeout { received: 3 })));
        assert_eq!(out, b"\x1b[K");
    }

    #[test]
    fn test_wrap_does_not_run_body_without_raw_mode() {
        let mut term = FakeTerminal {
            fail_enable: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let mut ran = false;

        let result = wrap(&mut term, &mut out, |_| {
            ran = true;
            Ok::<_, Error>(())
        });

        assert!(matches!(result, Err(Error::NotATerminal)));
        assert!(!ran);
        assert!(out.is_empty());
    }

    #[test]
    fn test_wrap_restores_on_panic() {
        let mut term = FakeTerminal::default();
        let mut out = Vec::new();

        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: std::result::Result<(), Error> =
                wrap(&mut term, &mut out, |_| panic!("body blew up"));
        }));

        assert!(caught.is_err());
        assert_eq!(term.restores, 1);
        assert!(!term.is_raw());
    }
}
