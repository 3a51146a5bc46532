//! Diagnostic trace output
//!
//! The editor owns the terminal while a line is read, so its tracing events
//! cannot go to stdout or stderr. Setting `RAWLINE_TRACE=<path>` sends them to
//! a file instead, filtered by `RAWLINE_LOG` (an `EnvFilter` directive,
//! `trace` by default).

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Names the trace file
pub const TRACE_FILE_VAR: &str = "RAWLINE_TRACE";

/// Filter directive for the trace file
pub const TRACE_FILTER_VAR: &str = "RAWLINE_LOG";

/// Where trace output should go, if anywhere
pub fn trace_path() -> Option<PathBuf> {
    std::env::var_os(TRACE_FILE_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Install a file subscriber when `RAWLINE_TRACE` is set.
///
/// Returns true if tracing was enabled. Does nothing (and returns false) when
/// the variable is unset, the file cannot be opened, or another global
/// subscriber is already installed.
pub fn init_from_env() -> bool {
    let Some(path) = trace_path() else {
        return false;
    };

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_from_env(TRACE_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("trace"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), "trace output enabled");
    }
    installed
}
