//! Log sink construction.
//!
//! stdout carries protocol frames, so logs go to stderr or to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Appended to; created if missing.
    File(PathBuf),
}

/// An explicit log sink. Code run inside [`LogSink::in_scope`] logs through it.
#[derive(Clone)]
pub struct LogSink {
    dispatch: Dispatch,
}

impl LogSink {
    /// `level` is an `EnvFilter` directive such as `debug` or
    /// `sandtimer=trace,info`; an invalid one falls back to `info`.
    pub fn new(level: &str, destination: &LogDestination) -> io::Result<Self> {
        let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("Invalid log level {level:?} ({e}); using {DEFAULT_LOG_LEVEL}");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        });

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let dispatch = match destination {
            LogDestination::Stderr => Dispatch::new(builder.with_writer(io::stderr).finish()),
            LogDestination::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Dispatch::new(
                    builder
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .finish(),
                )
            }
        };
        Ok(Self { dispatch })
    }

    /// A sink that drops every event.
    pub fn discard() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}
