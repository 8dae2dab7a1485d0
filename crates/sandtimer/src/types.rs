//! Timer commands and client errors.

use std::io;
use std::net::SocketAddr;

use crate::json::{SerializeError, Value};
use crate::object;

/// A command understood by the sandtimer display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start (or restart) a countdown.
    Start { label: String, seconds: u32 },
    /// Reset a countdown to its original duration.
    Reset { label: String },
    /// Close the timer window.
    Cancel { label: String },
}

impl TimerCommand {
    /// Wire name sent in the `cmd` field.
    pub fn name(&self) -> &'static str {
        match self {
            TimerCommand::Start { .. } => "start",
            TimerCommand::Reset { .. } => "reset",
            TimerCommand::Cancel { .. } => "cancel",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TimerCommand::Start { label, .. }
            | TimerCommand::Reset { label }
            | TimerCommand::Cancel { label } => label,
        }
    }

    /// `{"cmd": ..., "label": ..., "time": ...}`; `time` only for `start`.
    pub fn to_value(&self) -> Value {
        match self {
            TimerCommand::Start { label, seconds } => object! {
                "cmd" => self.name(),
                "label" => label.as_str(),
                "time" => *seconds,
            },
            TimerCommand::Reset { label } | TimerCommand::Cancel { label } => object! {
                "cmd" => self.name(),
                "label" => label.as_str(),
            },
        }
    }
}

/// Errors raised while delivering a command to the sandtimer.
#[derive(thiserror::Error, Debug)]
pub enum TimerError {
    #[error("Failed to encode timer command: {0}")]
    Encode(#[from] SerializeError),

    #[error("Failed to resolve {host}: {source}")]
    Resolve { host: String, source: io::Error },

    #[error("No addresses found for {host}")]
    NoAddresses { host: String },

    #[error("Failed to connect to sandtimer at {addr}: {source}")]
    Connect { addr: SocketAddr, source: io::Error },

    #[error("Failed to send payload to {addr}: {source}")]
    Send { addr: SocketAddr, source: io::Error },
}

/// Convenience result type.
pub type TimerResult<T> = Result<T, TimerError>;
