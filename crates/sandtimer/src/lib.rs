//! Sandtimer: a small JSON toolkit plus a TCP client for the sandtimer display.

pub mod client;
pub mod json;
pub mod types;

pub use client::{TimerClient, TimerService, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use json::{parse, ParseError, SerializeError, TypeMismatch, Value, ValueKind};
pub use types::*;
