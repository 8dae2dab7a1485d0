//! Transport layer for MCP communication.

pub mod framing;
pub mod stdio;

pub use framing::{read_message, write_message, FramingError};
pub use stdio::{Session, SessionState};
