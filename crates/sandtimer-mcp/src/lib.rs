//! Sandtimer MCP server: exposes sandtimer countdowns as MCP tools over stdio.

pub mod config;
pub mod logging;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{ConfigOverrides, ServerConfig};
pub use logging::{LogDestination, LogSink};
pub use protocol::ProtocolHandler;
pub use transport::Session;
