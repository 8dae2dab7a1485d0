//! MCP protocol handling: validation and JSON-RPC dispatch.

pub mod handler;
pub mod validator;

pub use handler::ProtocolHandler;
pub use validator::validate_message;
