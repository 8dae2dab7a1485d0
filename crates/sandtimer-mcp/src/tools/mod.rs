//! MCP tools: start, reset and cancel sandtimer countdowns.

pub mod arguments;
pub mod cancel_timer;
pub mod registry;
pub mod reset_timer;
pub mod start_timer;

pub use registry::ToolRegistry;
