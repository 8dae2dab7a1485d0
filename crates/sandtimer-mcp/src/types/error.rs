//! Error types and JSON-RPC error codes for the MCP server.

use sandtimer::json::{ParseError, Value};
use sandtimer::{object, TimerError};

use super::message::JsonRpcErrorObject;

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-specific error codes.
pub mod mcp_error_codes {
    /// The sandtimer display could not be reached.
    pub const SERVICE_UNREACHABLE: i32 = -32001;
}

/// Every error that can be answered on the wire.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Failed to reach sandtimer: {0}")]
    ServiceUnreachable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) | McpError::ToolNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::ServiceUnreachable(_) => SERVICE_UNREACHABLE,
            McpError::InternalError(_) => INTERNAL_ERROR,
        }
    }

    /// Short, stable title used as the error `message`.
    pub fn title(&self) -> &'static str {
        match self {
            McpError::ParseError(_) => "Parse error",
            McpError::InvalidRequest(_) => "Invalid Request",
            McpError::MethodNotFound(_) => "Method not found",
            McpError::ToolNotFound(_) => "Tool not found",
            McpError::InvalidParams(_) => "Invalid params",
            McpError::ServiceUnreachable(_) => "Failed to reach sandtimer",
            McpError::InternalError(_) => "Internal error",
        }
    }

    /// Structured detail carried in the error's `data` member.
    ///
    /// Internal errors never leak their cause to the client; it is logged
    /// instead.
    pub fn data(&self) -> Value {
        match self {
            McpError::MethodNotFound(method) => object! { "method" => method.as_str() },
            McpError::ToolNotFound(name) => object! { "name" => name.as_str() },
            McpError::InternalError(_) => {
                object! { "message" => "An unexpected error occurred." }
            }
            McpError::ParseError(message)
            | McpError::InvalidRequest(message)
            | McpError::InvalidParams(message)
            | McpError::ServiceUnreachable(message) => object! { "message" => message.as_str() },
        }
    }

    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        JsonRpcErrorObject {
            code: self.code(),
            message: self.title().to_string(),
            data: Some(self.data()),
        }
    }
}

impl From<TimerError> for McpError {
    fn from(e: TimerError) -> Self {
        McpError::ServiceUnreachable(e.to_string())
    }
}

impl From<ParseError> for McpError {
    fn from(e: ParseError) -> Self {
        McpError::ParseError(e.to_string())
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(McpError::ParseError("x".into()).code(), -32700);
        assert_eq!(McpError::InvalidRequest("x".into()).code(), -32600);
        assert_eq!(McpError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(McpError::ToolNotFound("x".into()).code(), -32601);
        assert_eq!(McpError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(McpError::InternalError("x".into()).code(), -32603);
        assert_eq!(McpError::ServiceUnreachable("x".into()).code(), -32001);
    }

    #[test]
    fn test_method_not_found_object() {
        let obj = McpError::MethodNotFound("foo/bar".into()).to_error_object();
        assert_eq!(obj.code, -32601);
        assert_eq!(obj.message, "Method not found");
        assert_eq!(obj.data.unwrap()["method"], "foo/bar");
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let obj = McpError::InternalError("secret detail".into()).to_error_object();
        assert_eq!(obj.message, "Internal error");
        assert_eq!(obj.data.unwrap()["message"], "An unexpected error occurred.");
    }

    #[test]
    fn test_timer_error_maps_to_unreachable() {
        let err: McpError = TimerError::NoAddresses {
            host: "nowhere".into(),
        }
        .into();
        assert_eq!(err.code(), -32001);
        let obj = err.to_error_object();
        assert_eq!(obj.message, "Failed to reach sandtimer");
        assert_eq!(obj.data.unwrap()["message"], "No addresses found for nowhere");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = sandtimer::json::parse(b"{").unwrap_err();
        let err: McpError = parse_err.into();
        assert_eq!(err.code(), -32700);
    }
}
