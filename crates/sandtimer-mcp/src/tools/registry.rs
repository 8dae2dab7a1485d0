//! Tool registration and dispatch.

use sandtimer::json::Value;
use sandtimer::TimerService;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{cancel_timer, reset_timer, start_timer};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            start_timer::definition(),
            reset_timer::definition(),
            cancel_timer::definition(),
        ]
    }

    /// Validate the `tools/call` params envelope and run the named tool.
    pub fn call(params: &Value, service: &dyn TimerService) -> McpResult<ToolCallResult> {
        if !params.is_object() {
            return Err(McpError::InvalidParams(
                "Tool call params must be an object.".to_string(),
            ));
        }

        let name = params
            .get("name")
            .and_then(|v| v.as_str().ok())
            .ok_or_else(|| {
                McpError::InvalidParams("Tool name must be provided as a string.".to_string())
            })?;

        let empty = Value::Object(Default::default());
        let args = match params.get("arguments") {
            None => &empty,
            Some(args) if args.is_object() => args,
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "Tool arguments must be provided as an object.".to_string(),
                ))
            }
        };

        match name {
            "start_timer" => start_timer::execute(args, service),
            "reset_timer" => reset_timer::execute(args, service),
            "cancel_timer" => cancel_timer::execute(args, service),
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
