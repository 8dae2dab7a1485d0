//! Tool: reset_timer - Put a countdown back to its full length.

use sandtimer::json::Value;
use sandtimer::{array, object, TimerService};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::arguments::require_label;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "reset_timer".to_string(),
        description: Some(
            "Reset an existing sandtimer back to its original duration.".to_string(),
        ),
        input_schema: object! {
            "type" => "object",
            "properties" => object! {
                "label" => object! {
                    "type" => "string",
                    "description" => "Name of the timer to reset.",
                    "minLength" => 1,
                },
            },
            "required" => array!["label"],
            "additionalProperties" => false,
        },
    }
}

pub fn execute(args: &Value, service: &dyn TimerService) -> McpResult<ToolCallResult> {
    let label = require_label(args)?;
    service.reset_timer(&label)?;
    Ok(ToolCallResult::text(format!("Reset timer '{label}'.")))
}
