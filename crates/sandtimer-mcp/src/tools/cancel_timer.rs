//! Tool: cancel_timer - Close a timer window.

use sandtimer::json::Value;
use sandtimer::{array, object, TimerService};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::arguments::require_label;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "cancel_timer".to_string(),
        description: Some(
            "Close an active sandtimer window and cancel its countdown.".to_string(),
        ),
        input_schema: object! {
            "type" => "object",
            "properties" => object! {
                "label" => object! {
                    "type" => "string",
                    "description" => "Name of the timer to cancel.",
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
    service.cancel_timer(&label)?;
    Ok(ToolCallResult::text(format!("Cancelled timer '{label}'.")))
}
