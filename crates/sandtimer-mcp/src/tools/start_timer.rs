//! Tool: start_timer - Start or restart a labelled countdown.

use sandtimer::json::Value;
use sandtimer::{array, object, TimerService};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::arguments::{require_label, require_seconds};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "start_timer".to_string(),
        description: Some("Start or restart a sandtimer countdown.".to_string()),
        input_schema: object! {
            "type" => "object",
            "properties" => object! {
                "label" => object! {
                    "type" => "string",
                    "description" => "Name shown in the sandtimer window.",
                    "minLength" => 1,
                },
                "time" => object! {
                    "type" => "number",
                    "description" => "Countdown length in seconds.",
                    "minimum" => 1,
                },
            },
            "required" => array!["label", "time"],
            "additionalProperties" => false,
        },
    }
}

pub fn execute(args: &Value, service: &dyn TimerService) -> McpResult<ToolCallResult> {
    let label = require_label(args)?;
    let seconds = require_seconds(args)?;

    service.start_timer(&label, seconds)?;

    Ok(ToolCallResult::text(format!(
        "Started timer '{label}' for {seconds} seconds."
    )))
}
