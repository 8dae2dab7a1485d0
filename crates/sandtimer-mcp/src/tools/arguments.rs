//! Shared argument extraction for the timer tools.

use sandtimer::json::Value;

use crate::types::{McpError, McpResult};

/// The `label` argument, trimmed. Must be a non-empty string.
pub fn require_label(args: &Value) -> McpResult<String> {
    let label = args
        .get("label")
        .and_then(|v| v.as_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if label.is_empty() {
        return Err(McpError::InvalidParams(
            "A non-empty string label is required.".to_string(),
        ));
    }
    Ok(label.to_string())
}

/// The `time` argument as whole seconds.
///
/// Fractions are truncated toward zero; the result must fit in `1..=u32::MAX`.
pub fn require_seconds(args: &Value) -> McpResult<u32> {
    let time = args
        .get("time")
        .and_then(|v| v.as_number().ok())
        .ok_or_else(|| {
            McpError::InvalidParams("The 'time' property must be a positive number.".to_string())
        })?;

    if time.is_nan() || time <= 0.0 {
        return Err(McpError::InvalidParams(
            "Timer length must be greater than zero.".to_string(),
        ));
    }

    let seconds = time.trunc();
    if seconds < 1.0 {
        return Err(McpError::InvalidParams(
            "Timer length must be at least one second.".to_string(),
        ));
    }
    if seconds > f64::from(u32::MAX) {
        return Err(McpError::InvalidParams(format!(
            "Timer length must not exceed {} seconds.",
            u32::MAX
        )));
    }
    Ok(seconds as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandtimer::object;

    #[test]
    fn test_label_is_trimmed() {
        let args = object! { "label" => "  tea  " };
        assert_eq!(require_label(&args).unwrap(), "tea");
    }

    #[test]
    fn test_label_rejects_blank_missing_and_non_string() {
        for args in [
            object! { "label" => "" },
            object! { "label" => "   " },
            object! { "label" => 5 },
            object! {},
        ] {
            let err = require_label(&args).unwrap_err();
            assert_eq!(err.code(), -32602, "{args:?}");
        }
    }

    #[test]
    fn test_seconds_truncates_fraction() {
        assert_eq!(require_seconds(&object! { "time" => 5 }).unwrap(), 5);
        assert_eq!(require_seconds(&object! { "time" => 90.9 }).unwrap(), 90);
        assert_eq!(
            require_seconds(&object! { "time" => 4294967295u32 }).unwrap(),
            u32::MAX
        );
    }

    #[test]
    fn test_seconds_rejects_out_of_range() {
        for time in [0.0, -3.0, 0.5, 4294967296.0] {
            let err = require_seconds(&object! { "time" => time }).unwrap_err();
            assert!(matches!(err, McpError::InvalidParams(_)), "{time}");
        }
    }

    #[test]
    fn test_seconds_requires_number() {
        assert!(require_seconds(&object! { "time" => "5" }).is_err());
        assert!(require_seconds(&object! {}).is_err());
    }
}
