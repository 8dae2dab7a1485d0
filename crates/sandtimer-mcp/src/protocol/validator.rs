//! JSON-RPC message validation.

use sandtimer::json::{Object, Value};

use crate::types::{McpError, McpResult, Message, JSONRPC_VERSION};

/// Turn a parsed document into a [`Message`].
///
/// The document must be an object with a string `method`. `params`
/// defaults to `{}`; the presence of `id` makes it a request.
pub fn validate_message(doc: &Value) -> McpResult<Message> {
    let object = doc.as_object().map_err(|_| {
        McpError::InvalidRequest("Message must be a JSON object.".to_string())
    })?;

    let method = match object.get("method") {
        Some(Value::String(method)) => method.clone(),
        _ => return Err(McpError::InvalidRequest("Missing method.".to_string())),
    };

    match object.get("jsonrpc") {
        Some(version) if *version == JSONRPC_VERSION => {}
        Some(version) => tracing::warn!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got {version:?}; accepting anyway"
        ),
        None => tracing::debug!("Message for {method} has no jsonrpc member"),
    }

    let params = object
        .get("params")
        .cloned()
        .unwrap_or_else(|| Value::Object(Object::new()));

    Ok(Message {
        id: object.get("id").cloned(),
        method,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandtimer::{array, object};

    #[test]
    fn test_request_and_notification() {
        let req = validate_message(&object! {
            "jsonrpc" => "2.0", "id" => 1, "method" => "ping",
        })
        .unwrap();
        assert_eq!(req.id, Some(Value::from(1)));
        assert_eq!(req.params, object! {});

        let notif = validate_message(&object! { "method" => "notifications/initialized" }).unwrap();
        assert!(notif.is_notification());
    }

    #[test]
    fn test_explicit_null_id_is_kept() {
        let msg = validate_message(&object! { "id" => Value::Null, "method" => "ping" }).unwrap();
        assert_eq!(msg.id, Some(Value::Null));
    }

    #[test]
    fn test_params_passed_through_unchanged() {
        let msg = validate_message(&object! { "method" => "tools/call", "params" => array![1] })
            .unwrap();
        assert_eq!(msg.params, array![1]);
    }

    #[test]
    fn test_empty_method_is_left_to_dispatch() {
        let msg = validate_message(&object! { "id" => 1, "method" => "" }).unwrap();
        assert_eq!(msg.method, "");
        assert_eq!(msg.id, Some(Value::from(1)));
    }

    #[test]
    fn test_invalid_requests() {
        for doc in [
            array![],
            Value::from("ping"),
            object! { "id" => 1 },
            object! { "id" => 1, "method" => 5 },
        ] {
            let err = validate_message(&doc).unwrap_err();
            assert_eq!(err.code(), -32600, "{doc:?}");
        }
    }
}
