//! JSON-RPC 2.0 message types for the MCP protocol.

use sandtimer::json::{Object, Value};
use sandtimer::object;

/// JSON-RPC 2.0 protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

/// A validated inbound message.
///
/// `id` is `Some` exactly when the key was present, so an explicit `null` id
/// still makes the message a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Option<Value>,
    pub method: String,
    pub params: Value,
}

impl Message {
    pub fn request(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    pub fn notification(method: impl Into<String>, params: Value) -> Self {
        Self {
            id: None,
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A JSON-RPC 2.0 success response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub id: Value,
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: Value, result: Value) -> Self {
        Self { id, result }
    }

    pub fn to_value(&self) -> Value {
        object! {
            "jsonrpc" => JSONRPC_VERSION,
            "id" => self.id.clone(),
            "result" => self.result.clone(),
        }
    }
}

/// A JSON-RPC 2.0 error response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcError {
    pub id: Value,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcError {
    pub fn new(id: Value, error: JsonRpcErrorObject) -> Self {
        Self { id, error }
    }

    pub fn to_value(&self) -> Value {
        object! {
            "jsonrpc" => JSONRPC_VERSION,
            "id" => self.id.clone(),
            "error" => self.error.to_value(),
        }
    }
}

/// Error object within a JSON-RPC error response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcErrorObject {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn to_value(&self) -> Value {
        let mut map = Object::new();
        map.insert("code".to_string(), Value::from(self.code));
        map.insert("message".to_string(), Value::from(self.message.as_str()));
        if let Some(data) = &self.data {
            map.insert("data".to_string(), data.clone());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope() {
        let resp = JsonRpcResponse::new(Value::from(1), object! { "message" => "pong" });
        assert_eq!(
            resp.to_value().dump().unwrap(),
            r#"{"id":1,"jsonrpc":"2.0","result":{"message":"pong"}}"#
        );
    }

    #[test]
    fn test_error_envelope_omits_missing_data() {
        let err = JsonRpcError::new(
            Value::from("abc"),
            JsonRpcErrorObject {
                code: -32600,
                message: "Invalid Request".into(),
                data: None,
            },
        );
        let value = err.to_value();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["error"]["code"], -32600);
        assert!(value["error"].get("data").is_none());
    }

    #[test]
    fn test_null_id_is_request() {
        let msg = Message::request(Value::Null, "ping", object! {});
        assert!(!msg.is_notification());
        assert!(Message::notification("x", object! {}).is_notification());
    }
}
