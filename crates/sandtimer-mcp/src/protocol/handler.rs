//! Main request dispatcher: receives validated messages, routes to handlers.

use sandtimer::json::Value;
use sandtimer::{object, TimerService};

use crate::tools::ToolRegistry;
use crate::types::*;

/// Routes requests and notifications and tracks the session lifecycle.
pub struct ProtocolHandler {
    service: Box<dyn TimerService>,
    initialized: bool,
    handshake_complete: bool,
    shutdown_requested: bool,
}

impl ProtocolHandler {
    pub fn new(service: Box<dyn TimerService>) -> Self {
        Self {
            service,
            initialized: false,
            handshake_complete: false,
            shutdown_requested: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_handshake_complete(&self) -> bool {
        self.handshake_complete
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Handle one message. Requests always yield a response envelope;
    /// notifications never do.
    pub fn handle_message(&mut self, msg: Message) -> Option<Value> {
        match msg.id {
            Some(id) => Some(self.handle_request(id, &msg.method, &msg.params)),
            None => {
                self.handle_notification(&msg.method);
                None
            }
        }
    }

    fn handle_request(&mut self, id: Value, method: &str, params: &Value) -> Value {
        match self.dispatch_request(method, params) {
            Ok(result) => {
                tracing::info!(method, id = ?id, outcome = "ok", "request handled");
                JsonRpcResponse::new(id, result).to_value()
            }
            Err(e) => {
                match &e {
                    McpError::InternalError(cause) => {
                        tracing::error!(method, id = ?id, code = e.code(), "request failed: {cause}")
                    }
                    _ => tracing::info!(method, id = ?id, code = e.code(), outcome = "error", "{e}"),
                }
                JsonRpcError::new(id, e.to_error_object()).to_value()
            }
        }
    }

    pub fn dispatch_request(&mut self, method: &str, params: &Value) -> McpResult<Value> {
        match method {
            "initialize" => Ok(self.handle_initialize(params)),
            "shutdown" => Ok(self.handle_shutdown()),

            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(params),

            "ping" => Ok(object! { "message" => "pong" }),

            _ => Err(McpError::MethodNotFound(method.to_string())),
        }
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" => {
                self.handshake_complete = true;
                tracing::info!("MCP handshake complete");
            }
            "notifications/cancelled" => {
                tracing::info!("Received cancellation notification");
            }
            _ => {
                tracing::debug!("Ignoring notification: {method}");
            }
        }
    }

    fn handle_initialize(&mut self, params: &Value) -> Value {
        if let Some(client) = params.get("clientInfo") {
            tracing::info!(
                "Initialized with client: {} v{}",
                client["name"].as_str().unwrap_or("unknown"),
                client["version"].as_str().unwrap_or("unknown")
            );
        }
        if let Some(requested) = params.get("protocolVersion").and_then(|v| v.as_str().ok()) {
            if requested != MCP_VERSION {
                tracing::warn!(
                    "Client requested protocol version {requested}, server supports {MCP_VERSION}. Proceeding with server version."
                );
            }
        }

        self.initialized = true;
        InitializeResult::default_result().to_value()
    }

    fn handle_shutdown(&mut self) -> Value {
        tracing::info!("Shutdown requested");
        self.shutdown_requested = true;
        Value::Null
    }

    fn handle_tools_list(&self) -> Value {
        ToolListResult {
            tools: ToolRegistry::list_tools(),
        }
        .to_value()
    }

    fn handle_tools_call(&self, params: &Value) -> McpResult<Value> {
        let result = ToolRegistry::call(params, self.service.as_ref())?;
        Ok(result.to_value())
    }
}
